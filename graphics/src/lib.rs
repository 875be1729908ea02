//! # Cinnabar Graphics
//!
//! Graphics device abstraction and mesh tools for the Cinnabar engine.
//!
//! ## Overview
//!
//! This crate provides:
//! - [`GraphicsInstance`] / [`GraphicsDevice`] - Entry points for creating
//!   GPU resources
//! - [`Buffer`] - Owned GPU allocations with upload and readback
//! - [`Mesh`] - Drawable geometry with non-owning attribute bindings
//! - [`mesh::full_screen_triangle`] - Pre-configured mesh for
//!   post-processing passes
//! - A `Dummy` backend (default) for testing without GPU hardware
//!
//! ## Example
//!
//! ```ignore
//! use cinnabar_graphics::{mesh, GraphicsInstance};
//!
//! let instance = GraphicsInstance::new()?;
//! let device = instance.create_device()?;
//! let tier = device.capabilities().tier;
//! let (buffer, triangle) = mesh::full_screen_triangle(&device, tier)?;
//! ```

pub mod backend;
pub mod device;
pub mod error;
pub mod instance;
pub mod mesh;
pub mod resources;
pub mod types;

// Re-export main types for convenience
pub use device::{DeviceCapabilities, FeatureTier, GraphicsDevice};
pub use error::GraphicsError;
pub use instance::{AdapterInfo, AdapterType, GraphicsInstance};
pub use mesh::{Mesh, MeshBuffers};
pub use resources::Buffer;
pub use types::{BufferDescriptor, BufferUsage};

/// Graphics library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the graphics subsystem.
///
/// This should be called before using any graphics functionality.
pub fn init() {
    log::info!("Cinnabar Graphics v{} initialized", VERSION);
}
