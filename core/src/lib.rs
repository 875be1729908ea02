//! # Cinnabar Core
//!
//! GPU-agnostic building blocks for the Cinnabar engine: the CPU-side mesh
//! data model and procedural primitive generators.

pub mod mesh;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the core subsystem.
pub fn init() {
    log::info!("Cinnabar Core v{} initialized", VERSION);
}
