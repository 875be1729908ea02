//! GPU backend abstraction layer.
//!
//! This module provides a trait-based abstraction for GPU backends, so the
//! rest of the crate can create and fill buffers without knowing which GPU
//! API is underneath.
//!
//! # Available Backends
//!
//! - `dummy` (default): in-process backend for testing and development.
//!   Buffers are plain byte vectors, so uploads are observable without GPU
//!   hardware.

#[cfg(feature = "dummy")]
pub mod dummy;

use std::sync::Arc;

use crate::error::GraphicsError;
use crate::instance::AdapterInfo;
use crate::types::BufferDescriptor;

/// Handle to a GPU buffer allocation.
pub enum GpuBuffer {
    /// Dummy backend allocation backed by process memory.
    #[cfg(feature = "dummy")]
    Dummy { data: std::sync::Mutex<Vec<u8>> },
}

impl std::fmt::Debug for GpuBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(feature = "dummy")]
            Self::Dummy { data } => {
                let len = data.lock().map(|d| d.len()).unwrap_or(0);
                f.debug_struct("GpuBuffer::Dummy").field("len", &len).finish()
            }
            #[cfg(not(feature = "dummy"))]
            _ => unreachable!(),
        }
    }
}

/// GPU backend trait for abstracting different GPU APIs.
pub trait GpuBackend: Send + Sync + 'static {
    /// Get the backend name.
    fn name(&self) -> &'static str;

    /// Enumerate the adapters this backend exposes.
    fn adapters(&self) -> Vec<AdapterInfo>;

    /// Create a buffer allocation.
    fn create_buffer(&self, descriptor: &BufferDescriptor) -> Result<GpuBuffer, GraphicsError>;

    /// Write data into a buffer at the given byte offset.
    fn write_buffer(
        &self,
        buffer: &GpuBuffer,
        offset: u64,
        data: &[u8],
    ) -> Result<(), GraphicsError>;

    /// Read data back from a buffer.
    fn read_buffer(
        &self,
        buffer: &GpuBuffer,
        offset: u64,
        size: u64,
    ) -> Result<Vec<u8>, GraphicsError>;
}

/// Selects and creates the appropriate backend based on enabled features.
pub fn create_backend() -> Result<Arc<dyn GpuBackend>, GraphicsError> {
    #[cfg(feature = "dummy")]
    {
        log::info!("Using dummy backend");
        Ok(Arc::new(dummy::DummyBackend::new()))
    }

    #[cfg(not(feature = "dummy"))]
    Err(GraphicsError::InitializationFailed(
        "no backend feature enabled".to_string(),
    ))
}
