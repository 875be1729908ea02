//! GPU buffer resource.

use std::sync::{Arc, Weak};

use crate::backend::GpuBuffer;
use crate::device::GraphicsDevice;
use crate::error::GraphicsError;
use crate::types::{BufferDescriptor, BufferUsage};

/// A GPU buffer resource.
///
/// Buffers are created by [`GraphicsDevice::create_buffer`]. The creator
/// receives the only strong handle; whoever holds it owns the allocation,
/// and the backend memory is released when the last `Arc<Buffer>` drops.
/// Meshes reference buffers weakly and never extend their lifetime.
///
/// # Example
///
/// ```ignore
/// let buffer = device.create_buffer(
///     &BufferDescriptor::new(24, BufferUsage::VERTEX | BufferUsage::COPY_DST),
/// )?;
/// buffer.write(0, bytemuck::cast_slice(&positions))?;
/// ```
pub struct Buffer {
    device: Weak<GraphicsDevice>,
    descriptor: BufferDescriptor,
    gpu: GpuBuffer,
}

impl Buffer {
    /// Create a new buffer (called by GraphicsDevice).
    pub(crate) fn new(
        device: Weak<GraphicsDevice>,
        descriptor: BufferDescriptor,
        gpu: GpuBuffer,
    ) -> Self {
        Self {
            device,
            descriptor,
            gpu,
        }
    }

    /// Get the parent device, if it still exists.
    pub fn device(&self) -> Option<Arc<GraphicsDevice>> {
        self.device.upgrade()
    }

    /// Get the buffer descriptor.
    pub fn descriptor(&self) -> &BufferDescriptor {
        &self.descriptor
    }

    /// Get the buffer size in bytes.
    pub fn size(&self) -> u64 {
        self.descriptor.size
    }

    /// Get the buffer usage flags.
    pub fn usage(&self) -> BufferUsage {
        self.descriptor.usage
    }

    /// Get the buffer label, if set.
    pub fn label(&self) -> Option<&str> {
        self.descriptor.label.as_deref()
    }

    /// Upload data to the buffer at the given byte offset.
    ///
    /// # Errors
    ///
    /// Returns [`GraphicsError::DeviceLost`] if the parent device has been
    /// dropped, or an error from the backend if the write falls outside the
    /// allocation.
    pub fn write(&self, offset: u64, data: &[u8]) -> Result<(), GraphicsError> {
        let device = self.device.upgrade().ok_or(GraphicsError::DeviceLost)?;
        device.instance().backend().write_buffer(&self.gpu, offset, data)
    }

    /// Read data back from the buffer.
    ///
    /// Blocking; intended for tests and tooling rather than per-frame use.
    ///
    /// # Errors
    ///
    /// Returns [`GraphicsError::DeviceLost`] if the parent device has been
    /// dropped, or an error from the backend if the range falls outside the
    /// allocation.
    pub fn read(&self, offset: u64, size: u64) -> Result<Vec<u8>, GraphicsError> {
        let device = self.device.upgrade().ok_or(GraphicsError::DeviceLost)?;
        device.instance().backend().read_buffer(&self.gpu, offset, size)
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("size", &self.descriptor.size)
            .field("usage", &self.descriptor.usage)
            .field("label", &self.descriptor.label)
            .finish()
    }
}

// Ensure Buffer is Send + Sync
static_assertions::assert_impl_all!(Buffer: Send, Sync);
