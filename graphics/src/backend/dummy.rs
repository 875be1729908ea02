//! Dummy GPU backend for testing and development.
//!
//! This backend performs no GPU work; buffer allocations are plain byte
//! vectors, so writes and readbacks behave like a real backend and tests
//! can verify uploaded contents without GPU hardware.

use std::sync::Mutex;

use crate::device::FeatureTier;
use crate::error::GraphicsError;
use crate::instance::{AdapterInfo, AdapterType};
use crate::types::BufferDescriptor;

use super::{GpuBackend, GpuBuffer};

/// Dummy GPU backend.
#[derive(Debug, Default)]
pub struct DummyBackend;

impl DummyBackend {
    /// Create a new dummy backend.
    pub fn new() -> Self {
        Self
    }
}

impl GpuBackend for DummyBackend {
    fn name(&self) -> &'static str {
        "Dummy"
    }

    fn adapters(&self) -> Vec<AdapterInfo> {
        vec![AdapterInfo {
            name: "Dummy Adapter".to_string(),
            vendor: "Cinnabar".to_string(),
            device_type: AdapterType::Software,
            tier: FeatureTier::Compute,
        }]
    }

    fn create_buffer(&self, descriptor: &BufferDescriptor) -> Result<GpuBuffer, GraphicsError> {
        log::trace!(
            "DummyBackend: creating buffer {:?} (size: {})",
            descriptor.label,
            descriptor.size
        );
        Ok(GpuBuffer::Dummy {
            data: Mutex::new(vec![0u8; descriptor.size as usize]),
        })
    }

    fn write_buffer(
        &self,
        buffer: &GpuBuffer,
        offset: u64,
        data: &[u8],
    ) -> Result<(), GraphicsError> {
        let GpuBuffer::Dummy { data: storage } = buffer;
        let mut storage = storage
            .lock()
            .map_err(|_| GraphicsError::DeviceLost)?;

        let end = offset as usize + data.len();
        if end > storage.len() {
            return Err(GraphicsError::InvalidParameter(format!(
                "write of {} bytes at offset {} exceeds buffer size {}",
                data.len(),
                offset,
                storage.len()
            )));
        }

        log::trace!("DummyBackend: write_buffer offset={} len={}", offset, data.len());
        storage[offset as usize..end].copy_from_slice(data);
        Ok(())
    }

    fn read_buffer(
        &self,
        buffer: &GpuBuffer,
        offset: u64,
        size: u64,
    ) -> Result<Vec<u8>, GraphicsError> {
        let GpuBuffer::Dummy { data: storage } = buffer;
        let storage = storage
            .lock()
            .map_err(|_| GraphicsError::DeviceLost)?;

        let end = (offset + size) as usize;
        if end > storage.len() {
            return Err(GraphicsError::InvalidParameter(format!(
                "read of {size} bytes at offset {offset} exceeds buffer size {}",
                storage.len()
            )));
        }

        log::trace!("DummyBackend: read_buffer offset={} size={}", offset, size);
        Ok(storage[offset as usize..end].to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BufferUsage;

    #[test]
    fn test_buffer_write_read_roundtrip() {
        let backend = DummyBackend::new();
        let buffer = backend
            .create_buffer(&BufferDescriptor::new(16, BufferUsage::VERTEX))
            .unwrap();

        backend.write_buffer(&buffer, 4, &[1, 2, 3, 4]).unwrap();
        let bytes = backend.read_buffer(&buffer, 0, 16).unwrap();
        assert_eq!(&bytes[4..8], &[1, 2, 3, 4]);
        assert_eq!(&bytes[0..4], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_buffer_write_out_of_bounds() {
        let backend = DummyBackend::new();
        let buffer = backend
            .create_buffer(&BufferDescriptor::new(8, BufferUsage::VERTEX))
            .unwrap();

        let result = backend.write_buffer(&buffer, 6, &[0u8; 4]);
        assert!(matches!(result, Err(GraphicsError::InvalidParameter(_))));
    }

    #[test]
    fn test_buffer_read_out_of_bounds() {
        let backend = DummyBackend::new();
        let buffer = backend
            .create_buffer(&BufferDescriptor::new(8, BufferUsage::VERTEX))
            .unwrap();

        assert!(backend.read_buffer(&buffer, 0, 9).is_err());
    }

    #[test]
    fn test_adapter_enumeration() {
        let backend = DummyBackend::new();
        let adapters = backend.adapters();
        assert_eq!(adapters.len(), 1);
        assert_eq!(adapters[0].device_type, AdapterType::Software);
    }
}
