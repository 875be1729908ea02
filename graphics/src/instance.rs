//! Graphics instance.
//!
//! The [`GraphicsInstance`] is the top-level entry point for the graphics
//! system. It owns the GPU backend and manages one or more
//! [`GraphicsDevice`]s.

use std::sync::{Arc, RwLock, Weak};

use crate::backend::{self, GpuBackend};
use crate::device::{DeviceCapabilities, FeatureTier, GraphicsDevice};
use crate::error::GraphicsError;

/// Information about a graphics adapter.
#[derive(Debug, Clone)]
pub struct AdapterInfo {
    /// Adapter name.
    pub name: String,
    /// Adapter vendor.
    pub vendor: String,
    /// Device type (discrete, integrated, etc.).
    pub device_type: AdapterType,
    /// Capability tier reported by the adapter.
    pub tier: FeatureTier,
}

/// Type of graphics adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdapterType {
    /// Discrete GPU (dedicated graphics card).
    Discrete,
    /// Integrated GPU (shared with CPU).
    Integrated,
    /// Software renderer.
    Software,
    /// Unknown adapter type.
    Unknown,
}

/// The graphics instance manages devices and adapters.
///
/// # Thread Safety
///
/// `GraphicsInstance` is `Send + Sync` and can be safely shared across
/// threads.
///
/// # Example
///
/// ```ignore
/// let instance = GraphicsInstance::new()?;
/// let device = instance.create_device()?;
/// ```
pub struct GraphicsInstance {
    /// Weak self-reference for creating devices.
    self_ref: RwLock<Weak<GraphicsInstance>>,
    /// Devices created by this instance. Tracked weakly: each device holds
    /// a strong reference back to the instance, so strong tracking here
    /// would form a cycle and leak both.
    devices: RwLock<Vec<Weak<GraphicsDevice>>>,
    /// GPU backend for this instance.
    backend: Arc<dyn GpuBackend>,
}

impl GraphicsInstance {
    /// Create a new graphics instance.
    ///
    /// # Errors
    ///
    /// Returns an error if no GPU backend can be initialized.
    pub fn new() -> Result<Arc<Self>, GraphicsError> {
        log::info!("Creating GraphicsInstance");

        let backend = backend::create_backend()?;
        log::info!("Using GPU backend: {}", backend.name());

        let instance = Arc::new(Self {
            self_ref: RwLock::new(Weak::new()),
            devices: RwLock::new(Vec::new()),
            backend,
        });

        if let Ok(mut self_ref) = instance.self_ref.write() {
            *self_ref = Arc::downgrade(&instance);
        }

        Ok(instance)
    }

    /// Get the GPU backend (internal use only).
    pub(crate) fn backend(&self) -> &Arc<dyn GpuBackend> {
        &self.backend
    }

    /// Get the strong self-reference.
    fn arc_self(&self) -> Option<Arc<GraphicsInstance>> {
        self.self_ref.read().ok().and_then(|r| r.upgrade())
    }

    /// Enumerate available graphics adapters.
    pub fn enumerate_adapters(&self) -> Vec<AdapterInfo> {
        self.backend.adapters()
    }

    /// Create a graphics device on the default adapter.
    ///
    /// The device's capabilities come from the adapter's reported tier.
    ///
    /// # Errors
    ///
    /// Returns an error if device creation fails.
    pub fn create_device(&self) -> Result<Arc<GraphicsDevice>, GraphicsError> {
        let adapters = self.enumerate_adapters();
        let adapter = adapters.first().ok_or_else(|| {
            GraphicsError::InitializationFailed("no graphics adapters available".to_string())
        })?;

        let capabilities = DeviceCapabilities {
            tier: adapter.tier,
            ..DeviceCapabilities::default()
        };
        self.create_device_inner(adapter.name.clone(), capabilities)
    }

    /// Create a graphics device with explicit capabilities.
    ///
    /// Intended for tests and tools that need to exercise a specific
    /// capability tier regardless of what the adapter reports.
    ///
    /// # Errors
    ///
    /// Returns an error if device creation fails.
    pub fn create_device_with_capabilities(
        &self,
        capabilities: DeviceCapabilities,
    ) -> Result<Arc<GraphicsDevice>, GraphicsError> {
        let adapters = self.enumerate_adapters();
        let name = adapters
            .first()
            .map(|a| a.name.clone())
            .unwrap_or_else(|| "Unknown Adapter".to_string());
        self.create_device_inner(name, capabilities)
    }

    fn create_device_inner(
        &self,
        name: String,
        capabilities: DeviceCapabilities,
    ) -> Result<Arc<GraphicsDevice>, GraphicsError> {
        log::info!("Creating device on adapter: {name} (tier {:?})", capabilities.tier);

        let instance = self.arc_self().ok_or_else(|| {
            GraphicsError::ResourceCreationFailed("instance has been dropped".to_string())
        })?;
        let device = Arc::new(GraphicsDevice::new(instance, name, capabilities));

        if let Ok(mut devices) = self.devices.write() {
            devices.push(Arc::downgrade(&device));
        }

        Ok(device)
    }

    /// Get the number of live devices created by this instance.
    pub fn device_count(&self) -> usize {
        self.devices
            .read()
            .map(|d| d.iter().filter(|w| w.strong_count() > 0).count())
            .unwrap_or(0)
    }
}

impl std::fmt::Debug for GraphicsInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphicsInstance")
            .field("backend", &self.backend.name())
            .field("device_count", &self.device_count())
            .finish()
    }
}

// Ensure GraphicsInstance is Send + Sync
static_assertions::assert_impl_all!(GraphicsInstance: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_creation() {
        let instance = GraphicsInstance::new().unwrap();
        assert_eq!(instance.device_count(), 0);
    }

    #[test]
    fn test_enumerate_adapters() {
        let instance = GraphicsInstance::new().unwrap();
        assert!(!instance.enumerate_adapters().is_empty());
    }

    #[test]
    fn test_create_device() {
        let instance = GraphicsInstance::new().unwrap();
        let device = instance.create_device().unwrap();
        assert_eq!(device.name(), "Dummy Adapter");
        assert_eq!(instance.device_count(), 1);
    }

    #[test]
    fn test_create_device_with_capabilities() {
        let instance = GraphicsInstance::new().unwrap();
        let device = instance
            .create_device_with_capabilities(DeviceCapabilities {
                tier: FeatureTier::LegacyAttributes,
                ..DeviceCapabilities::default()
            })
            .unwrap();
        assert_eq!(device.capabilities().tier, FeatureTier::LegacyAttributes);
    }

    #[test]
    fn test_create_multiple_devices() {
        let instance = GraphicsInstance::new().unwrap();
        let _device1 = instance.create_device().unwrap();
        let _device2 = instance.create_device().unwrap();
        assert_eq!(instance.device_count(), 2);
    }
}
