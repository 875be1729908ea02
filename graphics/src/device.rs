//! Graphics device.
//!
//! The [`GraphicsDevice`] is the main interface for creating GPU resources.
//! It is created by [`GraphicsInstance::create_device`].
//!
//! A process may designate one device as *current* via
//! [`GraphicsDevice::make_current`]; helpers such as
//! `mesh::full_screen_triangle_current` resolve it through
//! [`GraphicsDevice::current`] instead of taking an explicit device
//! parameter.

use std::sync::{Arc, RwLock, Weak};

use cinnabar_core::mesh::{CpuMesh, MeshDescriptor};

use crate::error::GraphicsError;
use crate::instance::GraphicsInstance;
use crate::mesh::{Mesh, MeshBuffers};
use crate::resources::Buffer;
use crate::types::{BufferDescriptor, BufferUsage};

/// Graphics-API feature tier reported by a device.
///
/// Tiers are ordered: a device at a given tier supports everything the
/// tiers below it support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FeatureTier {
    /// GL 2.1 / ES 2.0 class hardware. Vertex shaders read their inputs
    /// exclusively from bound attribute streams.
    LegacyAttributes,
    /// GL 3.0 / ES 3.0 class hardware. Vertex shaders may derive data from
    /// the built-in vertex index, making attribute-less draws legal.
    VertexIdDraws,
    /// Compute-class hardware (Vulkan, Metal, D3D12, GL 4.3+).
    Compute,
}

impl FeatureTier {
    /// Whether attribute-less draws addressing vertices through the
    /// built-in vertex index are available on this tier.
    pub fn supports_vertex_id_draws(self) -> bool {
        self >= Self::VertexIdDraws
    }
}

/// Capabilities of a graphics device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceCapabilities {
    /// Feature tier of the device.
    pub tier: FeatureTier,
    /// Maximum buffer size in bytes.
    pub max_buffer_size: u64,
    /// Maximum number of vertex attributes per mesh.
    pub max_vertex_attributes: u32,
}

impl Default for DeviceCapabilities {
    fn default() -> Self {
        Self {
            tier: FeatureTier::Compute,
            max_buffer_size: 1 << 30, // 1 GB
            max_vertex_attributes: 16,
        }
    }
}

/// Process-wide current device, stored weak so a dropped device never
/// outlives its registration.
static CURRENT_DEVICE: RwLock<Option<Weak<GraphicsDevice>>> = RwLock::new(None);

/// A graphics device for creating GPU resources.
///
/// # Thread Safety
///
/// `GraphicsDevice` is `Send + Sync` and can be safely shared across
/// threads. Creating resources on one device from multiple threads is
/// safe; the backend serializes access to each allocation.
///
/// # Example
///
/// ```ignore
/// let instance = GraphicsInstance::new()?;
/// let device = instance.create_device()?;
///
/// let buffer = device.create_buffer(
///     &BufferDescriptor::new(24, BufferUsage::VERTEX | BufferUsage::COPY_DST),
/// )?;
/// ```
pub struct GraphicsDevice {
    instance: Arc<GraphicsInstance>,
    name: String,
    capabilities: DeviceCapabilities,
    // Track allocated buffers (weak references for cleanup/debugging)
    buffers: RwLock<Vec<Weak<Buffer>>>,
}

impl GraphicsDevice {
    /// Create a new graphics device (called by GraphicsInstance).
    pub(crate) fn new(
        instance: Arc<GraphicsInstance>,
        name: String,
        capabilities: DeviceCapabilities,
    ) -> Self {
        Self {
            instance,
            name,
            capabilities,
            buffers: RwLock::new(Vec::new()),
        }
    }

    /// Get the parent instance.
    pub fn instance(&self) -> &Arc<GraphicsInstance> {
        &self.instance
    }

    /// Get the device name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the device capabilities.
    pub fn capabilities(&self) -> &DeviceCapabilities {
        &self.capabilities
    }

    /// Make this device the process-wide current device.
    ///
    /// Helpers with a `_current` suffix resolve the device registered here
    /// at call time.
    pub fn make_current(self: &Arc<Self>) {
        if let Ok(mut current) = CURRENT_DEVICE.write() {
            *current = Some(Arc::downgrade(self));
        }
        log::trace!("GraphicsDevice: {} is now current", self.name);
    }

    /// Get the process-wide current device, if one is registered and alive.
    ///
    /// This is a read of process-wide mutable state; prefer the explicit
    /// device-parameter APIs where the call site already has a device.
    pub fn current() -> Option<Arc<GraphicsDevice>> {
        CURRENT_DEVICE
            .read()
            .ok()
            .and_then(|current| current.as_ref().and_then(Weak::upgrade))
    }

    /// Clear the process-wide current device.
    pub fn clear_current() {
        if let Ok(mut current) = CURRENT_DEVICE.write() {
            *current = None;
        }
    }

    /// Create a GPU buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer size is zero, exceeds device limits,
    /// or the backend allocation fails.
    pub fn create_buffer(
        self: &Arc<Self>,
        descriptor: &BufferDescriptor,
    ) -> Result<Arc<Buffer>, GraphicsError> {
        if descriptor.size == 0 {
            return Err(GraphicsError::InvalidParameter(
                "buffer size cannot be zero".to_string(),
            ));
        }
        if descriptor.size > self.capabilities.max_buffer_size {
            return Err(GraphicsError::InvalidParameter(format!(
                "buffer size {} exceeds maximum {}",
                descriptor.size, self.capabilities.max_buffer_size
            )));
        }

        let gpu = self.instance.backend().create_buffer(descriptor)?;
        let buffer = Arc::new(Buffer::new(Arc::downgrade(self), descriptor.clone(), gpu));

        if let Ok(mut buffers) = self.buffers.write() {
            buffers.push(Arc::downgrade(&buffer));
        }

        log::trace!(
            "GraphicsDevice: created buffer {:?}, size={}",
            descriptor.label,
            descriptor.size
        );

        Ok(buffer)
    }

    /// Create a GPU mesh from a descriptor and pre-filled buffers.
    ///
    /// The returned [`Mesh`] holds only weak references to the buffers; the
    /// caller keeps the `Arc<Buffer>`s alive for as long as the mesh is
    /// drawn.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer set does not match the descriptor:
    /// wrong buffer count, a buffer too small for the vertex or index data,
    /// or missing `VERTEX`/`INDEX` usage.
    pub fn create_mesh(
        self: &Arc<Self>,
        descriptor: &MeshDescriptor,
        vertex_buffers: &[Arc<Buffer>],
        index_buffer: Option<&Arc<Buffer>>,
    ) -> Result<Mesh, GraphicsError> {
        if let Some(layout) = &descriptor.layout {
            layout
                .validate()
                .map_err(GraphicsError::InvalidParameter)?;
            if layout.attributes.len() > self.capabilities.max_vertex_attributes as usize {
                return Err(GraphicsError::InvalidParameter(format!(
                    "layout has {} attributes but device supports {}",
                    layout.attributes.len(),
                    self.capabilities.max_vertex_attributes
                )));
            }
            if vertex_buffers.len() != layout.buffer_count() {
                return Err(GraphicsError::InvalidParameter(format!(
                    "mesh layout expects {} vertex buffers, got {}",
                    layout.buffer_count(),
                    vertex_buffers.len()
                )));
            }
            for (slot, buffer) in vertex_buffers.iter().enumerate() {
                if !buffer.usage().contains(BufferUsage::VERTEX) {
                    return Err(GraphicsError::InvalidParameter(format!(
                        "buffer in slot {slot} lacks VERTEX usage"
                    )));
                }
                let required = descriptor.vertex_buffer_size(slot);
                if buffer.size() < required {
                    return Err(GraphicsError::InvalidParameter(format!(
                        "buffer in slot {slot} holds {} bytes, mesh needs {required}",
                        buffer.size()
                    )));
                }
            }
        } else if !vertex_buffers.is_empty() {
            return Err(GraphicsError::InvalidParameter(
                "attribute-less mesh cannot bind vertex buffers".to_string(),
            ));
        }

        let index_binding = match (descriptor.is_indexed(), index_buffer) {
            (true, Some(buffer)) => {
                if !buffer.usage().contains(BufferUsage::INDEX) {
                    return Err(GraphicsError::InvalidParameter(
                        "index buffer lacks INDEX usage".to_string(),
                    ));
                }
                if buffer.size() < descriptor.index_buffer_size() {
                    return Err(GraphicsError::InvalidParameter(format!(
                        "index buffer holds {} bytes, mesh needs {}",
                        buffer.size(),
                        descriptor.index_buffer_size()
                    )));
                }
                // is_indexed() implies the format is present
                let format = descriptor.index_format.ok_or_else(|| {
                    GraphicsError::InvalidParameter("indexed mesh without index format".to_string())
                })?;
                Some((Arc::downgrade(buffer), format, descriptor.index_count))
            }
            (true, None) => {
                return Err(GraphicsError::InvalidParameter(
                    "indexed mesh descriptor without an index buffer".to_string(),
                ));
            }
            (false, Some(_)) => {
                return Err(GraphicsError::InvalidParameter(
                    "index buffer provided for a non-indexed mesh".to_string(),
                ));
            }
            (false, None) => None,
        };

        log::trace!(
            "GraphicsDevice: created mesh {:?}, vertices={}",
            descriptor.label,
            descriptor.vertex_count
        );

        Ok(Mesh::new(
            descriptor.layout.clone(),
            descriptor.topology,
            vertex_buffers.iter().map(Arc::downgrade).collect(),
            descriptor.vertex_count,
            index_binding,
            descriptor.label.clone(),
        ))
    }

    /// Upload a [`CpuMesh`] to the GPU.
    ///
    /// Creates one vertex buffer per layout slot (plus an index buffer for
    /// indexed meshes), uploads the CPU-side bytes, and assembles a mesh
    /// over them. The strong buffer handles are returned alongside the
    /// mesh; dropping them invalidates the mesh's bindings.
    ///
    /// # Errors
    ///
    /// Returns an error if any buffer allocation or upload fails.
    pub fn create_mesh_from_cpu(
        self: &Arc<Self>,
        cpu: &CpuMesh,
    ) -> Result<(MeshBuffers, Mesh), GraphicsError> {
        let label = cpu.label().unwrap_or("mesh");
        let mut vertex = Vec::with_capacity(cpu.buffer_count());

        for slot in 0..cpu.buffer_count() {
            let data = cpu.vertex_buffer_data(slot).ok_or_else(|| {
                GraphicsError::InvalidParameter(format!("missing vertex data for slot {slot}"))
            })?;
            let buffer = self.create_buffer(
                &BufferDescriptor::new(
                    data.len() as u64,
                    BufferUsage::VERTEX | BufferUsage::COPY_DST,
                )
                .with_label(format!("{label}.vb{slot}")),
            )?;
            buffer.write(0, data)?;
            vertex.push(buffer);
        }

        let index = match cpu.index_data() {
            Some(data) => {
                let buffer = self.create_buffer(
                    &BufferDescriptor::new(
                        data.len() as u64,
                        BufferUsage::INDEX | BufferUsage::COPY_DST,
                    )
                    .with_label(format!("{label}.ib")),
                )?;
                buffer.write(0, data)?;
                Some(buffer)
            }
            None => None,
        };

        let mesh = self.create_mesh(&cpu.to_descriptor(), &vertex, index.as_ref())?;
        Ok((MeshBuffers { vertex, index }, mesh))
    }

    /// Get the number of live buffers created by this device.
    pub fn buffer_count(&self) -> usize {
        self.buffers
            .read()
            .map(|b| b.iter().filter(|w| w.strong_count() > 0).count())
            .unwrap_or(0)
    }

    /// Clean up dead weak references to released resources.
    pub fn cleanup_dead_resources(&self) {
        if let Ok(mut buffers) = self.buffers.write() {
            buffers.retain(|w| w.strong_count() > 0);
        }
    }
}

impl std::fmt::Debug for GraphicsDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphicsDevice")
            .field("name", &self.name)
            .field("capabilities", &self.capabilities)
            .finish()
    }
}

// Ensure GraphicsDevice is Send + Sync
static_assertions::assert_impl_all!(GraphicsDevice: Send, Sync);
