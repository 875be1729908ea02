//! GPU mesh descriptor.
//!
//! A [`Mesh`] describes drawable geometry: primitive topology, vertex
//! count, and the attribute bindings that connect a [`VertexLayout`]'s
//! buffer slots to GPU buffers.
//!
//! # Buffer Lifetime
//!
//! A mesh never owns its buffers. Bindings are weak back-references: the
//! code that created the buffers keeps the `Arc<Buffer>` handles alive for
//! at least as long as the mesh is used for drawing. This keeps ownership
//! in one place — dropping the handles releases the GPU memory no matter
//! how many meshes still reference it, and [`Mesh::validate_for_draw`]
//! reports the dangling bindings instead of silently drawing garbage.

use std::sync::{Arc, Weak};

use cinnabar_core::mesh::{IndexFormat, PrimitiveTopology, VertexLayout};

use crate::device::FeatureTier;
use crate::error::GraphicsError;
use crate::resources::Buffer;

/// Strong buffer handles backing an uploaded mesh.
///
/// Returned by `GraphicsDevice::create_mesh_from_cpu` alongside the mesh;
/// dropping this value invalidates the mesh's bindings.
#[derive(Debug)]
pub struct MeshBuffers {
    /// One buffer per vertex layout slot.
    pub vertex: Vec<Arc<Buffer>>,
    /// Index buffer for indexed meshes.
    pub index: Option<Arc<Buffer>>,
}

/// A GPU mesh: topology, vertex count, and non-owning attribute bindings.
///
/// Created by `GraphicsDevice::create_mesh`. An *attribute-less* mesh has
/// no layout and no bindings; its vertex stage derives data from the
/// built-in vertex index, which requires a device tier with
/// [`FeatureTier::supports_vertex_id_draws`].
pub struct Mesh {
    layout: Option<Arc<VertexLayout>>,
    topology: PrimitiveTopology,
    vertex_buffers: Vec<Weak<Buffer>>,
    vertex_count: u32,
    index_binding: Option<(Weak<Buffer>, IndexFormat, u32)>,
    label: Option<String>,
}

impl Mesh {
    /// Create a new mesh (called by GraphicsDevice).
    pub(crate) fn new(
        layout: Option<Arc<VertexLayout>>,
        topology: PrimitiveTopology,
        vertex_buffers: Vec<Weak<Buffer>>,
        vertex_count: u32,
        index_binding: Option<(Weak<Buffer>, IndexFormat, u32)>,
        label: Option<String>,
    ) -> Self {
        debug_assert_eq!(
            vertex_buffers.len(),
            layout.as_ref().map_or(0, |l| l.buffer_count()),
            "Mesh binding count must match layout buffer count"
        );

        Self {
            layout,
            topology,
            vertex_buffers,
            vertex_count,
            index_binding,
            label,
        }
    }

    /// Get the vertex layout, or `None` for an attribute-less mesh.
    pub fn layout(&self) -> Option<&Arc<VertexLayout>> {
        self.layout.as_ref()
    }

    /// Check if this mesh has no attribute bindings at all.
    pub fn is_attribute_less(&self) -> bool {
        self.layout.is_none()
    }

    /// Get the primitive topology.
    pub fn topology(&self) -> PrimitiveTopology {
        self.topology
    }

    /// Get the number of vertices.
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Get the number of vertex buffer binding slots.
    pub fn vertex_buffer_count(&self) -> usize {
        self.vertex_buffers.len()
    }

    /// Get the buffer bound to a slot, if the slot exists and the buffer
    /// is still alive.
    pub fn vertex_buffer(&self, slot: usize) -> Option<Arc<Buffer>> {
        self.vertex_buffers.get(slot).and_then(Weak::upgrade)
    }

    /// Get the index buffer, if this mesh is indexed and the buffer is
    /// still alive.
    pub fn index_buffer(&self) -> Option<Arc<Buffer>> {
        self.index_binding
            .as_ref()
            .and_then(|(weak, _, _)| weak.upgrade())
    }

    /// Get the index format, if indexed.
    pub fn index_format(&self) -> Option<IndexFormat> {
        self.index_binding.as_ref().map(|&(_, format, _)| format)
    }

    /// Get the number of indices.
    pub fn index_count(&self) -> u32 {
        self.index_binding.as_ref().map_or(0, |&(_, _, count)| count)
    }

    /// Check if this mesh uses indexed drawing.
    pub fn is_indexed(&self) -> bool {
        self.index_binding.is_some()
    }

    /// Get the mesh label, if set.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Get the number of primitives based on topology and vertex/index count.
    pub fn primitive_count(&self) -> u32 {
        let count = if self.is_indexed() {
            self.index_count()
        } else {
            self.vertex_count
        };

        match self.topology {
            PrimitiveTopology::PointList => count,
            PrimitiveTopology::LineList => count / 2,
            PrimitiveTopology::LineStrip => count.saturating_sub(1),
            PrimitiveTopology::TriangleList => count / 3,
            PrimitiveTopology::TriangleStrip => count.saturating_sub(2),
        }
    }

    /// Check that this mesh can legally be drawn on the given tier.
    ///
    /// An attribute-less mesh requires vertex-id draws; an attribute-bound
    /// mesh requires every binding to still be alive.
    ///
    /// # Errors
    ///
    /// Returns [`GraphicsError::FeatureNotSupported`] for an attribute-less
    /// mesh on a tier without vertex-id draws, or
    /// [`GraphicsError::InvalidParameter`] when a bound buffer has been
    /// dropped.
    pub fn validate_for_draw(&self, tier: FeatureTier) -> Result<(), GraphicsError> {
        if self.is_attribute_less() {
            if !tier.supports_vertex_id_draws() {
                return Err(GraphicsError::FeatureNotSupported(format!(
                    "attribute-less mesh requires vertex-id draws, device tier is {tier:?}"
                )));
            }
            return Ok(());
        }

        for (slot, weak) in self.vertex_buffers.iter().enumerate() {
            if weak.upgrade().is_none() {
                return Err(GraphicsError::InvalidParameter(format!(
                    "vertex buffer bound to slot {slot} has been dropped"
                )));
            }
        }
        if let Some((weak, _, _)) = &self.index_binding {
            if weak.upgrade().is_none() {
                return Err(GraphicsError::InvalidParameter(
                    "index buffer has been dropped".to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Mesh {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mesh")
            .field("label", &self.label)
            .field("topology", &self.topology)
            .field("vertex_count", &self.vertex_count)
            .field("vertex_buffer_count", &self.vertex_buffers.len())
            .field("index_count", &self.index_count())
            .field("layout", &self.layout.as_ref().and_then(|l| l.label.clone()))
            .finish()
    }
}

// Ensure Mesh is Send + Sync
static_assertions::assert_impl_all!(Mesh: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use cinnabar_core::mesh::generators::{crosshair_2d, crosshair_3d};
    use cinnabar_core::mesh::MeshDescriptor;
    use crate::instance::GraphicsInstance;
    use crate::device::GraphicsDevice;

    fn create_test_device() -> Arc<GraphicsDevice> {
        let instance = GraphicsInstance::new().unwrap();
        instance.create_device().unwrap()
    }

    #[test]
    fn test_attribute_less_mesh() {
        let device = create_test_device();
        let desc = MeshDescriptor::attribute_less(PrimitiveTopology::TriangleList, 3);
        let mesh = device.create_mesh(&desc, &[], None).unwrap();

        assert!(mesh.is_attribute_less());
        assert_eq!(mesh.vertex_buffer_count(), 0);
        assert!(mesh.vertex_buffer(0).is_none());
        assert_eq!(mesh.primitive_count(), 1);
    }

    #[test]
    fn test_validate_for_draw_attribute_less() {
        let device = create_test_device();
        let desc = MeshDescriptor::attribute_less(PrimitiveTopology::TriangleList, 3);
        let mesh = device.create_mesh(&desc, &[], None).unwrap();

        assert!(matches!(
            mesh.validate_for_draw(FeatureTier::LegacyAttributes),
            Err(GraphicsError::FeatureNotSupported(_))
        ));
        assert!(mesh.validate_for_draw(FeatureTier::VertexIdDraws).is_ok());
        assert!(mesh.validate_for_draw(FeatureTier::Compute).is_ok());
    }

    #[test]
    fn test_validate_for_draw_dropped_buffer() {
        let device = create_test_device();
        let (buffers, mesh) = device.create_mesh_from_cpu(&crosshair_2d()).unwrap();

        assert!(mesh.validate_for_draw(FeatureTier::LegacyAttributes).is_ok());
        assert!(mesh.vertex_buffer(0).is_some());

        drop(buffers);
        assert!(mesh.vertex_buffer(0).is_none());
        assert!(matches!(
            mesh.validate_for_draw(FeatureTier::LegacyAttributes),
            Err(GraphicsError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_primitive_count_line_list() {
        let device = create_test_device();
        let (_buffers, mesh) = device.create_mesh_from_cpu(&crosshair_3d()).unwrap();

        assert_eq!(mesh.topology(), PrimitiveTopology::LineList);
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.primitive_count(), 3);
    }

    #[test]
    fn test_mesh_debug() {
        let device = create_test_device();
        let (_buffers, mesh) = device.create_mesh_from_cpu(&crosshair_2d()).unwrap();
        let debug = format!("{:?}", mesh);
        assert!(debug.contains("crosshair_2d"));
        assert!(debug.contains("LineList"));
    }
}
