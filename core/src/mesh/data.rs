//! CPU-side mesh data structures.
//!
//! This module provides:
//! - [`PrimitiveTopology`] - How vertices are assembled into primitives
//! - [`IndexFormat`] - Index data format (u16 or u32)
//! - [`MeshDescriptor`] - Descriptor for creating GPU meshes
//! - [`CpuMesh`] - CPU-side mesh holding raw vertex and index data

use std::sync::Arc;

use super::layout::{VertexAttributeFormat, VertexAttributeSemantic, VertexLayout};

/// Primitive topology describing how vertices are assembled into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PrimitiveTopology {
    /// Each vertex is a separate point.
    PointList,
    /// Every two vertices form an independent line segment.
    LineList,
    /// Vertices form a connected strip of lines.
    LineStrip,
    /// Every three vertices form a triangle.
    #[default]
    TriangleList,
    /// Vertices form a connected strip of triangles.
    TriangleStrip,
}

impl PrimitiveTopology {
    /// Get the number of vertices per primitive (for non-strip topologies).
    pub fn vertices_per_primitive(&self) -> Option<u32> {
        match self {
            Self::PointList => Some(1),
            Self::LineList => Some(2),
            Self::TriangleList => Some(3),
            Self::LineStrip | Self::TriangleStrip => None, // Variable
        }
    }
}

/// Index format for indexed drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IndexFormat {
    /// 16-bit unsigned integers (max 65535 vertices).
    #[default]
    Uint16,
    /// 32-bit unsigned integers.
    Uint32,
}

impl IndexFormat {
    /// Get the size in bytes of each index.
    pub fn size(&self) -> usize {
        match self {
            Self::Uint16 => 2,
            Self::Uint32 => 4,
        }
    }
}

/// Descriptor for creating a GPU mesh.
///
/// # Example
///
/// ```ignore
/// let desc = MeshDescriptor::new(VertexLayout::position_2d_only())
///     .with_vertex_count(3)
///     .with_label("full_screen_triangle");
/// ```
#[derive(Debug)]
pub struct MeshDescriptor {
    /// Vertex layout (shared via Arc), or `None` for an attribute-less mesh.
    pub layout: Option<Arc<VertexLayout>>,
    /// Primitive topology.
    pub topology: PrimitiveTopology,
    /// Number of vertices.
    pub vertex_count: u32,
    /// Index format (None for non-indexed).
    pub index_format: Option<IndexFormat>,
    /// Number of indices (0 for non-indexed).
    pub index_count: u32,
    /// Optional label for debugging.
    pub label: Option<String>,
}

impl MeshDescriptor {
    /// Create a new mesh descriptor with the given layout.
    pub fn new(layout: Arc<VertexLayout>) -> Self {
        Self {
            layout: Some(layout),
            topology: PrimitiveTopology::TriangleList,
            vertex_count: 0,
            index_format: None,
            index_count: 0,
            label: None,
        }
    }

    /// Create a descriptor for an attribute-less mesh.
    ///
    /// Attribute-less meshes carry no vertex buffers; the vertex stage is
    /// expected to derive its data from the built-in vertex index.
    pub fn attribute_less(topology: PrimitiveTopology, vertex_count: u32) -> Self {
        Self {
            layout: None,
            topology,
            vertex_count,
            index_format: None,
            index_count: 0,
            label: None,
        }
    }

    /// Set the primitive topology.
    pub fn with_topology(mut self, topology: PrimitiveTopology) -> Self {
        self.topology = topology;
        self
    }

    /// Set the vertex count.
    pub fn with_vertex_count(mut self, count: u32) -> Self {
        self.vertex_count = count;
        self
    }

    /// Set indexed drawing with the given format and count.
    pub fn with_indices(mut self, format: IndexFormat, count: u32) -> Self {
        self.index_format = Some(format);
        self.index_count = count;
        self
    }

    /// Set a debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Check if this mesh uses indexed drawing.
    pub fn is_indexed(&self) -> bool {
        self.index_format.is_some() && self.index_count > 0
    }

    /// Get the number of vertex buffers needed.
    pub fn buffer_count(&self) -> usize {
        self.layout.as_ref().map_or(0, |l| l.buffer_count())
    }

    /// Compute the required size in bytes for a specific vertex buffer.
    pub fn vertex_buffer_size(&self, buffer_index: usize) -> u64 {
        let stride = self
            .layout
            .as_ref()
            .map_or(0, |l| l.buffer_stride(buffer_index));
        self.vertex_count as u64 * stride as u64
    }

    /// Compute the required index buffer size in bytes.
    pub fn index_buffer_size(&self) -> u64 {
        if let Some(format) = self.index_format {
            self.index_count as u64 * format.size() as u64
        } else {
            0
        }
    }
}

/// A CPU-side mesh holding raw vertex and index data.
///
/// This is the GPU-agnostic interchange representation of a mesh. It is
/// produced by the generators in [`super::generators`] or assembled by hand,
/// and can be uploaded to the GPU via `GraphicsDevice::create_mesh_from_cpu`
/// in `cinnabar-graphics`.
///
/// Each vertex buffer slot stores its raw byte data; the number of slots
/// matches the layout's buffer count.
#[derive(Clone, PartialEq)]
pub struct CpuMesh {
    layout: Arc<VertexLayout>,
    topology: PrimitiveTopology,
    vertex_buffers: Vec<Vec<u8>>,
    vertex_count: u32,
    index_data: Option<Vec<u8>>,
    index_format: Option<IndexFormat>,
    index_count: u32,
    label: Option<String>,
}

impl CpuMesh {
    /// Create a new empty CpuMesh with the given layout.
    ///
    /// Vertex buffer slots are initialized as empty vectors matching the
    /// layout's buffer count.
    pub fn new(layout: Arc<VertexLayout>) -> Self {
        let buffer_count = layout.buffer_count();
        Self {
            layout,
            topology: PrimitiveTopology::TriangleList,
            vertex_buffers: vec![Vec::new(); buffer_count],
            vertex_count: 0,
            index_data: None,
            index_format: None,
            index_count: 0,
            label: None,
        }
    }

    /// Set raw vertex data for a specific buffer slot.
    ///
    /// Vertex count is inferred from the data length and stride.
    pub fn with_vertex_data(mut self, buffer_index: usize, data: Vec<u8>) -> Self {
        let stride = self.layout.buffer_stride(buffer_index) as usize;
        if stride > 0 {
            self.vertex_count = (data.len() / stride) as u32;
        }
        if buffer_index < self.vertex_buffers.len() {
            self.vertex_buffers[buffer_index] = data;
        }
        self
    }

    /// Set index data as u16 indices.
    pub fn with_indices_u16(mut self, indices: &[u16]) -> Self {
        self.index_data = Some(bytemuck::cast_slice(indices).to_vec());
        self.index_format = Some(IndexFormat::Uint16);
        self.index_count = indices.len() as u32;
        self
    }

    /// Set index data as u32 indices.
    pub fn with_indices_u32(mut self, indices: &[u32]) -> Self {
        self.index_data = Some(bytemuck::cast_slice(indices).to_vec());
        self.index_format = Some(IndexFormat::Uint32);
        self.index_count = indices.len() as u32;
        self
    }

    /// Set the primitive topology.
    pub fn with_topology(mut self, topology: PrimitiveTopology) -> Self {
        self.topology = topology;
        self
    }

    /// Set a debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Get the vertex layout.
    pub fn layout(&self) -> &Arc<VertexLayout> {
        &self.layout
    }

    /// Get the primitive topology.
    pub fn topology(&self) -> PrimitiveTopology {
        self.topology
    }

    /// Get raw vertex data for a specific buffer slot.
    pub fn vertex_buffer_data(&self, index: usize) -> Option<&[u8]> {
        self.vertex_buffers.get(index).map(|v| v.as_slice())
    }

    /// Get the number of vertices.
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Get the raw index data.
    pub fn index_data(&self) -> Option<&[u8]> {
        self.index_data.as_deref()
    }

    /// Get the index format.
    pub fn index_format(&self) -> Option<IndexFormat> {
        self.index_format
    }

    /// Get the number of indices.
    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Check if this mesh uses indexed drawing.
    pub fn is_indexed(&self) -> bool {
        self.index_data.is_some()
    }

    /// Get the debug label.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Get the number of vertex buffer slots.
    pub fn buffer_count(&self) -> usize {
        self.vertex_buffers.len()
    }

    /// Decode the position attribute as 2D points.
    ///
    /// Walks the position attribute's buffer slot using the layout's stride
    /// and offset, so interleaved data decodes correctly. Returns `None` if
    /// the layout has no `Float2` position attribute or the data is shorter
    /// than the layout implies.
    pub fn positions_2d(&self) -> Option<Vec<[f32; 2]>> {
        let attr = self
            .layout
            .get_attribute(VertexAttributeSemantic::Position)
            .filter(|a| a.format == VertexAttributeFormat::Float2)?;
        self.decode_attribute::<2>(attr.buffer_index, attr.offset)
    }

    /// Decode the position attribute as 3D points.
    ///
    /// Returns `None` if the layout has no `Float3` position attribute or
    /// the data is shorter than the layout implies.
    pub fn positions_3d(&self) -> Option<Vec<[f32; 3]>> {
        let attr = self
            .layout
            .get_attribute(VertexAttributeSemantic::Position)
            .filter(|a| a.format == VertexAttributeFormat::Float3)?;
        self.decode_attribute::<3>(attr.buffer_index, attr.offset)
    }

    fn decode_attribute<const N: usize>(
        &self,
        buffer_index: u32,
        offset: u32,
    ) -> Option<Vec<[f32; N]>>
    where
        [f32; N]: bytemuck::AnyBitPattern,
    {
        let stride = self.layout.buffer_stride(buffer_index as usize) as usize;
        let data = self.vertex_buffer_data(buffer_index as usize)?;
        let mut out = Vec::with_capacity(self.vertex_count as usize);
        for vertex in 0..self.vertex_count as usize {
            let start = vertex * stride + offset as usize;
            let bytes = data.get(start..start + N * 4)?;
            // Byte slices carry no alignment guarantee
            out.push(bytemuck::pod_read_unaligned::<[f32; N]>(bytes));
        }
        Some(out)
    }

    /// Create a [`MeshDescriptor`] matching this CpuMesh.
    pub fn to_descriptor(&self) -> MeshDescriptor {
        let mut desc = MeshDescriptor::new(self.layout.clone())
            .with_topology(self.topology)
            .with_vertex_count(self.vertex_count);
        if let Some(format) = self.index_format {
            desc = desc.with_indices(format, self.index_count);
        }
        if let Some(label) = &self.label {
            desc = desc.with_label(label.clone());
        }
        desc
    }
}

impl std::fmt::Debug for CpuMesh {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuMesh")
            .field("label", &self.label)
            .field("topology", &self.topology)
            .field("vertex_count", &self.vertex_count)
            .field("buffer_count", &self.vertex_buffers.len())
            .field("index_count", &self.index_count)
            .field("layout", &self.layout.label)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::layout::{VertexAttribute, VertexBufferLayout};

    #[test]
    fn test_primitive_topology_vertices() {
        assert_eq!(
            PrimitiveTopology::PointList.vertices_per_primitive(),
            Some(1)
        );
        assert_eq!(
            PrimitiveTopology::LineList.vertices_per_primitive(),
            Some(2)
        );
        assert_eq!(
            PrimitiveTopology::TriangleList.vertices_per_primitive(),
            Some(3)
        );
        assert_eq!(PrimitiveTopology::LineStrip.vertices_per_primitive(), None);
    }

    #[test]
    fn test_index_format_size() {
        assert_eq!(IndexFormat::Uint16.size(), 2);
        assert_eq!(IndexFormat::Uint32.size(), 4);
    }

    #[test]
    fn test_mesh_descriptor_sizes() {
        let desc = MeshDescriptor::new(VertexLayout::position_2d_only())
            .with_vertex_count(3)
            .with_label("tri");

        assert!(!desc.is_indexed());
        assert_eq!(desc.buffer_count(), 1);
        assert_eq!(desc.vertex_buffer_size(0), 3 * 8);
        assert_eq!(desc.index_buffer_size(), 0);
    }

    #[test]
    fn test_mesh_descriptor_attribute_less() {
        let desc = MeshDescriptor::attribute_less(PrimitiveTopology::TriangleList, 3);
        assert!(desc.layout.is_none());
        assert_eq!(desc.buffer_count(), 0);
        assert_eq!(desc.vertex_buffer_size(0), 0);
    }

    #[test]
    fn test_cpu_mesh_vertex_count_inference() {
        // 5 vertices * 8 bytes
        let mesh = CpuMesh::new(VertexLayout::position_2d_only())
            .with_vertex_data(0, vec![0u8; 40])
            .with_label("test");

        assert_eq!(mesh.vertex_count(), 5);
        assert!(!mesh.is_indexed());
        assert_eq!(mesh.buffer_count(), 1);
        assert_eq!(mesh.label(), Some("test"));
    }

    #[test]
    fn test_cpu_mesh_indexed() {
        let indices: [u16; 6] = [0, 1, 2, 2, 3, 0];
        let mesh = CpuMesh::new(VertexLayout::position_only())
            .with_vertex_data(0, vec![0u8; 48]) // 4 vertices
            .with_indices_u16(&indices);

        assert_eq!(mesh.vertex_count(), 4);
        assert!(mesh.is_indexed());
        assert_eq!(mesh.index_count(), 6);
        assert_eq!(mesh.index_format(), Some(IndexFormat::Uint16));
        assert_eq!(mesh.index_data().unwrap().len(), 12);
    }

    #[test]
    fn test_positions_2d_roundtrip() {
        let points: [[f32; 2]; 3] = [[-1.0, 1.0], [-1.0, -3.0], [3.0, 1.0]];
        let mesh = CpuMesh::new(VertexLayout::position_2d_only())
            .with_vertex_data(0, bytemuck::cast_slice(&points).to_vec());

        assert_eq!(mesh.positions_2d().unwrap(), points);
        assert_eq!(mesh.positions_3d(), None);
    }

    #[test]
    fn test_positions_interleaved() {
        // position float3 at offset 4 within a 16-byte stride
        let layout = Arc::new(
            VertexLayout::new()
                .with_buffer(VertexBufferLayout::new(16))
                .with_attribute(VertexAttribute::position(4)),
        );
        let mut data = Vec::new();
        for v in 0..2u32 {
            data.extend_from_slice(&0xAAu32.to_le_bytes());
            for c in 0..3u32 {
                data.extend_from_slice(&((v * 3 + c) as f32).to_le_bytes());
            }
        }
        let mesh = CpuMesh::new(layout).with_vertex_data(0, data);

        assert_eq!(
            mesh.positions_3d().unwrap(),
            vec![[0.0, 1.0, 2.0], [3.0, 4.0, 5.0]]
        );
    }

    #[test]
    fn test_positions_truncated_data() {
        // 8 bytes short of two full vertices
        let mesh = CpuMesh::new(VertexLayout::position_2d_only()).with_vertex_data(0, vec![0u8; 16]);
        assert_eq!(mesh.vertex_count(), 2);

        let mut truncated = mesh.clone();
        truncated.vertex_buffers[0].truncate(12);
        assert_eq!(truncated.positions_2d(), None);
    }

    #[test]
    fn test_cpu_mesh_to_descriptor() {
        let indices: [u32; 6] = [0, 1, 2, 2, 3, 0];
        let mesh = CpuMesh::new(VertexLayout::position_only())
            .with_vertex_data(0, vec![0u8; 48])
            .with_indices_u32(&indices)
            .with_topology(PrimitiveTopology::LineList)
            .with_label("desc_test");

        let desc = mesh.to_descriptor();
        assert_eq!(desc.vertex_count, 4);
        assert_eq!(desc.topology, PrimitiveTopology::LineList);
        assert_eq!(desc.index_count, 6);
        assert_eq!(desc.index_format, Some(IndexFormat::Uint32));
        assert_eq!(desc.label.as_deref(), Some("desc_test"));
    }
}
