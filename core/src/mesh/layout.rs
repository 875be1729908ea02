//! Vertex layout definitions for meshes.
//!
//! A [`VertexLayout`] describes how vertex data is arranged across one or
//! more buffers: each buffer binding has a stride, and each attribute names
//! the buffer slot it reads from, its format, and its byte offset within an
//! element.
//!
//! Layouts are wrapped in `Arc` and shared between meshes since there are
//! typically only a few combinations in a running application.
//!
//! # Example
//!
//! ```ignore
//! // Tightly packed 2D positions, one buffer, stride 8:
//! let layout = Arc::new(VertexLayout::new()
//!     .with_buffer(VertexBufferLayout::new(8))
//!     .with_attribute(VertexAttribute::position_2d(0)));
//! ```

use std::sync::Arc;

/// Semantic meaning of a vertex attribute.
///
/// Semantics are used to match mesh attributes with shader inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexAttributeSemantic {
    /// Vertex position (float2 or float3).
    Position,
    /// Vertex normal (typically float3).
    Normal,
    /// Texture coordinates (typically float2).
    TexCoord0,
    /// Vertex color (typically float4).
    Color,
}

/// Format of a vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexAttributeFormat {
    /// Single 32-bit float.
    Float,
    /// Two 32-bit floats.
    Float2,
    /// Three 32-bit floats.
    Float3,
    /// Four 32-bit floats.
    Float4,
}

impl VertexAttributeFormat {
    /// Get the size in bytes of this format.
    pub fn size(&self) -> usize {
        match self {
            Self::Float => 4,
            Self::Float2 => 8,
            Self::Float3 => 12,
            Self::Float4 => 16,
        }
    }

    /// Get the number of float components in this format.
    pub fn component_count(&self) -> usize {
        match self {
            Self::Float => 1,
            Self::Float2 => 2,
            Self::Float3 => 3,
            Self::Float4 => 4,
        }
    }
}

/// Describes a single vertex buffer binding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VertexBufferLayout {
    /// Stride in bytes between consecutive elements.
    pub stride: u32,
}

impl VertexBufferLayout {
    /// Create a new vertex buffer layout with the given stride.
    pub fn new(stride: u32) -> Self {
        Self { stride }
    }
}

/// A single vertex attribute description.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VertexAttribute {
    /// Semantic meaning of this attribute.
    pub semantic: VertexAttributeSemantic,
    /// Data format of this attribute.
    pub format: VertexAttributeFormat,
    /// Byte offset within the vertex buffer element.
    pub offset: u32,
    /// Index of the vertex buffer this attribute reads from.
    pub buffer_index: u32,
}

impl VertexAttribute {
    /// Create a new vertex attribute.
    pub fn new(
        semantic: VertexAttributeSemantic,
        format: VertexAttributeFormat,
        offset: u32,
        buffer_index: u32,
    ) -> Self {
        Self {
            semantic,
            format,
            offset,
            buffer_index,
        }
    }

    /// Create a 3D position attribute (float3) at buffer 0.
    pub fn position(offset: u32) -> Self {
        Self::new(
            VertexAttributeSemantic::Position,
            VertexAttributeFormat::Float3,
            offset,
            0,
        )
    }

    /// Create a 2D position attribute (float2) at buffer 0.
    pub fn position_2d(offset: u32) -> Self {
        Self::new(
            VertexAttributeSemantic::Position,
            VertexAttributeFormat::Float2,
            offset,
            0,
        )
    }

    /// Set the buffer index for this attribute.
    pub fn at_buffer(mut self, buffer_index: u32) -> Self {
        self.buffer_index = buffer_index;
        self
    }
}

/// Describes the layout of vertex data across one or more buffers.
///
/// Layouts are typically wrapped in `Arc` and shared between meshes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VertexLayout {
    /// Descriptions of each vertex buffer binding.
    pub buffers: Vec<VertexBufferLayout>,
    /// The vertex attributes, each referencing a buffer by index.
    pub attributes: Vec<VertexAttribute>,
    /// Optional label for debugging.
    pub label: Option<String>,
}

impl VertexLayout {
    /// Create a new empty vertex layout.
    pub fn new() -> Self {
        Self {
            buffers: Vec::new(),
            attributes: Vec::new(),
            label: None,
        }
    }

    /// Add a vertex buffer binding.
    pub fn with_buffer(mut self, buffer: VertexBufferLayout) -> Self {
        self.buffers.push(buffer);
        self
    }

    /// Add a vertex attribute.
    pub fn with_attribute(mut self, attribute: VertexAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Set a debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Get the number of vertex buffers.
    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    /// Get the stride for a specific buffer, or 0 if the index is out of range.
    pub fn buffer_stride(&self, buffer_index: usize) -> u32 {
        self.buffers
            .get(buffer_index)
            .map(|b| b.stride)
            .unwrap_or(0)
    }

    /// Check if this layout has a specific semantic.
    pub fn has_semantic(&self, semantic: VertexAttributeSemantic) -> bool {
        self.attributes.iter().any(|attr| attr.semantic == semantic)
    }

    /// Get an attribute by semantic.
    pub fn get_attribute(&self, semantic: VertexAttributeSemantic) -> Option<&VertexAttribute> {
        self.attributes
            .iter()
            .find(|attr| attr.semantic == semantic)
    }

    /// Validate the layout.
    ///
    /// Checks that every attribute references a defined buffer and fits
    /// within that buffer's stride.
    pub fn validate(&self) -> Result<(), String> {
        for attr in &self.attributes {
            let Some(buffer) = self.buffers.get(attr.buffer_index as usize) else {
                return Err(format!(
                    "Attribute {:?} references buffer {} but only {} buffers defined",
                    attr.semantic,
                    attr.buffer_index,
                    self.buffers.len()
                ));
            };
            if attr.offset + attr.format.size() as u32 > buffer.stride {
                return Err(format!(
                    "Attribute {:?} at offset {} ({} bytes) exceeds buffer stride {}",
                    attr.semantic,
                    attr.offset,
                    attr.format.size(),
                    buffer.stride
                ));
            }
        }
        Ok(())
    }
}

impl Default for VertexLayout {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Common Layouts
// ============================================================================

impl VertexLayout {
    /// 3D position-only layout (12 bytes per vertex, single buffer).
    pub fn position_only() -> Arc<Self> {
        Arc::new(
            Self::new()
                .with_buffer(VertexBufferLayout::new(12))
                .with_attribute(VertexAttribute::position(0))
                .with_label("position_only"),
        )
    }

    /// 2D position-only layout (8 bytes per vertex, single buffer).
    ///
    /// Used by screen-space geometry such as the full-screen triangle and
    /// the 2D crosshair.
    pub fn position_2d_only() -> Arc<Self> {
        Arc::new(
            Self::new()
                .with_buffer(VertexBufferLayout::new(8))
                .with_attribute(VertexAttribute::position_2d(0))
                .with_label("position_2d_only"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_attribute_format_size() {
        assert_eq!(VertexAttributeFormat::Float.size(), 4);
        assert_eq!(VertexAttributeFormat::Float2.size(), 8);
        assert_eq!(VertexAttributeFormat::Float3.size(), 12);
        assert_eq!(VertexAttributeFormat::Float4.size(), 16);
    }

    #[test]
    fn test_format_component_count() {
        assert_eq!(VertexAttributeFormat::Float2.component_count(), 2);
        assert_eq!(VertexAttributeFormat::Float3.component_count(), 3);
    }

    #[test]
    fn test_vertex_layout_single_buffer() {
        let layout = VertexLayout::new()
            .with_buffer(VertexBufferLayout::new(20))
            .with_attribute(VertexAttribute::position(0))
            .with_attribute(VertexAttribute::new(
                VertexAttributeSemantic::TexCoord0,
                VertexAttributeFormat::Float2,
                12,
                0,
            ));

        assert_eq!(layout.buffer_count(), 1);
        assert_eq!(layout.buffer_stride(0), 20);
        assert!(layout.has_semantic(VertexAttributeSemantic::Position));
        assert!(layout.has_semantic(VertexAttributeSemantic::TexCoord0));
        assert!(!layout.has_semantic(VertexAttributeSemantic::Normal));
        assert!(layout.validate().is_ok());
    }

    #[test]
    fn test_vertex_layout_invalid_buffer_index() {
        let layout = VertexLayout::new()
            .with_buffer(VertexBufferLayout::new(12))
            .with_attribute(VertexAttribute::position(0).at_buffer(3));

        assert!(layout.validate().is_err());
    }

    #[test]
    fn test_vertex_layout_attribute_exceeds_stride() {
        let layout = VertexLayout::new()
            .with_buffer(VertexBufferLayout::new(8))
            .with_attribute(VertexAttribute::position(0)); // float3 needs 12 bytes

        assert!(layout.validate().is_err());
    }

    #[test]
    fn test_common_layouts() {
        let pos = VertexLayout::position_only();
        assert_eq!(pos.buffer_count(), 1);
        assert_eq!(pos.buffer_stride(0), 12);
        assert!(pos.validate().is_ok());

        let pos_2d = VertexLayout::position_2d_only();
        assert_eq!(pos_2d.buffer_stride(0), 8);
        let attr = pos_2d
            .get_attribute(VertexAttributeSemantic::Position)
            .unwrap();
        assert_eq!(attr.format, VertexAttributeFormat::Float2);
        assert!(pos_2d.validate().is_ok());
    }
}
