//! GPU mesh types and mesh tools.
//!
//! This module provides the GPU-side [`Mesh`] descriptor and tools that
//! build ready-to-draw meshes, such as [`full_screen_triangle`].
//!
//! CPU-side types ([`CpuMesh`], [`VertexLayout`], ...) are re-exported from
//! `cinnabar-core` for convenience.

mod data;
mod full_screen;

pub use data::{Mesh, MeshBuffers};
pub use full_screen::{
    full_screen_triangle, full_screen_triangle_current, FULL_SCREEN_TRIANGLE_POSITIONS,
};

// Re-export CPU-side types from core
pub use cinnabar_core::mesh::{
    CpuMesh, IndexFormat, MeshDescriptor, PrimitiveTopology, VertexAttribute,
    VertexAttributeFormat, VertexAttributeSemantic, VertexBufferLayout, VertexLayout,
};
