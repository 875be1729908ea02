//! CPU-side mesh types and generators.
//!
//! This module provides GPU-agnostic mesh data structures:
//!
//! - [`VertexLayout`] - Describes vertex attributes across one or more buffers
//! - [`CpuMesh`] - CPU-side mesh data (vertex bytes, index bytes, layout)
//! - [`MeshDescriptor`] - Descriptor for creating GPU meshes
//! - Generators for debug primitives (crosshair)
//!
//! These types are re-exported by `cinnabar-graphics` for convenience.

mod data;
pub mod generators;
mod layout;

pub use data::{CpuMesh, IndexFormat, MeshDescriptor, PrimitiveTopology};
pub use layout::{
    VertexAttribute, VertexAttributeFormat, VertexAttributeSemantic, VertexBufferLayout,
    VertexLayout,
};
