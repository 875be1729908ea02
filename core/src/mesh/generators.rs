//! Generators for debug primitives.
//!
//! These generators produce [`CpuMesh`] values that can be uploaded to the
//! GPU via `GraphicsDevice::create_mesh_from_cpu`.

use super::data::{CpuMesh, PrimitiveTopology};
use super::layout::VertexLayout;

/// Generate a 2D crosshair.
///
/// Two axis-aligned line segments crossing at the origin, each spanning
/// one unit on both sides of it. Non-indexed line list with 4 vertices,
/// tightly packed `Float2` positions.
pub fn crosshair_2d() -> CpuMesh {
    let positions: [[f32; 2]; 4] = [
        [-1.0, 0.0],
        [1.0, 0.0], // X axis
        [0.0, -1.0],
        [0.0, 1.0], // Y axis
    ];

    CpuMesh::new(VertexLayout::position_2d_only())
        .with_vertex_data(0, bytemuck::cast_slice(&positions).to_vec())
        .with_topology(PrimitiveTopology::LineList)
        .with_label("crosshair_2d")
}

/// Generate a 3D crosshair.
///
/// Three axis-aligned line segments crossing at the origin, one per axis,
/// each spanning one unit on both sides of it. Non-indexed line list with
/// 6 vertices, tightly packed `Float3` positions.
pub fn crosshair_3d() -> CpuMesh {
    let positions: [[f32; 3]; 6] = [
        [-1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0], // X axis
        [0.0, -1.0, 0.0],
        [0.0, 1.0, 0.0], // Y axis
        [0.0, 0.0, -1.0],
        [0.0, 0.0, 1.0], // Z axis
    ];

    CpuMesh::new(VertexLayout::position_only())
        .with_vertex_data(0, bytemuck::cast_slice(&positions).to_vec())
        .with_topology(PrimitiveTopology::LineList)
        .with_label("crosshair_3d")
}
