//! Full-screen triangle mesh for post-processing passes.
//!
//! A single triangle that covers the whole `(-1,-1)-(1,1)` viewport beats
//! a two-triangle quad: there is no shared diagonal, so no fragment near
//! that edge is shaded twice and no seam can appear.
//!
//! ```text
//!  1 +-----+----
//!    |     |   \
//!    | view|     \
//! -1 +-----+       \
//!    |                \
//! -3 +------------------
//!   -1     1           3
//! ```

use std::sync::Arc;

use cinnabar_core::mesh::{MeshDescriptor, PrimitiveTopology, VertexLayout};

use crate::device::{FeatureTier, GraphicsDevice};
use crate::error::GraphicsError;
use crate::mesh::Mesh;
use crate::resources::Buffer;
use crate::types::{BufferDescriptor, BufferUsage};

/// The three clip-space positions of the full-screen triangle, in order.
///
/// Invariant across capability tiers: the legacy path uploads them as
/// attribute data, the modern path re-derives them in the vertex stage.
pub const FULL_SCREEN_TRIANGLE_POSITIONS: [[f32; 2]; 3] = [[-1.0, 1.0], [-1.0, -3.0], [3.0, 1.0]];

/// Create a full-screen triangle mesh.
///
/// Returns a pre-configured mesh along with, on legacy tiers, the vertex
/// buffer backing it. The mesh is a single triangle whose intersection
/// with the viewport is exactly the full screen square, providing only
/// vertex positions; anything else (texture coordinates and the like) can
/// be computed from them.
///
/// Behavior branches on `tier`:
///
/// - Without vertex-id draws (GL 2.1 / ES 2.0 class): the positions are
///   uploaded to a new buffer and bound as tightly packed `Float2`
///   attribute data on slot 0. The buffer is returned and owned by the
///   caller; the mesh references it weakly, so the caller keeps the
///   handle alive for as long as the mesh is drawn.
/// - With vertex-id draws: the mesh is attribute-less and no buffer is
///   created. The vertex stage derives the positions from the built-in
///   vertex index:
///
/// ```wgsl
/// @vertex
/// fn fullscreen_vs(@builtin(vertex_index) i: u32) -> @builtin(position) vec4f {
///     let x = select(-1.0, 3.0, i == 2u);
///     let y = select(1.0, -3.0, i == 1u);
///     return vec4f(x, y, 0.0, 1.0);
/// }
/// ```
///
/// # Errors
///
/// Propagates buffer allocation or upload failures from the device.
pub fn full_screen_triangle(
    device: &Arc<GraphicsDevice>,
    tier: FeatureTier,
) -> Result<(Option<Arc<Buffer>>, Mesh), GraphicsError> {
    if tier.supports_vertex_id_draws() {
        let descriptor = MeshDescriptor::attribute_less(PrimitiveTopology::TriangleList, 3)
            .with_label("full_screen_triangle");
        let mesh = device.create_mesh(&descriptor, &[], None)?;
        return Ok((None, mesh));
    }

    let bytes: &[u8] = bytemuck::cast_slice(&FULL_SCREEN_TRIANGLE_POSITIONS);
    let buffer = device.create_buffer(
        &BufferDescriptor::new(bytes.len() as u64, BufferUsage::VERTEX | BufferUsage::COPY_DST)
            .with_label("full_screen_triangle"),
    )?;
    buffer.write(0, bytes)?;

    let descriptor = MeshDescriptor::new(VertexLayout::position_2d_only())
        .with_vertex_count(3)
        .with_label("full_screen_triangle");
    let mesh = device.create_mesh(&descriptor, std::slice::from_ref(&buffer), None)?;

    Ok((Some(buffer), mesh))
}

/// Create a full-screen triangle mesh on the current device.
///
/// Resolves the process-wide current device registered via
/// [`GraphicsDevice::make_current`] and uses its reported capability tier —
/// a side-effecting read of process-wide state, unlike the pure
/// [`full_screen_triangle`] which computes from its parameters alone.
///
/// # Errors
///
/// Returns [`GraphicsError::NoCurrentDevice`] if no device is current, and
/// otherwise propagates errors from [`full_screen_triangle`].
pub fn full_screen_triangle_current() -> Result<(Option<Arc<Buffer>>, Mesh), GraphicsError> {
    let device = GraphicsDevice::current().ok_or(GraphicsError::NoCurrentDevice)?;
    let tier = device.capabilities().tier;
    full_screen_triangle(&device, tier)
}
