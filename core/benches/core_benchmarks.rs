use criterion::{black_box, criterion_group, criterion_main, Criterion};

use cinnabar_core::mesh::generators::{crosshair_2d, crosshair_3d};
use cinnabar_core::mesh::{
    VertexAttribute, VertexAttributeFormat, VertexAttributeSemantic, VertexBufferLayout,
    VertexLayout,
};

// ---------------------------------------------------------------------------
// Primitive generation
// ---------------------------------------------------------------------------

fn bench_crosshair_2d(c: &mut Criterion) {
    c.bench_function("crosshair_2d", |b| {
        b.iter(|| black_box(crosshair_2d()));
    });
}

fn bench_crosshair_3d(c: &mut Criterion) {
    c.bench_function("crosshair_3d", |b| {
        b.iter(|| black_box(crosshair_3d()));
    });
}

fn bench_crosshair_decode(c: &mut Criterion) {
    let crosshair = crosshair_3d();
    c.bench_function("crosshair_3d_decode_positions", |b| {
        b.iter(|| black_box(crosshair.positions_3d()));
    });
}

// ---------------------------------------------------------------------------
// Vertex layout construction
// ---------------------------------------------------------------------------

fn bench_layout_build(c: &mut Criterion) {
    c.bench_function("vertex_layout_build_and_validate", |b| {
        b.iter(|| {
            let layout = VertexLayout::new()
                .with_buffer(VertexBufferLayout::new(20))
                .with_attribute(VertexAttribute::position(0))
                .with_attribute(VertexAttribute::new(
                    VertexAttributeSemantic::TexCoord0,
                    VertexAttributeFormat::Float2,
                    12,
                    0,
                ));
            black_box(layout.validate().is_ok());
        });
    });
}

criterion_group!(
    benches,
    bench_crosshair_2d,
    bench_crosshair_3d,
    bench_crosshair_decode,
    bench_layout_build
);
criterion_main!(benches);
