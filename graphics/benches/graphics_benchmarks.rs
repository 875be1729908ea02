use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use cinnabar_core::mesh::generators::crosshair_3d;
use cinnabar_graphics::mesh::full_screen_triangle;
use cinnabar_graphics::{
    BufferDescriptor, BufferUsage, DeviceCapabilities, FeatureTier, GraphicsDevice,
    GraphicsInstance,
};

fn create_device(tier: FeatureTier) -> Arc<GraphicsDevice> {
    let instance = GraphicsInstance::new().unwrap();
    instance
        .create_device_with_capabilities(DeviceCapabilities {
            tier,
            ..DeviceCapabilities::default()
        })
        .unwrap()
}

// ---------------------------------------------------------------------------
// Full-screen triangle
// ---------------------------------------------------------------------------

fn bench_full_screen_triangle_legacy(c: &mut Criterion) {
    let device = create_device(FeatureTier::LegacyAttributes);
    c.bench_function("full_screen_triangle_legacy", |b| {
        b.iter(|| {
            black_box(full_screen_triangle(&device, FeatureTier::LegacyAttributes).unwrap())
        });
    });
}

fn bench_full_screen_triangle_modern(c: &mut Criterion) {
    let device = create_device(FeatureTier::Compute);
    c.bench_function("full_screen_triangle_modern", |b| {
        b.iter(|| black_box(full_screen_triangle(&device, FeatureTier::Compute).unwrap()));
    });
}

// ---------------------------------------------------------------------------
// Resource creation and upload
// ---------------------------------------------------------------------------

fn bench_buffer_create_and_write(c: &mut Criterion) {
    let device = create_device(FeatureTier::Compute);
    let data = vec![0xA5u8; 4096];
    c.bench_function("buffer_create_write_4k", |b| {
        b.iter(|| {
            let buffer = device
                .create_buffer(&BufferDescriptor::new(
                    4096,
                    BufferUsage::STORAGE | BufferUsage::COPY_DST,
                ))
                .unwrap();
            buffer.write(0, &data).unwrap();
            black_box(buffer);
        });
    });
}

fn bench_mesh_from_cpu(c: &mut Criterion) {
    let device = create_device(FeatureTier::Compute);
    let crosshair = crosshair_3d();
    c.bench_function("create_mesh_from_cpu_crosshair", |b| {
        b.iter(|| black_box(device.create_mesh_from_cpu(&crosshair).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_full_screen_triangle_legacy,
    bench_full_screen_triangle_modern,
    bench_buffer_create_and_write,
    bench_mesh_from_cpu
);
criterion_main!(benches);
