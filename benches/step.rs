//! Lattice updates per second for full steps and for each stage.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lbm_d2q9::{scene, BoundaryMask, LatticeDims, OscillatingSource, Params, Physics};

fn physics(size: usize) -> Physics {
    let dims = LatticeDims::new(size, size).unwrap();
    let params = Params::new(1.0, 0.8).unwrap();
    let mut physics = Physics::new(dims, params, OscillatingSource::default()).unwrap();
    let mut mask = BoundaryMask::open(size, size);
    let center = cgmath::Vector2::new(size as f32 / 3.0, size as f32 / 2.0);
    scene::paint_circle(&mut mask, center, size as f32 / 10.0);
    physics.set_boundary(mask);
    physics
}

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");
    for size in [64, 256, 400] {
        group.throughput(Throughput::Elements((size * size) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut physics = physics(size);
            let mut t = 0.0;
            b.iter(|| {
                physics.step(black_box(t));
                t += 1.0 / 60.0;
            });
        });
    }
    group.finish();
}

fn bench_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("stages");
    let size = 256;
    group.throughput(Throughput::Elements((size * size) as u64));
    let mut physics = physics(size);
    physics.compute_macroscopic(0.0);

    group.bench_function("macroscopic", |b| b.iter(|| physics.compute_macroscopic(black_box(0.5))));
    group.bench_function("collide", |b| b.iter(|| physics.collide()));
    group.bench_function("stream", |b| b.iter(|| physics.stream()));
    group.finish();
}

criterion_group!(benches, bench_step, bench_stages);
criterion_main!(benches);
