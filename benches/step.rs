//! Benchmarks for the CPU-side field step and the O(n²) connection pass.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use driftfield::prelude::*;

const WIDTH: f32 = 1280.0;
const HEIGHT: f32 = 720.0;

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");

    group.bench_function("particles_idle", |b| {
        let mut field = ParticleField::new(ParticleFieldConfig::default(), WIDTH, HEIGHT);
        let pointer = PointerState::inactive();
        b.iter(|| field.step(black_box(&pointer)))
    });

    group.bench_function("particles_pointer", |b| {
        let mut field = ParticleField::new(ParticleFieldConfig::default(), WIDTH, HEIGHT);
        let pointer = PointerState::at(WIDTH / 2.0, HEIGHT / 2.0);
        b.iter(|| field.step(black_box(&pointer)))
    });

    group.bench_function("neurons_idle", |b| {
        let mut field = NeuronField::new(NeuronFieldConfig::default(), WIDTH, HEIGHT);
        let pointer = PointerState::inactive();
        b.iter(|| field.step(black_box(&pointer)))
    });

    group.bench_function("neurons_pointer", |b| {
        let mut field = NeuronField::new(NeuronFieldConfig::default(), WIDTH, HEIGHT);
        let pointer = PointerState::at(WIDTH / 2.0, HEIGHT / 2.0);
        b.iter(|| field.step(black_box(&pointer)))
    });

    group.finish();
}

fn bench_connections(c: &mut Criterion) {
    let mut group = c.benchmark_group("connections");

    // The pairwise pass dominates frame cost as counts grow.
    for count in [50, 200, 800] {
        group.bench_with_input(BenchmarkId::new("particles", count), &count, |b, &count| {
            let config = ParticleFieldConfig {
                count,
                ..Default::default()
            };
            let field = ParticleField::new(config, WIDTH, HEIGHT);
            let mut segments = Vec::new();
            b.iter(|| {
                segments.clear();
                field.connections(black_box(&mut segments));
            })
        });
    }

    for count in [80, 200, 800] {
        group.bench_with_input(BenchmarkId::new("neurons", count), &count, |b, &count| {
            let config = NeuronFieldConfig {
                count,
                ..Default::default()
            };
            let field = NeuronField::new(config, WIDTH, HEIGHT);
            let mut segments = Vec::new();
            b.iter(|| {
                segments.clear();
                field.connections(black_box(&mut segments));
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_step, bench_connections);
criterion_main!(benches);
