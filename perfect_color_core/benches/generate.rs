//! Performance benchmarks for color conversion and candidate sampling
//!
//! Run with: cargo bench --bench generate

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use perfect_color_core::{
    delta_e76, generate_candidate, lab_to_rgb, rgb_to_lab, Rgb, SessionConfig,
};

/// Benchmark the sRGB/CIELAB conversion pair and the distance metric
fn bench_conversions(c: &mut Criterion) {
    let color = Rgb::new(58, 124, 165);
    let lab = rgb_to_lab(color);
    let other = rgb_to_lab(Rgb::new(201, 42, 42));

    c.bench_function("rgb_to_lab", |b| {
        b.iter(|| {
            black_box(rgb_to_lab(black_box(color)));
        });
    });

    c.bench_function("lab_round_trip", |b| {
        b.iter(|| {
            black_box(lab_to_rgb(rgb_to_lab(black_box(color))));
        });
    });

    c.bench_function("delta_e76", |b| {
        b.iter(|| {
            black_box(delta_e76(black_box(lab), black_box(other)));
        });
    });
}

/// Benchmark candidate sampling as the per-round window tightens
fn bench_candidate_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("candidate_generation");
    let config = SessionConfig::default();
    let reference = rgb_to_lab(Rgb::new(128, 128, 128));

    for round in [0usize, 4, 8, 12].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(round), round, |b, round| {
            let mut rng = StdRng::seed_from_u64(42);
            b.iter(|| {
                black_box(generate_candidate(reference, *round, &config, &mut rng));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_conversions, bench_candidate_generation);
criterion_main!(benches);
