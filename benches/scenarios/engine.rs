//! Benchmarks for full engine blocks.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use primepad::{EngineConfig, SynthEngine};

use crate::BLOCK_SIZES;

fn engine_with_pads(filter: bool) -> SynthEngine {
    let config = EngineConfig::default().with_filter(filter);
    let mut engine = SynthEngine::new(&config).expect("default config is valid");
    // One pad per voice, all three sounding
    for pad in [0, 4, 8] {
        engine.trigger_harmonic(pad, true).expect("pad exists");
    }
    engine
}

pub fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/engine");

    for &size in BLOCK_SIZES {
        let mut left = vec![0.0f32; size];
        let mut right = vec![0.0f32; size];

        let mut engine = engine_with_pads(false);
        group.bench_with_input(BenchmarkId::new("three_voices", size), &size, |b, _| {
            b.iter(|| {
                engine.render(black_box(&mut left), black_box(&mut right));
            })
        });

        // Filter in the path
        let mut engine = engine_with_pads(true);
        group.bench_with_input(BenchmarkId::new("three_voices_filtered", size), &size, |b, _| {
            b.iter(|| {
                engine.render(black_box(&mut left), black_box(&mut right));
            })
        });
    }

    group.finish();
}
