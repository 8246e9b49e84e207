//! Benchmarks for the biquad low-pass.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use primepad::dsp::{Biquad, Oscillator, RenderCtx};

use crate::BLOCK_SIZES;

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");
    let ctx = RenderCtx::new(48_000.0);

    for &size in BLOCK_SIZES {
        let mut input = vec![0.0f32; size];
        Oscillator::sawtooth(220.0).render(&mut input, &ctx);
        let mut buffer = input.clone();

        // Fixed coefficients
        let mut filter = Biquad::lowpass(2_000.0, 2.0, &ctx);
        group.bench_with_input(BenchmarkId::new("fixed", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                filter.render(black_box(&mut buffer));
            })
        });

        // Coefficients recomputed every sample, as under the LFO sweep
        let mut filter = Biquad::lowpass(2_000.0, 2.0, &ctx);
        let mut cutoff = 1_200.0f32;
        group.bench_with_input(BenchmarkId::new("swept", size), &size, |b, _| {
            b.iter(|| {
                for (out, &x) in buffer.iter_mut().zip(&input) {
                    cutoff = if cutoff > 2_800.0 { 1_200.0 } else { cutoff + 1.0 };
                    filter.set_lowpass(cutoff, 2.0, &ctx);
                    *out = filter.tick(x);
                }
                black_box(&buffer);
            })
        });
    }

    group.finish();
}
