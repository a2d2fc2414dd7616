//! Benchmarks for frequency-response evaluation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use formant_dsp::dsp::{BiquadCoeffs, FrequencyResponseSampler, ResponseGrid};

pub fn bench_response(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/response");
    let sampler = FrequencyResponseSampler::new(48_000.0);
    let coeffs = BiquadCoeffs::bandpass(1_040.0, 14.0, 48_000.0);

    // One point per pixel column of typical display widths
    for &ticks in &[256usize, 800, 1920] {
        let grid = ResponseGrid::display(ticks);
        let mut out = vec![0.0f32; ticks];
        group.bench_with_input(BenchmarkId::new("curve", ticks), &ticks, |b, _| {
            b.iter(|| {
                sampler.response_into(black_box(&coeffs), -7.0, grid.frequencies(), &mut out);
            })
        });
    }

    group.finish();
}
