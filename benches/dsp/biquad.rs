//! Benchmarks for bandpass biquad design and processing.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use formant_dsp::dsp::biquad::{bandwidth_to_q, BiquadCoeffs, BiquadFilter};

use crate::BLOCK_SIZES;

pub fn bench_biquad(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/biquad");
    let sample_rate = 48_000.0;

    group.bench_function("design", |b| {
        b.iter(|| {
            let q = bandwidth_to_q(black_box(600.0), black_box(60.0), sample_rate);
            BiquadCoeffs::bandpass(black_box(600.0), q, sample_rate)
        })
    });

    for &size in BLOCK_SIZES {
        // Generate a test signal (sawtooth-like ramp)
        let input: Vec<f64> = (0..size)
            .map(|i| (i as f64 / size as f64) * 2.0 - 1.0)
            .collect();

        let q = bandwidth_to_q(600.0, 60.0, sample_rate);
        let mut filter = BiquadFilter::new(BiquadCoeffs::bandpass(600.0, q, sample_rate));
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("bandpass", size), &size, |b, _| {
            b.iter(|| {
                for (out, &x) in buffer.iter_mut().zip(input.iter()) {
                    *out = filter.process(black_box(x));
                }
            })
        });
    }

    group.finish();
}
