//! Benchmarks for the full bank under articulation changes.
//!
//! A UI drag calls a setter once per frame and the audio thread renders
//! blocks in between; these cases measure each half and the realtime handoff.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use formant_dsp::{
    dsp::ResponseGrid,
    formant::{FormantDesign, FormantTable},
    realtime::formant_channel,
    FormantFilterBank,
};

use crate::BLOCK_SIZES;

pub fn bench_articulation(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/articulation");
    let sample_rate = 48_000.0;

    // === CONTROL PATH ===
    // Redesign all branches, without and with cached display curves
    let mut bank = FormantFilterBank::new(sample_rate).unwrap();
    let mut step = 0u32;
    group.bench_function("set_articulation", |b| {
        b.iter(|| {
            step = step.wrapping_add(1);
            let t = (step % 100) as f32 / 100.0;
            bank.set_articulation(black_box(t), black_box(1.0 - t));
        })
    });

    let mut displayed = FormantFilterBank::new(sample_rate)
        .unwrap()
        .with_response_grid(ResponseGrid::display(800));
    group.bench_function("set_articulation_with_curves", |b| {
        b.iter(|| {
            step = step.wrapping_add(1);
            let t = (step % 100) as f32 / 100.0;
            displayed.set_articulation(black_box(t), black_box(1.0 - t));
        })
    });

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();
        let mut buffer = input.clone();

        // === AUDIO PATH ===
        let mut bank = FormantFilterBank::new(sample_rate).unwrap();
        group.bench_with_input(BenchmarkId::new("render", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                bank.render(black_box(&mut buffer));
            })
        });

        // === REALTIME HANDOFF ===
        // One control update per block, drained by the processor
        let design = FormantDesign::new(FormantTable::bass(), sample_rate).unwrap();
        let (mut controller, mut processor) = formant_channel(design, 4);
        let mut step = 0u32;
        group.bench_with_input(BenchmarkId::new("channel", size), &size, |b, _| {
            b.iter(|| {
                step = step.wrapping_add(1);
                let t = (step % 100) as f32 / 100.0;
                let _ = controller.set_articulation(t, 0.5);
                buffer.copy_from_slice(&input);
                processor.render(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
