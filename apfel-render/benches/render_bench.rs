use criterion::{criterion_group, criterion_main, Criterion};

use apfel_core::{Complex, FrameSnapshot, IterationBudget, Mandelbrot, Viewport};
use apfel_render::{colorize, render_frame, Palette, RenderCancel};

fn bench_reference_frame(c: &mut Criterion) {
    let snapshot = FrameSnapshot {
        viewport: Viewport::default_mandelbrot(800, 800),
        budget: IterationBudget::default(),
    };
    let cancel = RenderCancel::new();

    c.bench_function("reference_frame_800x800", |b| {
        b.iter(|| render_frame(&Mandelbrot, &snapshot, &cancel));
    });
}

fn bench_deep_budget(c: &mut Criterion) {
    let snapshot = FrameSnapshot {
        viewport: Viewport::new(Complex::new(-0.5, 0.0), 1.2, 256, 256).unwrap(),
        budget: IterationBudget::new(1000, 1000.0).unwrap(),
    };
    let cancel = RenderCancel::new();

    c.bench_function("render_256x256_1000iter", |b| {
        b.iter(|| render_frame(&Mandelbrot, &snapshot, &cancel));
    });
}

fn bench_colorize(c: &mut Criterion) {
    let snapshot = FrameSnapshot {
        viewport: Viewport::default_mandelbrot(800, 800),
        budget: IterationBudget::default(),
    };
    let Ok(result) = render_frame(&Mandelbrot, &snapshot, &RenderCancel::new()) else {
        return;
    };
    let palette = Palette::default();

    c.bench_function("colorize_800x800", |b| {
        b.iter(|| colorize(&palette, &result.frame));
    });
}

criterion_group!(benches, bench_reference_frame, bench_deep_budget, bench_colorize);
criterion_main!(benches);
