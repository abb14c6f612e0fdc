//! # Overlay Frame Benchmark
//!
//! Measures one overlay frame the way the game draws it:
//! 1. Every status bar fed a changing value
//! 2. Two faders running
//! 3. A screen full of registered and temporary text lines

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hud_overlay::{
    BarId, CommandRecorder, FadeDirection, FaderId, Overlay, ScreenSize, TextLine,
};

const SCREEN: ScreenSize = ScreenSize::new(1920, 1080);
const DT: f32 = 1.0 / 60.0;

fn overlay_with_lines(count: usize) -> Overlay {
    let mut overlay = Overlay::default();
    for i in 0..count {
        let mut line = TextLine::new(10.0, 18.0 * i as f32, &format!("entity {i:04}"));
        line.show_rect = i % 2 == 0;
        overlay.add_line(line);
    }
    overlay
}

fn bench_full_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("overlay_full_frame");

    for lines in [0usize, 16, 64] {
        let mut overlay = overlay_with_lines(lines);
        let mut recorder = CommandRecorder::new();
        let mut frame = 0u32;

        group.bench_with_input(BenchmarkId::from_parameter(lines), &lines, |b, _| {
            b.iter(|| {
                frame = frame.wrapping_add(1);
                if frame % 120 == 0 {
                    overlay.engage(FaderId::Colored, FadeDirection::In);
                    overlay.engage(FaderId::Black, FadeDirection::Out);
                }
                let t = (frame % 1000) as f32;
                overlay.set_bar_value(BarId::Health, 1000.0 - t);
                overlay.set_bar_value(BarId::Air, t * 1.8);
                overlay.set_bar_value(BarId::Sprint, t % 120.0);
                overlay.set_bar_value(BarId::Freeze, t % 60.0);
                let _ = overlay.out_text_xy(1700.0, 10.0, "fps: 60");

                recorder.begin_frame();
                overlay.render(black_box(SCREEN), black_box(DT), &mut recorder);
                black_box(recorder.commands().len())
            });
        });
    }

    group.finish();
}

fn bench_loading_bar(c: &mut Criterion) {
    let mut overlay = Overlay::default();
    let mut recorder = CommandRecorder::new();
    let mut progress = 0.0f32;

    c.bench_function("overlay_loading_bar", |b| {
        b.iter(|| {
            progress = (progress + 1.0) % 1000.0;
            recorder.begin_frame();
            black_box(overlay.draw_loading_bar(black_box(progress), SCREEN, DT, &mut recorder))
        });
    });
}

fn bench_vertex_upload(c: &mut Criterion) {
    let mut overlay = overlay_with_lines(64);
    let mut recorder = CommandRecorder::new();
    overlay.set_bar_value(BarId::Health, 500.0);
    overlay.engage(FaderId::Death, FadeDirection::In);
    overlay.render(SCREEN, DT, &mut recorder);

    c.bench_function("overlay_vertex_bytes", |b| {
        b.iter(|| black_box(recorder.vertex_bytes().len()));
    });
}

criterion_group!(benches, bench_full_frame, bench_loading_bar, bench_vertex_upload);
criterion_main!(benches);
