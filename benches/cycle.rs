//! Criterion benchmarks for performance-critical hot paths
//!
//! Covers: the row-major peak scan, poll-level aggregation, and the full
//! controller cycle.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use touchtrace::plotter::driver::PlotterPoint;
use touchtrace::sensor::synthetic::press_frame;
use touchtrace::sensor::types::GridDimensions;
use touchtrace::tracking::controller::MotionController;
use touchtrace::tracking::limiter::limit_step;
use touchtrace::tracking::mapper::GridMapper;
use touchtrace::tracking::peak::{find_peak, strongest_peak};

fn dims() -> GridDimensions {
    GridDimensions::new(105, 185)
}

fn make_mapper() -> GridMapper {
    GridMapper::new(dims(), 1.24, 1.22, 230.0, 125.0)
}

// ---------------------------------------------------------------------------
// Peak scan benchmarks
// ---------------------------------------------------------------------------

fn bench_peak_scan(c: &mut Criterion) {
    let frame = press_frame(dims(), 60, 120, 480.0);

    c.bench_function("peak_scan", |b| {
        b.iter(|| find_peak(black_box(&frame)));
    });
}

fn bench_poll_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("poll_aggregation");
    for sub_frames in [1usize, 2, 4, 8] {
        let frames: Vec<_> = (0..sub_frames)
            .map(|i| press_frame(dims(), 20 + i * 9, 30 + i * 15, 200.0 + i as f32 * 50.0))
            .collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(sub_frames),
            &frames,
            |b, frames| {
                b.iter(|| strongest_peak(black_box(frames)));
            },
        );
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// Motion shaping benchmarks
// ---------------------------------------------------------------------------

fn bench_limit_step(c: &mut Criterion) {
    let current = PlotterPoint::new(75.0, 60.0);
    let target = PlotterPoint::new(200.0, 10.0);

    c.bench_function("limit_step", |b| {
        b.iter(|| limit_step(black_box(current), black_box(target), black_box(20.0)));
    });
}

fn bench_controller_cycle(c: &mut Criterion) {
    let frame = press_frame(dims(), 60, 120, 480.0);

    c.bench_function("controller_cycle", |b| {
        let mut controller = MotionController::new(
            make_mapper(),
            20.0,
            100,
            PlotterPoint::new(75.0, 60.0),
        );
        b.iter(|| {
            let peak = find_peak(black_box(&frame));
            black_box(controller.step(peak))
        });
    });
}

criterion_group!(
    benches,
    bench_peak_scan,
    bench_poll_aggregation,
    bench_limit_step,
    bench_controller_cycle
);
criterion_main!(benches);
