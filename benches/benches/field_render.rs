// Copyright 2026 the Lodestone Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size};
use lodestone_camera::ViewState;
use lodestone_field::{Polyline, field_at};
use lodestone_paint_ref::RefPaint;
use lodestone_render::{FrameParams, render};

fn bench_field_at(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_at");
    for segments in [100_usize, 1_000, 10_000] {
        let loop_ = Polyline::circle(Point::ZERO, 6371e3, segments);
        let query = Point::new(1e6, -2e6);
        group.throughput(Throughput::Elements(segments as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(segments),
            &loop_,
            |b, loop_| {
                b.iter(|| field_at(black_box(loop_), black_box(1.0), black_box(query)));
            },
        );
    }
    group.finish();
}

/// The full-frame raster pass is O(width * height * segments); this tracks
/// its cost at a small but representative frame size.
fn bench_full_field_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_full_field");
    let loop_ = Polyline::circle(Point::ZERO, 2.0, 200);
    for (w, h) in [(64.0, 48.0), (128.0, 96.0)] {
        let size = Size::new(w, h);
        let mut params = FrameParams::new(ViewState::new(Point::ZERO, 10.0), size);
        params.curve = Some(&loop_);
        params.current = 1.0;

        let mut paint = RefPaint::new();
        paint.resize(w as u32, h as u32);

        group.throughput(Throughput::Elements((w * h) as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{w}x{h}")),
            &params,
            |b, params| {
                b.iter(|| {
                    render(black_box(params), &mut paint).unwrap();
                    paint.clear_ops();
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_field_at, bench_full_field_render);
criterion_main!(benches);
