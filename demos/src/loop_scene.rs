// Copyright 2026 the Lodestone Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless tour of the viewer: a planet-sized current loop, a resize, a
//! scripted drag, and a summary of what got painted.
//!
//! Run with `cargo run -p lodestone_demos --bin loop_scene`.

use kurbo::{Point, Rect};
use lodestone_camera::ViewState;
use lodestone_field::Polyline;
use lodestone_interact::DragPoint;
use lodestone_paint_ref::{PaintOp, RefPaint};
use lodestone_pointer::RawPointerEvent;
use lodestone_render::RenderMode;
use lodestone_viewer::{FieldViewer, Scene};

fn op_name(op: &PaintOp) -> &'static str {
    match op {
        PaintOp::Resize { .. } => "resize",
        PaintOp::Clear => "clear",
        PaintOp::BlitRgb { .. } => "blit",
        PaintOp::StrokePolyline { .. } => "stroke",
        PaintOp::FillCircle { .. } => "circle",
        PaintOp::FillText { .. } => "text",
    }
}

fn summarize(viewer: &FieldViewer<RefPaint>, label: &str) {
    viewer.surface().with_backend(|paint| {
        let mut counts = std::collections::BTreeMap::new();
        for op in paint.ops() {
            *counts.entry(op_name(op)).or_insert(0_u32) += 1;
        }
        let (w, h) = paint.size();
        println!("[{label}] {w}x{h}, ops: {counts:?}");
        if let Some(center) = paint.pixel_at(w / 2, h / 2) {
            println!("[{label}] center pixel: {center:?}");
        }
    });
}

fn main() {
    // The stock scene: a current loop the size of Earth, one gigaampere,
    // viewed seven radii across.
    let r = 6371e3;
    let scene = Scene {
        view: ViewState::new(Point::ZERO, r * 7.0),
        curve: Some(Polyline::circle(Point::ZERO, r, 1000)),
        current: 1e9,
        ..Scene::default()
    };

    let entities = vec![
        DragPoint::new(Point::new(64.0, 24.0)),
        DragPoint::new(Point::new(32.0, 60.0)),
        DragPoint::new(Point::new(80.0, 84.0)),
    ];

    let viewer = FieldViewer::new(RefPaint::new(), scene, entities);

    // First layout pass: the container reports its box, the viewer paints.
    viewer.update_size(Rect::new(0.0, 0.0, 160.0, 120.0));
    summarize(&viewer, "first frame");

    // Interactive hosts usually drop to curve-only rendering mid-drag.
    viewer.configure(|scene| scene.mode = RenderMode::CurveOnly);

    // A scripted drag of the first control point.
    viewer.dispatch(RawPointerEvent::PrimaryDown {
        page: Point::new(66.0, 22.0),
    });
    viewer.dispatch(RawPointerEvent::PrimaryMove {
        page: Point::new(90.0, 40.0),
    });
    viewer.dispatch(RawPointerEvent::PrimaryUp {
        page: Point::new(90.0, 40.0),
    });

    viewer.configure(|scene| scene.mode = RenderMode::FullField);
    viewer.render();
    summarize(&viewer, "after drag");

    let moved = viewer.controller().entities()[0].position;
    println!("control point now at ({}, {})", moved.x, moved.y);
}
