// Copyright 2026 the Lodestone Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lodestone Render: paint a field scene onto a raster surface.
//!
//! One render pass covers three layers, in order:
//!
//! 1. **Field raster** (in [`RenderMode::FullField`]): every surface pixel
//!    is converted to world coordinates, the Biot-Savart solver is
//!    evaluated there, and the scalar is mapped to a color through a
//!    [`SigmoidMap`], a red-to-cyan diverging map centered on zero field.
//!    The finished frame is written with one full-frame blit.
//! 2. **Curve overlay**: the current-carrying polyline, stroked in
//!    transform space.
//! 3. **Scale bar**: the planned ticks with their perpendicular marks and
//!    labels.
//!
//! The raster pass is `O(width × height × segments)`: the solver runs per
//! pixel against every curve segment. It dominates everything else in this
//! workspace; [`RenderMode::CurveOnly`] exists so interactive hosts can
//! skip it while dragging, and any future optimization (spatial pruning,
//! caching, downsampling) must keep the sparse-sample colors observable in
//! the tests unchanged.
//!
//! A zero-sized surface renders as a no-op. An invalid view
//! (non-positive `virtual_width`) fails with
//! [`InvalidViewState`](lodestone_camera::InvalidViewState) and leaves the
//! backend untouched; the viewer skips the frame until the state is
//! corrected.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use kurbo::{Point, Size};
use lodestone_camera::{InvalidViewState, Projection, ScaleBar, ViewState};
use lodestone_field::{Polyline, field_at};
use lodestone_paint::PaintBackend;
use peniko::Color;

/// Scale-bar layout constants, in pixels.
const SCALE_MARGIN_LEFT: f64 = 30.0;
const SCALE_MARGIN_BOTTOM: f64 = 30.0;
const SCALE_TICK_HEIGHT: f64 = 20.0;
const SCALE_LABEL_OFFSET: (f64, f64) = (-10.0, -23.0);

/// Scalar-to-color transfer: a sigmoid centered on zero field.
///
/// `sigmoid(v) = 1 / (1 + e^(-(e / scale) · v))`; the resulting channel
/// `floor(sigmoid · 255)` drives an RGB triple `(c, 255-c, 255-c)`, so
/// zero field is neutral gray, positive field leans red and negative leans
/// cyan. `scale` controls how quickly the map saturates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SigmoidMap {
    /// Field magnitude at which the map saturates noticeably.
    pub scale: f64,
}

impl Default for SigmoidMap {
    fn default() -> Self {
        Self { scale: 100.0 }
    }
}

impl SigmoidMap {
    /// The raw sigmoid value in `(0, 1)`.
    #[must_use]
    pub fn sigmoid(&self, value: f64) -> f64 {
        1.0 / (1.0 + (-(core::f64::consts::E / self.scale) * value).exp())
    }

    /// The quantized channel, `floor(sigmoid · 255)`.
    #[must_use]
    pub fn channel(&self, value: f64) -> u8 {
        (self.sigmoid(value) * 255.0) as u8
    }

    /// The RGB triple for a field value.
    #[must_use]
    pub fn rgb(&self, value: f64) -> [u8; 3] {
        let c = self.channel(value);
        [c, 255 - c, 255 - c]
    }
}

/// Whether a pass recomputes the full field raster or only the overlays.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Sample the solver at every pixel, then draw overlays.
    #[default]
    FullField,
    /// Skip the raster; draw the curve and scale bar only.
    CurveOnly,
}

/// Everything one render pass reads.
///
/// These are plain fields, read once per pass; nothing here is validated
/// beyond what [`render`] itself checks.
#[derive(Clone, Debug)]
pub struct FrameParams<'a> {
    /// View center and world span.
    pub view: ViewState,
    /// Surface size in pixels.
    pub size: Size,
    /// The current-carrying curve, if one is configured.
    pub curve: Option<&'a Polyline>,
    /// Current magnitude in amperes.
    pub current: f64,
    /// Scalar-to-color transfer for the field raster.
    pub color_map: SigmoidMap,
    /// Scale-bar configuration.
    pub scale_bar: ScaleBar,
    /// Raster or overlay-only pass.
    pub mode: RenderMode,
    /// Stroke color for the curve overlay.
    pub curve_color: Color,
    /// Stroke and label color for the scale bar.
    pub scale_color: Color,
}

impl<'a> FrameParams<'a> {
    /// Frame parameters for `view` over `size` with defaults everywhere
    /// else: no curve, 1 A, default color map and scale bar, full-field
    /// mode, black overlays.
    #[must_use]
    pub fn new(view: ViewState, size: Size) -> Self {
        Self {
            view,
            size,
            curve: None,
            current: 1.0,
            color_map: SigmoidMap::default(),
            scale_bar: ScaleBar::default(),
            mode: RenderMode::default(),
            curve_color: Color::BLACK,
            scale_color: Color::BLACK,
        }
    }
}

/// Runs one full render pass against `backend`.
///
/// Zero-area surfaces succeed without touching the backend. An invalid
/// view fails before any drawing happens, so a bad frame never partially
/// overwrites a good one. Rendering identical parameters twice produces
/// identical output; no state accumulates across passes.
pub fn render(
    params: &FrameParams<'_>,
    backend: &mut impl PaintBackend,
) -> Result<(), InvalidViewState> {
    let size = params.size;
    if !(size.width > 0.0) || !(size.height > 0.0) {
        return Ok(());
    }
    let proj = Projection::new(&params.view, size)?;

    backend.clear();

    if params.mode == RenderMode::FullField {
        blit_field(params, &proj, backend);
    }
    stroke_curve(params, &proj, backend);
    draw_scale_bar(params, &proj, backend);
    Ok(())
}

/// Samples the solver at every pixel and blits the frame.
///
/// This is the dominant cost of the whole viewer.
fn blit_field(params: &FrameParams<'_>, proj: &Projection, backend: &mut impl PaintBackend) {
    let width = params.size.width as u32;
    let height = params.size.height as u32;
    let mut pixels = Vec::with_capacity((width as usize) * (height as usize) * 3);
    for py in 0..height {
        for px in 0..width {
            let world = proj.pixel_to_world(Point::new(px as f64, py as f64));
            let value = match params.curve {
                Some(curve) => field_at(curve, params.current, world),
                // No curve means a well-defined zero field, not an error.
                None => 0.0,
            };
            pixels.extend_from_slice(&params.color_map.rgb(value));
        }
    }
    backend.blit_rgb(width, height, &pixels);
}

fn stroke_curve(params: &FrameParams<'_>, proj: &Projection, backend: &mut impl PaintBackend) {
    let Some(curve) = params.curve else {
        return;
    };
    let points: Vec<Point> = curve
        .points()
        .iter()
        .map(|&p| proj.world_to_pixel(p))
        .collect();
    backend.stroke_polyline(&points, curve.is_closed(), params.curve_color, 1.0);
}

/// Draws the planned ticks: each tick connects to the previous one along
/// the baseline and carries a perpendicular mark plus its label.
fn draw_scale_bar(params: &FrameParams<'_>, proj: &Projection, backend: &mut impl PaintBackend) {
    let plan = params.scale_bar.plan(proj, params.view.virtual_width);
    let baseline = params.size.height - SCALE_MARGIN_BOTTOM;

    let mut prev: Option<Point> = None;
    for tick in &plan.ticks {
        let at = Point::new(tick.pixel_x + SCALE_MARGIN_LEFT, baseline);
        let top = Point::new(at.x, at.y - SCALE_TICK_HEIGHT);
        let segment: Vec<Point> = match prev {
            Some(prev) => alloc::vec![prev, at, top],
            None => alloc::vec![at, top],
        };
        backend.stroke_polyline(&segment, false, params.scale_color, 1.0);
        backend.fill_text(
            &tick.label,
            Point::new(at.x + SCALE_LABEL_OFFSET.0, at.y + SCALE_LABEL_OFFSET.1),
            params.scale_color,
        );
        prev = Some(at);
    }
}
