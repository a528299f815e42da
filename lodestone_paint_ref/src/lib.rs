// Copyright 2026 the Lodestone Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lodestone Paint Reference Backend.
//!
//! A small, stateful implementation of
//! [`PaintBackend`] for tests and headless runs. It keeps two things:
//!
//! - An **op log**: every draw call is recorded as a [`PaintOp`] in order,
//!   so tests can assert on what was drawn and in which sequence.
//! - The **last blitted frame**: full-frame RGB writes are retained and
//!   readable through [`RefPaint::pixel_at`], which is what the
//!   identical-pixel-buffer regression tests compare.
//!
//! It is intentionally not a rasterizer: strokes, circles, and text are
//! logged, not drawn. Only `blit_rgb` produces pixels.

#![no_std]

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;
use lodestone_paint::PaintBackend;
use peniko::Color;

/// One recorded drawing operation.
#[derive(Clone, Debug, PartialEq)]
pub enum PaintOp {
    /// Target resized.
    Resize {
        /// New width in pixels.
        width: u32,
        /// New height in pixels.
        height: u32,
    },
    /// Target cleared.
    Clear,
    /// Full-frame RGB write.
    BlitRgb {
        /// Frame width in pixels.
        width: u32,
        /// Frame height in pixels.
        height: u32,
    },
    /// Polyline stroke.
    StrokePolyline {
        /// Stroked points in order.
        points: Vec<Point>,
        /// Whether the polyline closes back to its first point.
        closed: bool,
        /// Stroke color.
        color: Color,
        /// Stroke width in pixels.
        width: f64,
    },
    /// Filled circle.
    FillCircle {
        /// Circle center.
        center: Point,
        /// Circle radius in pixels.
        radius: f64,
        /// Fill color.
        color: Color,
    },
    /// Text draw.
    FillText {
        /// The text drawn.
        text: String,
        /// Anchor position.
        at: Point,
        /// Text color.
        color: Color,
    },
}

/// Recording reference backend with a readable pixel buffer.
#[derive(Clone, Debug, Default)]
pub struct RefPaint {
    width: u32,
    height: u32,
    /// Tightly packed row-major RGB, `width * height * 3` bytes.
    pixels: Vec<u8>,
    ops: Vec<PaintOp>,
}

impl RefPaint {
    /// Creates an empty zero-sized backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current target size in pixels.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Recorded operations in application order.
    #[must_use]
    pub fn ops(&self) -> &[PaintOp] {
        &self.ops
    }

    /// Drops the op log but keeps the target size and pixels.
    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// The last blitted frame, tightly packed row-major RGB.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Reads one pixel of the last blitted frame.
    ///
    /// Returns `None` outside the target, including for a zero-sized
    /// target.
    #[must_use]
    pub fn pixel_at(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y * self.width + x) * 3) as usize;
        let px = self.pixels.get(idx..idx + 3)?;
        Some([px[0], px[1], px[2]])
    }
}

impl PaintBackend for RefPaint {
    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels
            .resize((width as usize) * (height as usize) * 3, 0xFF);
        self.ops.push(PaintOp::Resize { width, height });
    }

    fn clear(&mut self) {
        self.pixels.fill(0xFF);
        self.ops.push(PaintOp::Clear);
    }

    fn blit_rgb(&mut self, width: u32, height: u32, pixels: &[u8]) {
        if width == self.width && height == self.height {
            let len = (width as usize) * (height as usize) * 3;
            if pixels.len() == len {
                self.pixels.copy_from_slice(pixels);
            }
        }
        self.ops.push(PaintOp::BlitRgb { width, height });
    }

    fn stroke_polyline(&mut self, points: &[Point], closed: bool, color: Color, width: f64) {
        self.ops.push(PaintOp::StrokePolyline {
            points: points.to_vec(),
            closed,
            color,
            width,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        self.ops.push(PaintOp::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn fill_text(&mut self, text: &str, at: Point, color: Color) {
        self.ops.push(PaintOp::FillText {
            text: String::from(text),
            at,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn resize_then_blit_makes_pixels_readable() {
        let mut paint = RefPaint::new();
        paint.resize(2, 1);

        paint.blit_rgb(2, 1, &[1, 2, 3, 4, 5, 6]);

        assert_eq!(paint.pixel_at(0, 0), Some([1, 2, 3]));
        assert_eq!(paint.pixel_at(1, 0), Some([4, 5, 6]));
        assert_eq!(paint.pixel_at(2, 0), None);
        assert_eq!(paint.pixel_at(0, 1), None);
    }

    #[test]
    fn mismatched_blit_is_logged_but_dropped() {
        let mut paint = RefPaint::new();
        paint.resize(2, 2);
        let before = paint.pixels().to_vec();

        paint.blit_rgb(3, 3, &[0; 27]);

        assert_eq!(paint.pixels(), &before[..]);
        assert_eq!(
            paint.ops().last(),
            Some(&PaintOp::BlitRgb {
                width: 3,
                height: 3
            })
        );
    }

    #[test]
    fn zero_sized_target_accepts_draws_as_no_ops() {
        let mut paint = RefPaint::new();
        paint.resize(0, 0);
        paint.clear();
        paint.stroke_polyline(&[Point::ZERO], false, Color::BLACK, 1.0);

        assert_eq!(paint.pixel_at(0, 0), None);
        assert_eq!(paint.ops().len(), 3);
    }

    #[test]
    fn ops_preserve_application_order() {
        let mut paint = RefPaint::new();
        paint.resize(1, 1);
        paint.clear();
        paint.fill_text("0 m", Point::new(20.0, 7.0), Color::BLACK);

        let kinds: Vec<_> = paint
            .ops()
            .iter()
            .map(|op| match op {
                PaintOp::Resize { .. } => "resize",
                PaintOp::Clear => "clear",
                PaintOp::FillText { .. } => "text",
                _ => "other",
            })
            .collect();
        assert_eq!(kinds, vec!["resize", "clear", "text"]);
    }
}
