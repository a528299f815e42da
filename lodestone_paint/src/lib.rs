// Copyright 2026 the Lodestone Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lodestone Paint: the backend-agnostic drawing seam.
//!
//! The rendering surface itself is an external collaborator of the viewer:
//! Lodestone never rasterizes strokes or text on its own. [`PaintBackend`]
//! is the narrow contract it draws through: a clear, a full-frame pixel
//! write, polyline strokes, filled dots, and text. The field renderer, the
//! scale bar, and the draggable entities are the only consumers.
//!
//! Backends are expected to be cheap to resize and to treat a zero-sized
//! target as valid: draw calls against it are no-ops, not errors.
//!
//! A reference implementation that records operations and keeps the last
//! blitted pixel buffer readable lives in `lodestone_paint_ref`; real hosts
//! implement this trait over whatever raster API they own.

#![no_std]

use kurbo::Point;
/// Color type used throughout the drawing seam.
pub use peniko::Color;

/// A 2D raster drawing target.
///
/// Coordinates are surface pixels, `y` growing downward. Implementations
/// must tolerate zero-sized targets (every call becomes a no-op) and
/// out-of-bounds geometry (clipped, not rejected).
pub trait PaintBackend {
    /// Resizes the target to `width × height` pixels, discarding contents.
    fn resize(&mut self, width: u32, height: u32);

    /// Clears the whole target to the backend's background.
    fn clear(&mut self);

    /// Writes a full frame of tightly packed row-major RGB triples.
    ///
    /// `pixels.len()` must be `width * height * 3`; a frame whose dimensions
    /// do not match the current target size may be clipped or dropped at the
    /// backend's discretion.
    fn blit_rgb(&mut self, width: u32, height: u32, pixels: &[u8]);

    /// Strokes a polyline through `points`, closing it back to the first
    /// point when `closed` is set.
    fn stroke_polyline(&mut self, points: &[Point], closed: bool, color: Color, width: f64);

    /// Fills a circle, used for control-point dots.
    fn fill_circle(&mut self, center: Point, radius: f64, color: Color);

    /// Draws `text` with its anchor at `at`.
    fn fill_text(&mut self, text: &str, at: Point, color: Color);
}
