// Copyright 2026 the Lodestone Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use kurbo::{Point, Size};

/// What the viewer is looking at: a world-space center and the world span
/// mapped onto the full surface width.
///
/// Invariant: `virtual_width > 0`. The invariant is not enforced on the
/// fields themselves (this is a plain configuration value, mutated freely by
/// the hosting application); it is checked when a [`Projection`] is built.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewState {
    /// World-space point mapped to the surface center.
    pub center: Point,
    /// World-space span mapped onto the full surface width.
    pub virtual_width: f64,
}

impl ViewState {
    /// Creates a view centered on `center` spanning `virtual_width` world
    /// units.
    #[must_use]
    pub fn new(center: Point, virtual_width: f64) -> Self {
        Self {
            center,
            virtual_width,
        }
    }
}

impl Default for ViewState {
    /// Ten world units across, centered on the origin.
    fn default() -> Self {
        Self::new(Point::ZERO, 10.0)
    }
}

/// The view or surface cannot produce a finite transform.
///
/// Raised when `virtual_width` or the surface width is zero, negative, or
/// NaN. Rendering is expected to become a no-op until the state is
/// corrected; nothing here reaches a user-facing error channel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InvalidViewState {
    /// The offending world span.
    pub virtual_width: f64,
    /// The offending surface width in pixels.
    pub surface_width: f64,
}

impl fmt::Display for InvalidViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot project: virtual_width = {}, surface width = {}",
            self.virtual_width, self.surface_width
        )
    }
}

impl core::error::Error for InvalidViewState {}

/// Centered, uniform-scale mapping between world units and surface pixels.
///
/// A `Projection` is a value derived from `(ViewState, Size)`; it is cheap
/// to build and must be rebuilt whenever the view or the surface size
/// changes; nothing here caches across changes.
#[derive(Copy, Clone, Debug)]
pub struct Projection {
    center: Point,
    half: Size,
    unit_size: f64,
    pixel_size: f64,
}

impl Projection {
    /// Builds the transform for `view` over a surface of `size` pixels.
    ///
    /// Fails with [`InvalidViewState`] when either `view.virtual_width` or
    /// `size.width` is not strictly positive (including NaN), since the
    /// mapping would divide by zero.
    pub fn new(view: &ViewState, size: Size) -> Result<Self, InvalidViewState> {
        if !(view.virtual_width > 0.0) || !(size.width > 0.0) {
            return Err(InvalidViewState {
                virtual_width: view.virtual_width,
                surface_width: size.width,
            });
        }
        Ok(Self {
            center: view.center,
            half: Size::new(size.width / 2.0, size.height / 2.0),
            unit_size: size.width / view.virtual_width,
            pixel_size: view.virtual_width / size.width,
        })
    }

    /// Pixels per world unit.
    #[must_use]
    pub fn unit_size(&self) -> f64 {
        self.unit_size
    }

    /// World units per pixel.
    #[must_use]
    pub fn pixel_size(&self) -> f64 {
        self.pixel_size
    }

    /// Maps a world-space point to surface pixels.
    #[must_use]
    pub fn world_to_pixel(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.center.x) * self.unit_size + self.half.width,
            (p.y - self.center.y) * self.unit_size + self.half.height,
        )
    }

    /// Maps a surface-pixel position to world space. Exact inverse of
    /// [`Projection::world_to_pixel`] up to floating-point rounding.
    #[must_use]
    pub fn pixel_to_world(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.half.width) * self.pixel_size + self.center.x,
            (p.y - self.half.height) * self.pixel_size + self.center.y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_within_tolerance() {
        let view = ViewState::new(Point::new(3.0, -2.0), 25.0);
        let proj = Projection::new(&view, Size::new(811.0, 375.0)).unwrap();

        for &(x, y) in &[(0.0, 0.0), (3.0, -2.0), (-120.5, 64.25), (1e-3, 1e3)] {
            let p = Point::new(x, y);
            let back = proj.pixel_to_world(proj.world_to_pixel(p));
            assert!((back.x - p.x).abs() < 1e-9 * (1.0 + p.x.abs()));
            assert!((back.y - p.y).abs() < 1e-9 * (1.0 + p.y.abs()));
        }
    }

    #[test]
    fn center_maps_to_surface_center() {
        let view = ViewState::new(Point::new(5.0, 7.0), 10.0);
        let proj = Projection::new(&view, Size::new(640.0, 480.0)).unwrap();
        assert_eq!(
            proj.world_to_pixel(Point::new(5.0, 7.0)),
            Point::new(320.0, 240.0)
        );
    }

    #[test]
    fn scaling_virtual_width_scales_pixel_size_inversely() {
        let size = Size::new(500.0, 400.0);
        let base = Projection::new(&ViewState::new(Point::ZERO, 10.0), size).unwrap();
        let zoomed = Projection::new(&ViewState::new(Point::ZERO, 30.0), size).unwrap();

        // Tripling the world span triples world-units-per-pixel and cuts
        // pixels-per-unit to a third.
        assert!((zoomed.pixel_size() / base.pixel_size() - 3.0).abs() < 1e-12);
        assert!((base.unit_size() / zoomed.unit_size() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn zero_or_negative_inputs_fail_fast() {
        let size = Size::new(500.0, 400.0);
        assert!(Projection::new(&ViewState::new(Point::ZERO, 0.0), size).is_err());
        assert!(Projection::new(&ViewState::new(Point::ZERO, -1.0), size).is_err());
        assert!(Projection::new(&ViewState::new(Point::ZERO, f64::NAN), size).is_err());
        assert!(Projection::new(&ViewState::default(), Size::new(0.0, 400.0)).is_err());
    }

    #[test]
    fn error_reports_the_offending_values() {
        let err = Projection::new(&ViewState::new(Point::ZERO, -2.0), Size::new(100.0, 50.0))
            .unwrap_err();
        assert_eq!(err.virtual_width, -2.0);
        assert_eq!(err.surface_width, 100.0);
    }
}
