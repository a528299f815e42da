// Copyright 2026 the Lodestone Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scale-bar planning: pick a round-number spacing and lay out labeled
//! ticks.

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::projection::Projection;
use crate::units::format_meters;

/// Picks a "nice" spacing close to `target`, from `{1, 2, 5} × 10^k`.
///
/// Each candidate is the smallest multiple of its mantissa whose value is a
/// power-of-ten ceiling of the corresponding fraction of `target`; the
/// candidate closest to `target` by absolute difference wins. The 10×
/// candidate is evaluated first, so ties favor it, and the 5× candidate is
/// only consulted when the 2× candidate did not already win.
#[must_use]
pub fn nice_spacing(target: f64) -> f64 {
    let ten = 10_f64.powf(target.log10().ceil());
    let two = 10_f64.powf((target / 2.0).log10().ceil()) * 2.0;
    let five = 10_f64.powf((target / 5.0).log10().ceil()) * 5.0;

    let mut spacing = ten;
    if (two - target).abs() < (spacing - target).abs() {
        spacing = two;
    } else if (five - target).abs() < (spacing - target).abs() {
        spacing = five;
    }
    spacing
}

/// Base-10 order of magnitude of a chosen spacing.
#[must_use]
pub fn spacing_order(spacing: f64) -> i32 {
    spacing.log10().floor() as i32
}

/// One planned scale tick.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleTick {
    /// World-space offset of this tick from the scale origin.
    pub world: f64,
    /// Pixel x offset of this tick (before any renderer margin).
    pub pixel_x: f64,
    /// Formatted magnitude label.
    pub label: String,
}

/// Scale-bar configuration: how dense ticks may get and how much of the
/// view width the bar may span.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScaleBar {
    /// Minimum on-screen distance between ticks, in pixels.
    pub minimal_spacing_px: f64,
    /// Fraction of `virtual_width` the bar spans (ticks run from zero up to
    /// this fraction, exclusive).
    pub max_ratio: f64,
}

impl Default for ScaleBar {
    fn default() -> Self {
        Self {
            minimal_spacing_px: 50.0,
            max_ratio: 0.5,
        }
    }
}

impl ScaleBar {
    /// Plans the tick sequence for the current projection.
    ///
    /// The chosen world spacing is the [`nice_spacing`] closest to
    /// `minimal_spacing_px` worth of world units; its order of magnitude
    /// drives the unit labels.
    #[must_use]
    pub fn plan(&self, proj: &Projection, virtual_width: f64) -> ScalePlan {
        let target = self.minimal_spacing_px * proj.pixel_size();
        let spacing = nice_spacing(target);
        let order = spacing_order(spacing);

        let mut ticks = Vec::new();
        let limit = virtual_width * self.max_ratio;
        let mut s = 0.0;
        while s < limit {
            ticks.push(ScaleTick {
                world: s,
                pixel_x: s * proj.unit_size(),
                label: format_meters(s, order),
            });
            s += spacing;
        }
        ScalePlan {
            spacing,
            order,
            ticks,
        }
    }
}

/// A planned scale bar: the chosen spacing plus the tick sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct ScalePlan {
    /// Chosen world-space spacing between ticks.
    pub spacing: f64,
    /// Base-10 order of magnitude of the spacing.
    pub order: i32,
    /// Ticks from the scale origin up to the configured span, in order.
    pub ticks: Vec<ScaleTick>,
}
