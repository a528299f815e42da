// Copyright 2026 the Lodestone Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Metric-prefix formatting for world-space magnitudes (meters).

use alloc::format;
use alloc::string::String;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// Prefix ladder from 1e-24 up, one entry per three orders of magnitude.
const PREFIXED_UNITS: [&str; 10] = [
    "ym", // 1e-24
    "zm", "am", "fm", "pm", "nm", "μm", "mm", "m", "km",
];

/// Formats a magnitude in meters, picking a unit from `order`, the base-10
/// order of magnitude of the scale spacing the value belongs to.
///
/// Three cases override the regular prefix ladder:
///
/// - Orders outside `[-24, 7]` fall back to scientific notation.
/// - Orders above 3 are expressed in kilometers.
/// - Orders −1 and −2 are expressed in centimeters rather than the nearest
///   ladder step.
///
/// Magnitudes round to whole numbers in the chosen unit, e.g. `5000` at
/// order 3 becomes `"5 km"`.
#[must_use]
pub fn format_meters(value: f64, order: i32) -> String {
    if !(-24..=7).contains(&order) {
        format!("{value:e} m")
    } else if order > 3 {
        format!("{} km", (value * 1e-3).round())
    } else if order == -1 || order == -2 {
        format!("{} cm", (value * 100.0).round())
    } else {
        // Non-negative by the range check above, so integer division is a
        // floor.
        let unit = ((order + 24) / 3) as usize;
        let multiplier = 10_f64.powi(-(unit as i32 - 8) * 3);
        format!("{} {}", (value * multiplier).round(), PREFIXED_UNITS[unit])
    }
}
