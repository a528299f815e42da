// Copyright 2026 the Lodestone Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lodestone Field: Biot-Savart line integration over a discretized curve.
//!
//! The magnetic field of a current-carrying path is evaluated by summing
//! the Biot-Savart kernel over the segments of a piecewise-linear
//! [`Polyline`]. Lodestone visualizes a planar scene, so only the
//! out-of-plane component survives: for a segment with directed length `d`
//! and displacement `r` from its midpoint to the query point, the
//! contribution is `I · (d × r) / |r|³`, and the summed total is scaled by
//! `μ0 / 4π`.
//!
//! ```
//! use kurbo::Point;
//! use lodestone_field::{Polyline, field_at};
//!
//! // A unit circular loop carrying 1 A, sampled at 720 segments.
//! let loop_ = Polyline::circle(Point::ZERO, 1.0, 720);
//! let b = field_at(&loop_, 1.0, Point::ZERO);
//!
//! // Closed form at the center of a circular loop: μ0 I / 2r ≈ 6.28e-7 T.
//! assert!((b.abs() - 6.283e-7).abs() < 1e-9);
//! ```
//!
//! Evaluation is a pure function of `(curve, current, query)`; the curve is
//! immutable for the duration of a solve pass.
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod polyline;

pub use polyline::Polyline;

use kurbo::Point;

/// Vacuum permeability, in T·m/A.
pub const MU_0: f64 = 1.256_637_062_12e-6;

/// Out-of-plane magnetic field at `query`, in tesla, for `current` amperes
/// flowing along `curve`.
///
/// Positive values point out of the plane for counterclockwise current in
/// the usual orientation. A curve with fewer than two samples has no
/// segments and yields zero.
///
/// A query point coinciding exactly with a segment midpoint is a
/// singularity of the kernel; that segment's contribution is skipped and
/// integration continues. Discretization makes exact coincidence
/// measure-zero, but floating-point midpoints can still land on it.
#[must_use]
pub fn field_at(curve: &Polyline, current: f64, query: Point) -> f64 {
    let mut sum = 0.0;
    for (a, b) in curve.segments() {
        let d = b - a;
        let mid = a.midpoint(b);
        let r = query - mid;
        let dist = r.hypot();
        if dist == 0.0 {
            continue;
        }
        sum += current * d.cross(r) / (dist * dist * dist);
    }
    MU_0 / (4.0 * core::f64::consts::PI) * sum
}
