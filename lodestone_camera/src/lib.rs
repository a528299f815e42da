// Copyright 2026 the Lodestone Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lodestone Camera: world/pixel projection and scale-bar planning.
//!
//! Two small, pure models live here:
//!
//! - [`Projection`]: the centered, uniform-scale mapping between world
//!   units and surface pixels, rebuilt from a [`ViewState`] and the current
//!   surface size whenever either changes. Construction fails fast with
//!   [`InvalidViewState`] instead of silently producing NaN.
//! - [`ScaleBar`]: given a minimum on-screen spacing, picks a "nice"
//!   round-number world spacing from the 1-2-5 ladder and plans labeled
//!   ticks, with magnitudes formatted in metric-prefix units
//!   ([`format_meters`]).
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Size};
//! use lodestone_camera::{Projection, ViewState};
//!
//! let view = ViewState::new(Point::ZERO, 10.0);
//! let proj = Projection::new(&view, Size::new(500.0, 300.0)).unwrap();
//!
//! let px = proj.world_to_pixel(Point::new(1.0, 0.0));
//! assert_eq!(px, Point::new(300.0, 150.0));
//! let back = proj.pixel_to_world(px);
//! assert!((back.x - 1.0).abs() < 1e-12);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod projection;
mod scalebar;
mod units;

pub use projection::{InvalidViewState, Projection, ViewState};
pub use scalebar::{ScaleBar, ScalePlan, ScaleTick, nice_spacing, spacing_order};
pub use units::format_meters;
