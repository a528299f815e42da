// Copyright 2026 the Lodestone Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lodestone Interact: draggable control points over a pointer stream.
//!
//! A [`DragController`] owns a set of [`DragPoint`] entities and listens to
//! a `lodestone_pointer` event stream:
//!
//! - On every move (outside a drag) it hit-tests the entities in their
//!   fixed priority order and tracks hover transitions, firing at most one
//!   leave and one enter per change.
//! - On press, the first entity hit opens a [`DragSession`]: the entity
//!   snaps to the press position, scoped move/release listeners are
//!   subscribed, and a suppression flag makes the controller's own generic
//!   listeners ignore events for the duration. No second drag can start
//!   and no other entity changes state until release.
//! - On release, the session removes both scoped listeners (including the
//!   one currently executing) and clears the flag.
//!
//! A drag ends only on an explicit release event; there is no timeout. A
//! repaint request fires through [`DragController::on_repaint`] after every
//! state change that affects visual output.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod controller;
mod entity;

pub use controller::{DragController, DragSession};
pub use entity::{DragPoint, EntityFlags};
