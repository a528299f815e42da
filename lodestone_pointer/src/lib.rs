// Copyright 2026 the Lodestone Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lodestone Pointer: one subscription contract over heterogeneous raw input.
//!
//! Interactive hosts deliver pointer input on two physically distinct
//! channels: a *primary* channel (mouse-like, every event carries a
//! position) and a *secondary* channel (touch-like, where the contact point
//! disappears on lift-off). This crate folds both into a single stream of
//! logical [`PointerKind`] events carrying one `(x, y)` coordinate pair in
//! surface-pixel space, already corrected for page scroll and container
//! origin.
//!
//! ## Normalization rules
//!
//! - Raw coordinates are page-space; [`PointerFrame`] holds the container
//!   origin and scroll offset, and normalization is
//!   `page - scroll - origin`.
//! - Secondary events without an active contact (after lift-off) reuse the
//!   last known secondary coordinate, so the value stream has no gaps
//!   mid-gesture.
//! - The raw-to-logical channel mapping is a fixed enumerated table
//!   ([`PointerKind::raw_channels`]), not a by-name lookup.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use lodestone_pointer::{PointerEvents, PointerKind, RawPointerEvent};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let events = PointerEvents::new();
//! let last = Rc::new(Cell::new(Point::ZERO));
//!
//! let last2 = last.clone();
//! events.on(PointerKind::Press, move |&p| last2.set(p));
//!
//! events.dispatch(RawPointerEvent::PrimaryDown {
//!     page: Point::new(40.0, 25.0),
//! });
//! assert_eq!(last.get(), Point::new(40.0, 25.0));
//! ```
//!
//! The synthetic `resize` notification of the original subscription surface
//! is *not* a pointer kind: it carries no coordinate and is routed straight
//! to the surface's resize registry (see `lodestone_surface`).
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::rc::Rc;
use core::cell::Cell;

use kurbo::{Point, Vec2};
use lodestone_hooks::{Hook, Hooks};

/// Logical pointer event kinds exposed to subscribers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// The pointer moved.
    Move,
    /// The pointer was pressed (primary button down / contact start).
    Press,
    /// The pointer was released (primary button up / contact end).
    Release,
}

impl PointerKind {
    /// All logical kinds, in a fixed order.
    pub const ALL: [Self; 3] = [Self::Move, Self::Press, Self::Release];

    /// Returns the raw channel pair this logical kind listens to.
    ///
    /// This replaces the original's by-name lookup table with a total
    /// mapping checked at compile time: every logical kind names exactly one
    /// primary and one secondary raw event.
    #[must_use]
    pub const fn raw_channels(self) -> (PrimaryChannel, SecondaryChannel) {
        match self {
            Self::Move => (PrimaryChannel::Move, SecondaryChannel::Move),
            Self::Press => (PrimaryChannel::Down, SecondaryChannel::Start),
            Self::Release => (PrimaryChannel::Up, SecondaryChannel::End),
        }
    }
}

/// Raw event names on the primary (mouse-like) channel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PrimaryChannel {
    /// Button pressed.
    Down,
    /// Pointer moved.
    Move,
    /// Button released.
    Up,
}

/// Raw event names on the secondary (touch-like) channel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SecondaryChannel {
    /// Contact started.
    Start,
    /// Contact moved.
    Move,
    /// Contact ended.
    End,
}

/// A raw input-source event in page coordinates.
///
/// This is the vocabulary the hosting application feeds into
/// [`PointerEvents::dispatch`]. Primary events always carry a position;
/// secondary events may lack one (`contact: None`) once the contact has
/// lifted off.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RawPointerEvent {
    /// Primary channel press.
    PrimaryDown {
        /// Pointer position in page space.
        page: Point,
    },
    /// Primary channel motion.
    PrimaryMove {
        /// Pointer position in page space.
        page: Point,
    },
    /// Primary channel release.
    PrimaryUp {
        /// Pointer position in page space.
        page: Point,
    },
    /// Secondary channel contact start.
    SecondaryStart {
        /// Contact position in page space, if a contact point exists.
        contact: Option<Point>,
    },
    /// Secondary channel contact motion.
    SecondaryMove {
        /// Contact position in page space, if a contact point exists.
        contact: Option<Point>,
    },
    /// Secondary channel contact end. Usually carries no contact point.
    SecondaryEnd {
        /// Contact position in page space, if a contact point exists.
        contact: Option<Point>,
    },
}

/// Where the surface sits on the page: container origin plus scroll offset.
///
/// Normalizing a page-space position into surface-pixel space is
/// `page - scroll - origin`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PointerFrame {
    /// Container origin in page space.
    pub origin: Point,
    /// Page scroll offset.
    pub scroll: Vec2,
}

impl PointerFrame {
    /// Converts a page-space position into surface-pixel space.
    #[must_use]
    pub fn normalize(&self, page: Point) -> Point {
        Point::new(
            page.x - self.scroll.x - self.origin.x,
            page.y - self.scroll.y - self.origin.y,
        )
    }
}

/// Unified pointer event streams, one [`Hooks`] registry per logical kind.
///
/// Cloning shares the registries, the frame, and the last-contact memory;
/// scoped subscriptions (drag sessions) rely on this.
#[derive(Clone, Debug)]
pub struct PointerEvents {
    move_hooks: Hooks<Point>,
    press_hooks: Hooks<Point>,
    release_hooks: Hooks<Point>,
    frame: Rc<Cell<PointerFrame>>,
    last_contact: Rc<Cell<Point>>,
}

impl PointerEvents {
    /// Creates a fresh set of pointer streams with a default (zero) frame.
    #[must_use]
    pub fn new() -> Self {
        Self {
            move_hooks: Hooks::new(),
            press_hooks: Hooks::new(),
            release_hooks: Hooks::new(),
            frame: Rc::new(Cell::new(PointerFrame::default())),
            last_contact: Rc::new(Cell::new(Point::ZERO)),
        }
    }

    /// Returns the registry carrying events of `kind`.
    #[must_use]
    pub fn hooks(&self, kind: PointerKind) -> &Hooks<Point> {
        match kind {
            PointerKind::Move => &self.move_hooks,
            PointerKind::Press => &self.press_hooks,
            PointerKind::Release => &self.release_hooks,
        }
    }

    /// Subscribes `cb` to events of `kind`.
    pub fn on(&self, kind: PointerKind, cb: impl FnMut(&Point) + 'static) -> Hook<Point> {
        self.hooks(kind).add(cb)
    }

    /// Subscribes `cb` to the next event of `kind` only.
    ///
    /// The subscription is removed before `cb` runs; see
    /// [`Hooks::once`].
    pub fn once(&self, kind: PointerKind, cb: impl FnOnce(&Point) + 'static) -> Hook<Point> {
        self.hooks(kind).once(cb)
    }

    /// Returns the current normalization frame.
    #[must_use]
    pub fn frame(&self) -> PointerFrame {
        self.frame.get()
    }

    /// Replaces the normalization frame.
    ///
    /// The surface updates the origin from its container bounding box on
    /// resize; the host updates the scroll offset when the page scrolls.
    pub fn set_frame(&self, frame: PointerFrame) {
        self.frame.set(frame);
    }

    /// Feeds one raw event in, triggering the matching logical stream with
    /// the normalized surface-pixel coordinate.
    pub fn dispatch(&self, raw: RawPointerEvent) {
        let (kind, page) = match raw {
            RawPointerEvent::PrimaryDown { page } => (PointerKind::Press, page),
            RawPointerEvent::PrimaryMove { page } => (PointerKind::Move, page),
            RawPointerEvent::PrimaryUp { page } => (PointerKind::Release, page),
            RawPointerEvent::SecondaryStart { contact } => {
                (PointerKind::Press, self.remember_contact(contact))
            }
            RawPointerEvent::SecondaryMove { contact } => {
                (PointerKind::Move, self.remember_contact(contact))
            }
            RawPointerEvent::SecondaryEnd { contact } => {
                (PointerKind::Release, self.remember_contact(contact))
            }
        };
        let at = self.frame.get().normalize(page);
        self.hooks(kind).trigger(&at);
    }

    /// Resolves a secondary-channel contact, falling back to the last known
    /// coordinate when no contact point exists, and records the result.
    fn remember_contact(&self, contact: Option<Point>) -> Point {
        let at = contact.unwrap_or(self.last_contact.get());
        self.last_contact.set(at);
        at
    }
}

impl Default for PointerEvents {
    fn default() -> Self {
        Self::new()
    }
}
