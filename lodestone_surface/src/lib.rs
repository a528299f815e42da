// Copyright 2026 the Lodestone Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lodestone Surface: a resizable raster surface with a unified
//! subscription contract.
//!
//! [`ResizableSurface`] composes the pieces the original stack built by
//! inheritance: it *owns* a [`PaintBackend`] and the hook registries, and
//! widgets hold a reference to it rather than deriving from it.
//!
//! The hosting container reports its pixel bounding box on demand and on
//! resize; [`ResizableSurface::update_size`] re-derives the pixel
//! dimensions from it, resizes the backend, moves the pointer-normalization
//! origin, and emits exactly one `resize` notification, always before any
//! dependent redraw triggered by that resize.
//!
//! Sizes are clamped to be non-negative. A zero-sized surface is a valid
//! transient state: draw operations become no-ops until the container
//! reports a usable box again.
//!
//! ```
//! use kurbo::Rect;
//! use lodestone_paint::{Color, PaintBackend};
//! # #[derive(Default)] struct NullPaint;
//! # impl PaintBackend for NullPaint {
//! #     fn resize(&mut self, _: u32, _: u32) {}
//! #     fn clear(&mut self) {}
//! #     fn blit_rgb(&mut self, _: u32, _: u32, _: &[u8]) {}
//! #     fn stroke_polyline(&mut self, _: &[kurbo::Point], _: bool, _: Color, _: f64) {}
//! #     fn fill_circle(&mut self, _: kurbo::Point, _: f64, _: Color) {}
//! #     fn fill_text(&mut self, _: &str, _: kurbo::Point, _: Color) {}
//! # }
//! use lodestone_surface::ResizableSurface;
//!
//! let surface = ResizableSurface::new(NullPaint::default());
//! surface.on_resize(|size| println!("{} x {}", size.width, size.height));
//! surface.update_size(Rect::new(0.0, 0.0, 800.0, 600.0));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use core::cell::{Cell, RefCell};
use core::fmt;

use kurbo::{Rect, Size, Vec2};
use lodestone_hooks::{Hook, Hooks};
use lodestone_paint::PaintBackend;
use lodestone_pointer::{PointerEvents, PointerFrame, PointerKind, RawPointerEvent};

/// A drawing surface sized to its container.
///
/// Owns the paint backend, the current pixel [`Size`], the resize registry,
/// and the pointer event unifier. All methods take `&self`; the surface is
/// single-threaded and interior-mutable like the rest of the stack.
pub struct ResizableSurface<B: PaintBackend> {
    backend: RefCell<B>,
    size: Cell<Size>,
    resize_hooks: Hooks<Size>,
    pointer: PointerEvents,
}

impl<B: PaintBackend> ResizableSurface<B> {
    /// Creates a zero-sized surface over `backend`.
    ///
    /// No resize notification fires until the container reports a box via
    /// [`ResizableSurface::update_size`].
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self {
            backend: RefCell::new(backend),
            size: Cell::new(Size::ZERO),
            resize_hooks: Hooks::new(),
            pointer: PointerEvents::new(),
        }
    }

    /// Current surface size in pixels. Never negative; possibly zero.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size.get()
    }

    /// The pointer event unifier bound to this surface.
    #[must_use]
    pub fn pointer(&self) -> &PointerEvents {
        &self.pointer
    }

    /// Re-derives pixel dimensions from the container bounding box.
    ///
    /// Negative extents clamp to zero. The backend is resized and the
    /// pointer frame origin updated before the single `resize` notification
    /// fires, so subscribers observe a consistent surface.
    pub fn update_size(&self, bounds: Rect) {
        let size = Size::new(bounds.width().max(0.0), bounds.height().max(0.0));
        self.size.set(size);
        self.backend
            .borrow_mut()
            .resize(size.width as u32, size.height as u32);

        let frame = self.pointer.frame();
        self.pointer.set_frame(PointerFrame {
            origin: bounds.origin(),
            scroll: frame.scroll,
        });

        self.resize_hooks.trigger(&size);
    }

    /// Records the current page scroll offset used for pointer
    /// normalization.
    pub fn set_scroll(&self, scroll: Vec2) {
        let frame = self.pointer.frame();
        self.pointer.set_frame(PointerFrame {
            origin: frame.origin,
            scroll,
        });
    }

    /// Subscribes to pointer events of `kind` in surface-pixel space.
    pub fn on(
        &self,
        kind: PointerKind,
        cb: impl FnMut(&kurbo::Point) + 'static,
    ) -> Hook<kurbo::Point> {
        self.pointer.on(kind, cb)
    }

    /// Subscribes to the next pointer event of `kind` only.
    pub fn once(
        &self,
        kind: PointerKind,
        cb: impl FnOnce(&kurbo::Point) + 'static,
    ) -> Hook<kurbo::Point> {
        self.pointer.once(kind, cb)
    }

    /// Subscribes to resize notifications.
    ///
    /// This is the synthetic, non-coordinate-bearing kind of the unified
    /// subscription surface; it bypasses the pointer streams entirely.
    pub fn on_resize(&self, cb: impl FnMut(&Size) + 'static) -> Hook<Size> {
        self.resize_hooks.add(cb)
    }

    /// Subscribes to the next resize notification only.
    pub fn once_resize(&self, cb: impl FnOnce(&Size) + 'static) -> Hook<Size> {
        self.resize_hooks.once(cb)
    }

    /// Feeds a raw input event to the pointer unifier.
    pub fn dispatch(&self, raw: RawPointerEvent) {
        self.pointer.dispatch(raw);
    }

    /// Runs `f` with mutable access to the paint backend.
    ///
    /// Render passes run to completion on the single thread before any
    /// other hook fires, so no draw call can observe a half-updated
    /// surface.
    pub fn with_backend<R>(&self, f: impl FnOnce(&mut B) -> R) -> R {
        f(&mut self.backend.borrow_mut())
    }

    /// Consumes the surface, returning the backend.
    pub fn into_backend(self) -> B {
        self.backend.into_inner()
    }
}

impl<B: PaintBackend> fmt::Debug for ResizableSurface<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResizableSurface")
            .field("size", &self.size.get())
            .field("resize_hooks", &self.resize_hooks)
            .finish()
    }
}
