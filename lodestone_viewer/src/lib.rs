// Copyright 2026 the Lodestone Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lodestone Viewer: the composition root of the field viewer.
//!
//! [`FieldViewer`] wires the stack together: it owns a
//! [`ResizableSurface`] (which owns the paint backend), a mutable
//! [`Scene`] configuration, and a [`DragController`] for the control
//! points. Hosting applications feed it container bounding boxes and raw
//! pointer events; everything else is wired internally:
//!
//! ```text
//! input source → pointer unifier → drag controller / hover
//!                                   ↘ repaint request
//! container box → surface resize ───→ render pass
//!                                      (projection → solver → raster →
//!                                       curve → scale bar → entities)
//! ```
//!
//! The system is single-threaded and cooperative: every pass runs to
//! completion in response to one input event or an explicit
//! [`FieldViewer::render`] call, and hook callbacks fire in registration
//! order. A resize emits exactly one notification before the dependent
//! redraw. Renders with an invalid view (`virtual_width <= 0`) or a
//! zero-sized surface are skipped until the state is corrected, and nothing
//! is reported: this is a visual tool, and failure manifests as a stale or
//! blank frame.
//!
//! ## Example
//!
//! ```
//! use kurbo::{Point, Rect};
//! use lodestone_field::Polyline;
//! use lodestone_interact::DragPoint;
//! use lodestone_paint_ref::RefPaint;
//! use lodestone_viewer::{FieldViewer, Scene};
//!
//! let scene = Scene {
//!     curve: Some(Polyline::circle(Point::ZERO, 2.0, 100)),
//!     ..Scene::default()
//! };
//!
//! let viewer = FieldViewer::new(RefPaint::new(), scene, vec![]);
//! viewer.update_size(Rect::new(0.0, 0.0, 64.0, 48.0));
//! // The resize has already triggered a full render pass.
//! viewer.surface().with_backend(|paint| {
//!     assert!(!paint.ops().is_empty());
//! });
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::{Ref, RefCell};
use core::fmt;

use kurbo::Rect;
use lodestone_camera::{ScaleBar, ViewState};
use lodestone_field::Polyline;
use lodestone_interact::{DragController, DragPoint};
use lodestone_paint::PaintBackend;
use lodestone_pointer::RawPointerEvent;
use lodestone_render::{FrameParams, RenderMode, SigmoidMap, render};
use lodestone_surface::ResizableSurface;
use peniko::Color;

/// The configuration surface exposed to the hosting application.
///
/// Plain mutable fields, read at render time. Nothing here is validated
/// eagerly; an unusable `view` simply makes render passes no-ops until it
/// is corrected.
#[derive(Clone, Debug)]
pub struct Scene {
    /// View center and the world span mapped to the surface width.
    pub view: ViewState,
    /// The current-carrying curve, if any. No curve means a zero field.
    pub curve: Option<Polyline>,
    /// Current magnitude in amperes.
    pub current: f64,
    /// Scalar-to-color transfer for the field raster.
    pub color_map: SigmoidMap,
    /// Scale-bar spacing and span configuration.
    pub scale_bar: ScaleBar,
    /// Full-field raster or curve-only overlay rendering.
    pub mode: RenderMode,
    /// Stroke color of the curve overlay.
    pub curve_color: Color,
    /// Stroke and label color of the scale bar.
    pub scale_color: Color,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            view: ViewState::default(),
            curve: None,
            current: 1.0,
            color_map: SigmoidMap::default(),
            scale_bar: ScaleBar::default(),
            mode: RenderMode::default(),
            curve_color: Color::BLACK,
            scale_color: Color::BLACK,
        }
    }
}

struct ViewerInner<B: PaintBackend> {
    surface: ResizableSurface<B>,
    scene: RefCell<Scene>,
    controller: DragController,
}

impl<B: PaintBackend> ViewerInner<B> {
    /// One full pass: field raster and overlays, then the control points.
    ///
    /// Runs to completion before any other hook can fire; a pass over
    /// identical inputs produces identical output.
    fn render_pass(&self) {
        let size = self.surface.size();
        if !(size.width > 0.0) || !(size.height > 0.0) {
            return;
        }
        let scene = self.scene.borrow();
        self.surface.with_backend(|backend| {
            let params = FrameParams {
                view: scene.view,
                size,
                curve: scene.curve.as_ref(),
                current: scene.current,
                color_map: scene.color_map,
                scale_bar: scene.scale_bar,
                mode: scene.mode,
                curve_color: scene.curve_color,
                scale_color: scene.scale_color,
            };
            if render(&params, backend).is_ok() {
                self.controller.draw(size.height, backend);
            }
        });
    }
}

/// The interactive field viewer.
///
/// Cheap to clone (clones share the viewer). See the [crate docs](crate)
/// for the wiring overview.
pub struct FieldViewer<B: PaintBackend + 'static> {
    inner: Rc<ViewerInner<B>>,
}

impl<B: PaintBackend + 'static> FieldViewer<B> {
    /// Builds a viewer over `backend` showing `scene`, with draggable
    /// `entities` in hit-test priority order.
    ///
    /// The viewer starts zero-sized; feed it a container box via
    /// [`FieldViewer::update_size`] to get the first frame.
    #[must_use]
    pub fn new(backend: B, scene: Scene, entities: Vec<DragPoint>) -> Self {
        let inner = Rc::new(ViewerInner {
            surface: ResizableSurface::new(backend),
            scene: RefCell::new(scene),
            controller: DragController::new(entities),
        });

        inner.controller.attach(inner.surface.pointer());

        // Weak references: the subscriptions live inside `inner`'s own
        // registries, so strong captures would leak the viewer.
        let weak: Weak<ViewerInner<B>> = Rc::downgrade(&inner);
        inner.surface.on_resize(move |_| {
            if let Some(inner) = weak.upgrade() {
                inner.render_pass();
            }
        });

        let weak = Rc::downgrade(&inner);
        inner.controller.on_repaint(move |()| {
            if let Some(inner) = weak.upgrade() {
                inner.render_pass();
            }
        });

        Self { inner }
    }

    /// Reports the current container bounding box.
    ///
    /// Re-derives the surface pixel size and triggers the resize-driven
    /// render pass.
    pub fn update_size(&self, bounds: Rect) {
        self.inner.surface.update_size(bounds);
    }

    /// Feeds one raw pointer event in.
    pub fn dispatch(&self, raw: RawPointerEvent) {
        self.inner.surface.dispatch(raw);
    }

    /// Reads the scene configuration.
    #[must_use]
    pub fn scene(&self) -> Ref<'_, Scene> {
        self.inner.scene.borrow()
    }

    /// Mutates the scene configuration.
    ///
    /// Changes take effect on the next render pass; call
    /// [`FieldViewer::render`] to repaint immediately.
    pub fn configure(&self, f: impl FnOnce(&mut Scene)) {
        f(&mut self.inner.scene.borrow_mut());
    }

    /// Runs one render pass now.
    pub fn render(&self) {
        self.inner.render_pass();
    }

    /// The surface owning the paint backend.
    #[must_use]
    pub fn surface(&self) -> &ResizableSurface<B> {
        &self.inner.surface
    }

    /// The drag controller owning the control points.
    #[must_use]
    pub fn controller(&self) -> &DragController {
        &self.inner.controller
    }
}

impl<B: PaintBackend + 'static> Clone for FieldViewer<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<B: PaintBackend + 'static> fmt::Debug for FieldViewer<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldViewer")
            .field("surface", &self.inner.surface)
            .field("controller", &self.inner.controller)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;
    use kurbo::Point;
    use lodestone_paint_ref::{PaintOp, RefPaint};
    use lodestone_pointer::RawPointerEvent;
    use lodestone_render::RenderMode;

    fn circle_scene() -> Scene {
        Scene {
            view: ViewState::new(Point::ZERO, 14.0),
            curve: Some(Polyline::circle(Point::ZERO, 2.0, 48)),
            current: 1e9,
            ..Scene::default()
        }
    }

    fn pixels_of(viewer: &FieldViewer<RefPaint>) -> Vec<u8> {
        viewer.surface().with_backend(|paint| paint.pixels().to_vec())
    }

    #[test]
    fn resize_triggers_a_full_render_pass() {
        let viewer = FieldViewer::new(RefPaint::new(), circle_scene(), vec![]);
        viewer.update_size(Rect::new(0.0, 0.0, 32.0, 24.0));

        viewer.surface().with_backend(|paint| {
            let ops = paint.ops();
            assert!(ops.iter().any(|op| matches!(op, PaintOp::Clear)));
            assert!(
                ops.iter()
                    .any(|op| matches!(op, PaintOp::BlitRgb { width: 32, height: 24 }))
            );
            assert!(
                ops.iter()
                    .any(|op| matches!(op, PaintOp::StrokePolyline { closed: true, .. })),
                "curve overlay present"
            );
        });
    }

    #[test]
    fn resizing_twice_with_the_same_box_is_idempotent() {
        let viewer = FieldViewer::new(RefPaint::new(), circle_scene(), vec![]);
        let bounds = Rect::new(0.0, 0.0, 40.0, 30.0);

        viewer.update_size(bounds);
        let first = pixels_of(&viewer);
        viewer.update_size(bounds);
        let second = pixels_of(&viewer);

        assert_eq!(first, second, "no hidden state may accumulate across redraws");
    }

    #[test]
    fn dragging_a_control_point_repaints_and_moves_it() {
        let entities = vec![DragPoint::new(Point::new(10.0, 10.0))];
        let viewer = FieldViewer::new(RefPaint::new(), circle_scene(), entities);
        viewer.update_size(Rect::new(0.0, 0.0, 64.0, 48.0));

        let ops_before = viewer.surface().with_backend(|paint| paint.ops().len());

        viewer.dispatch(RawPointerEvent::PrimaryDown {
            page: Point::new(12.0, 9.0),
        });
        viewer.dispatch(RawPointerEvent::PrimaryMove {
            page: Point::new(30.0, 20.0),
        });
        viewer.dispatch(RawPointerEvent::PrimaryUp {
            page: Point::new(30.0, 20.0),
        });

        assert_eq!(
            viewer.controller().entities()[0].position,
            Point::new(30.0, 20.0)
        );
        let ops_after = viewer.surface().with_backend(|paint| paint.ops().len());
        assert!(ops_after > ops_before, "drag must request repaints");
    }

    #[test]
    fn invalid_view_skips_the_frame() {
        let viewer = FieldViewer::new(RefPaint::new(), circle_scene(), vec![]);
        viewer.configure(|scene| scene.view.virtual_width = 0.0);
        viewer.update_size(Rect::new(0.0, 0.0, 32.0, 24.0));

        viewer.surface().with_backend(|paint| {
            // The backend was resized, but no drawing happened.
            assert_eq!(paint.ops().len(), 1);
            assert!(matches!(paint.ops()[0], PaintOp::Resize { .. }));
        });

        // Correcting the state makes the next pass paint again.
        viewer.configure(|scene| scene.view.virtual_width = 14.0);
        viewer.render();
        viewer.surface().with_backend(|paint| {
            assert!(paint.ops().iter().any(|op| matches!(op, PaintOp::Clear)));
        });
    }

    #[test]
    fn zero_sized_surface_is_a_valid_transient_state() {
        let viewer = FieldViewer::new(RefPaint::new(), circle_scene(), vec![]);
        viewer.update_size(Rect::new(0.0, 0.0, 0.0, 0.0));
        viewer.render();

        viewer.surface().with_backend(|paint| {
            assert!(
                !paint.ops().iter().any(|op| matches!(op, PaintOp::Clear)),
                "draws are no-ops while the surface is zero-sized"
            );
        });
    }

    #[test]
    fn curve_only_mode_renders_without_a_blit() {
        let mut scene = circle_scene();
        scene.mode = RenderMode::CurveOnly;
        let viewer = FieldViewer::new(RefPaint::new(), scene, vec![]);
        viewer.update_size(Rect::new(0.0, 0.0, 48.0, 36.0));

        viewer.surface().with_backend(|paint| {
            assert!(
                !paint
                    .ops()
                    .iter()
                    .any(|op| matches!(op, PaintOp::BlitRgb { .. }))
            );
        });
    }

    #[test]
    fn entities_paint_after_the_field_layers() {
        let entities = vec![DragPoint::new(Point::new(5.0, 5.0))];
        let viewer = FieldViewer::new(RefPaint::new(), circle_scene(), entities);
        viewer.update_size(Rect::new(0.0, 0.0, 16.0, 12.0));

        viewer.surface().with_backend(|paint| {
            let blit_at = paint
                .ops()
                .iter()
                .position(|op| matches!(op, PaintOp::BlitRgb { .. }))
                .unwrap();
            let dot_at = paint
                .ops()
                .iter()
                .position(|op| matches!(op, PaintOp::FillCircle { .. }))
                .unwrap();
            assert!(dot_at > blit_at, "control points composite on top");
        });
    }
}
