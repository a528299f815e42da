// Copyright 2026 the Lodestone Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::format;
use alloc::string::String;

use kurbo::{Point, Vec2};
use lodestone_paint::PaintBackend;
use peniko::Color;

/// Color used for entity labels and coordinate readouts.
const LABEL_COLOR: Color = Color::from_rgb8(0x00, 0x00, 0x88);

bitflags::bitflags! {
    /// Entity state and capability flags.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct EntityFlags: u8 {
        /// Entity can be dragged (participates in press capture).
        const DRAGGABLE = 0b0000_0001;
        /// Pointer is currently hovering over the entity.
        const HOVERED   = 0b0000_0010;
    }
}

impl Default for EntityFlags {
    fn default() -> Self {
        Self::DRAGGABLE
    }
}

/// A draggable control point in surface-pixel space.
///
/// Entities are created at initialization, mutated while dragged, and live
/// for the whole session. The render radius and the (larger) collision
/// radius are separate so small dots stay easy to grab.
#[derive(Clone, Debug, PartialEq)]
pub struct DragPoint {
    /// Position in surface pixels.
    pub position: Point,
    /// Render radius of the dot, in pixels.
    pub radius: f64,
    /// Hit-test radius, in pixels.
    pub collision_radius: f64,
    /// State and capability flags.
    pub flags: EntityFlags,
    /// Short label drawn next to the dot.
    pub label: String,
    /// Dot fill color.
    pub color: Color,
}

impl DragPoint {
    /// Creates a draggable point at `position` with the stock radii.
    #[must_use]
    pub fn new(position: Point) -> Self {
        Self {
            position,
            radius: 4.0,
            collision_radius: 20.0,
            flags: EntityFlags::default(),
            label: String::new(),
            color: Color::BLACK,
        }
    }

    /// Returns `true` iff `at` falls within the collision radius.
    #[must_use]
    pub fn hit_test(&self, at: Point) -> bool {
        (at - self.position).hypot2() < self.collision_radius * self.collision_radius
    }

    /// Whether the pointer is currently over this entity.
    #[must_use]
    pub fn is_hovered(&self) -> bool {
        self.flags.contains(EntityFlags::HOVERED)
    }

    /// Draws the dot, its label, and a live coordinate readout.
    ///
    /// The readout reports `y` bottom-up (`surface_height - y`), matching
    /// the world orientation users expect from the coordinate axes.
    pub fn draw(&self, surface_height: f64, backend: &mut impl PaintBackend) {
        let radius = if self.is_hovered() {
            // Enlarge on hover.
            self.radius * 1.2
        } else {
            self.radius
        };
        backend.fill_circle(self.position, radius, self.color);
        backend.fill_text(&self.label, self.position + Vec2::new(10.0, 0.0), LABEL_COLOR);
        backend.fill_text(
            &format!(
                "x: {}, y: {}",
                self.position.x,
                surface_height - self.position.y
            ),
            self.position + Vec2::new(10.0, 16.0),
            LABEL_COLOR,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_test_uses_the_collision_radius_not_the_render_radius() {
        let point = DragPoint::new(Point::new(100.0, 100.0));
        assert!(point.hit_test(Point::new(100.0, 100.0)));
        assert!(point.hit_test(Point::new(110.0, 110.0)));
        assert!(!point.hit_test(Point::new(100.0, 120.0)), "boundary is exclusive");
        assert!(!point.hit_test(Point::new(121.0, 100.0)));
    }

    #[test]
    fn default_flags_are_draggable_and_not_hovered() {
        let point = DragPoint::new(Point::ZERO);
        assert!(point.flags.contains(EntityFlags::DRAGGABLE));
        assert!(!point.is_hovered());
    }
}
