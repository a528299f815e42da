// Copyright 2026 the Lodestone Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use kurbo::Point;

/// An ordered sequence of world-space curve samples.
///
/// Open polylines model a wire with free ends; closed polylines model a
/// loop, where segment iteration wraps from the last sample back to the
/// first. Fewer than two samples yield no segments.
#[derive(Clone, Debug, PartialEq)]
pub struct Polyline {
    points: Vec<Point>,
    closed: bool,
}

impl Polyline {
    /// A wire with free ends through `points`, in order.
    #[must_use]
    pub fn open(points: Vec<Point>) -> Self {
        Self {
            points,
            closed: false,
        }
    }

    /// A loop through `points`; the last sample connects back to the first.
    #[must_use]
    pub fn closed(points: Vec<Point>) -> Self {
        Self {
            points,
            closed: true,
        }
    }

    /// A closed regular polygon approximating a circle.
    ///
    /// Samples run counterclockwise in the usual mathematical orientation
    /// (`y` up). The stock demo scene uses a 1000-segment loop.
    #[must_use]
    pub fn circle(center: Point, radius: f64, segments: usize) -> Self {
        let mut points = Vec::with_capacity(segments);
        for i in 0..segments {
            let rad = core::f64::consts::TAU * i as f64 / segments as f64;
            points.push(Point::new(
                center.x + rad.cos() * radius,
                center.y + rad.sin() * radius,
            ));
        }
        Self::closed(points)
    }

    /// The curve samples, in order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Whether the last sample connects back to the first.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Number of segments iterated by [`Polyline::segments`].
    #[must_use]
    pub fn segment_count(&self) -> usize {
        let n = self.points.len();
        if n < 2 {
            0
        } else if self.closed {
            n
        } else {
            n - 1
        }
    }

    /// Consecutive sample pairs, wrapping for closed curves.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.points.len();
        (0..self.segment_count()).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn open_polyline_has_one_fewer_segment_than_samples() {
        let wire = Polyline::open(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
        ]);
        let segments: Vec<_> = wire.segments().collect();
        assert_eq!(segments.len(), 2);
        assert_eq!(
            segments[1],
            (Point::new(1.0, 0.0), Point::new(1.0, 1.0)),
            "segments follow sample order"
        );
    }

    #[test]
    fn closed_polyline_wraps_back_to_the_first_sample() {
        let triangle = Polyline::closed(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
        ]);
        let segments: Vec<_> = triangle.segments().collect();
        assert_eq!(segments.len(), 3);
        assert_eq!(
            segments[2],
            (Point::new(0.0, 1.0), Point::new(0.0, 0.0)),
            "last segment closes the loop"
        );
    }

    #[test]
    fn degenerate_polylines_have_no_segments() {
        assert_eq!(Polyline::open(vec![]).segment_count(), 0);
        assert_eq!(Polyline::closed(vec![]).segment_count(), 0);
        assert_eq!(Polyline::closed(vec![Point::ZERO]).segment_count(), 0);
    }

    #[test]
    fn circle_samples_sit_on_the_radius() {
        let circle = Polyline::circle(Point::new(2.0, -1.0), 5.0, 64);
        assert!(circle.is_closed());
        assert_eq!(circle.points().len(), 64);
        for &p in circle.points() {
            let r = (p - Point::new(2.0, -1.0)).hypot();
            assert!((r - 5.0).abs() < 1e-12);
        }
    }
}
