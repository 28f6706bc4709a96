//! Clockwise triangles.
//!
//! A [`Triangle`] is immutable: any change of shape in the TIN removes the old
//! triangle and adds new ones built through [`Triangle::clockwise`], which fixes the
//! orientation and refuses collinear corners.

use super::circle::Circle;
use super::coordinate::{Coordinate, Orientation, orientation, signed_area2};
use super::envelope::Envelope;
use super::segment::LineSegment;
use crate::errors::{TinError, TinResult};
use serde::{Deserialize, Serialize};

/// Three corners in clockwise order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    corners: [Coordinate; 3],
}

impl Triangle {
    /// Builds a clockwise triangle from three corners in any order.
    ///
    /// Returns `None` when the corners are collinear (including repeated corners).
    #[must_use]
    pub fn clockwise(a: Coordinate, b: Coordinate, c: Coordinate) -> Option<Self> {
        match orientation(&a, &b, &c) {
            Orientation::Clockwise => Some(Self {
                corners: [a, b, c],
            }),
            Orientation::CounterClockwise => Some(Self {
                corners: [a, c, b],
            }),
            Orientation::Collinear => None,
        }
    }

    /// Like [`Triangle::clockwise`] but reports collinear corners as an error.
    ///
    /// # Errors
    ///
    /// Returns [`TinError::DegenerateTriangle`] if the corners are collinear.
    pub fn try_clockwise(a: Coordinate, b: Coordinate, c: Coordinate) -> TinResult<Self> {
        Self::clockwise(a, b, c)
            .ok_or_else(|| TinError::DegenerateTriangle(format!("{a}, {b}, {c}")))
    }

    /// The corners in clockwise order.
    #[must_use]
    pub const fn corners(&self) -> &[Coordinate; 3] {
        &self.corners
    }

    /// Corner `index % 3`.
    #[must_use]
    pub const fn corner(&self, index: usize) -> Coordinate {
        self.corners[index % 3]
    }

    /// Edge `index % 3`, running from corner `index` to corner `index + 1`.
    #[must_use]
    pub const fn edge(&self, index: usize) -> LineSegment {
        LineSegment::new(self.corner(index), self.corner(index + 1))
    }

    /// Index of the corner that is neither `i1` nor `i2`.
    ///
    /// # Panics
    ///
    /// Panics if `i1 == i2` or either index is not in `0..3`; asking for the third
    /// corner of a single corner is a caller bug.
    #[must_use]
    pub fn other_corner(i1: usize, i2: usize) -> usize {
        assert!(
            i1 < 3 && i2 < 3 && i1 != i2,
            "other_corner needs two distinct corner indices in 0..3, got {i1} and {i2}"
        );
        3 - i1 - i2
    }

    /// Index of the corner closest to `point`; the first one wins ties.
    #[must_use]
    pub fn nearest_corner(&self, point: &Coordinate) -> usize {
        let mut nearest = 0;
        let mut nearest_distance = self.corners[0].distance(point);
        for (i, corner) in self.corners.iter().enumerate().skip(1) {
            let distance = corner.distance(point);
            if distance < nearest_distance {
                nearest = i;
                nearest_distance = distance;
            }
        }
        nearest
    }

    /// Index of the corner 2D-equal to `point`, if any.
    #[must_use]
    pub fn corner_at(&self, point: &Coordinate) -> Option<usize> {
        self.corners.iter().position(|c| c.equals_2d(point))
    }

    /// Circumscribing circle with the default containment tolerance.
    #[must_use]
    pub fn circumcircle(&self) -> Circle {
        let [a, b, c] = &self.corners;
        Circle::circumscribing(a, b, c)
    }

    /// Circumscribing circle with an explicit containment tolerance.
    #[must_use]
    pub fn circumcircle_with_tolerance(&self, tolerance: f64) -> Circle {
        let circle = self.circumcircle();
        Circle::with_tolerance(circle.center(), circle.radius(), tolerance)
    }

    /// Bounding envelope of the three corners.
    #[must_use]
    pub fn envelope(&self) -> Envelope {
        let [a, b, c] = &self.corners;
        Envelope::from_point(a)
            .expand_to_include(b)
            .expand_to_include(c)
    }

    /// Planar area, always positive.
    #[must_use]
    pub fn area(&self) -> f64 {
        let [a, b, c] = &self.corners;
        signed_area2(a, b, c).abs() * 0.5
    }

    /// Perimeter length.
    #[must_use]
    pub fn perimeter(&self) -> f64 {
        (0..3).map(|i| self.edge(i).length()).sum()
    }

    /// Whether the corners are stored clockwise and span a positive area.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let [a, b, c] = &self.corners;
        orientation(a, b, c) == Orientation::Clockwise
    }

    /// Whether `point` is inside the triangle or on its boundary.
    #[must_use]
    pub fn contains(&self, point: &Coordinate) -> bool {
        (0..3).all(|i| signed_area2(&self.corner(i), &self.corner(i + 1), point) <= 0.0)
    }

    /// The part of `segment` inside the closed triangle, or `None` if they do not meet.
    ///
    /// Clipped ends keep the elevation interpolated along `segment`; an end of `segment`
    /// that is already inside is returned unchanged. A segment that only touches the
    /// triangle yields a zero-length result.
    #[must_use]
    pub fn clip(&self, segment: &LineSegment) -> Option<LineSegment> {
        let mut t_enter = 0.0f64;
        let mut t_exit = 1.0f64;
        for i in 0..3 {
            let a = self.corner(i);
            let b = self.corner(i + 1);
            // Inside a clockwise triangle every edge sees the point on its right.
            let f0 = signed_area2(&a, &b, &segment.p0);
            let f1 = signed_area2(&a, &b, &segment.p1);
            if f0 > 0.0 && f1 > 0.0 {
                return None;
            }
            if f0 > 0.0 {
                t_enter = t_enter.max(f0 / (f0 - f1));
            } else if f1 > 0.0 {
                t_exit = t_exit.min(f0 / (f0 - f1));
            }
        }
        if t_enter > t_exit {
            return None;
        }
        let start = if t_enter <= 0.0 {
            segment.p0
        } else {
            segment.point_along(t_enter)
        };
        let end = if t_exit >= 1.0 {
            segment.p1
        } else {
            segment.point_along(t_exit)
        };
        Some(LineSegment::new(start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn right_triangle() -> Triangle {
        Triangle::clockwise(
            Coordinate::new(0.0, 0.0, 0.0),
            Coordinate::new(10.0, 0.0, 10.0),
            Coordinate::new(0.0, 10.0, 20.0),
        )
        .expect("corners are not collinear")
    }

    #[test]
    fn test_clockwise_factory_fixes_orientation() {
        let triangle = right_triangle();
        assert!(triangle.is_valid());
        // Counter-clockwise input is reordered.
        assert_eq!(triangle.corner(0), Coordinate::new(0.0, 0.0, 0.0));
        assert_eq!(triangle.corner(1), Coordinate::new(0.0, 10.0, 20.0));
        assert_eq!(triangle.corner(2), Coordinate::new(10.0, 0.0, 10.0));
    }

    #[test]
    fn test_collinear_corners_rejected() {
        let a = Coordinate::new_2d(0.0, 0.0);
        let b = Coordinate::new_2d(1.0, 1.0);
        let c = Coordinate::new_2d(3.0, 3.0);
        assert!(Triangle::clockwise(a, b, c).is_none());
        assert!(matches!(
            Triangle::try_clockwise(a, b, a),
            Err(TinError::DegenerateTriangle(_))
        ));
    }

    #[test]
    fn test_area_envelope_and_circle() {
        let triangle = right_triangle();
        assert_relative_eq!(triangle.area(), 50.0);
        assert_eq!(triangle.envelope(), Envelope::new(0.0, 0.0, 10.0, 10.0));
        let circle = triangle.circumcircle();
        assert_relative_eq!(circle.center().x, 5.0);
        assert_relative_eq!(circle.center().y, 5.0);
        assert_relative_eq!(triangle.perimeter(), 20.0 + 200.0f64.sqrt());
    }

    #[test]
    fn test_contains_closed() {
        let triangle = right_triangle();
        assert!(triangle.contains(&Coordinate::new_2d(1.0, 1.0)));
        assert!(triangle.contains(&Coordinate::new_2d(5.0, 5.0)));
        assert!(triangle.contains(&Coordinate::new_2d(0.0, 0.0)));
        assert!(!triangle.contains(&Coordinate::new_2d(5.1, 5.1)));
        assert!(!triangle.contains(&Coordinate::new_2d(-0.1, 1.0)));
    }

    #[test]
    fn test_other_corner() {
        assert_eq!(Triangle::other_corner(0, 1), 2);
        assert_eq!(Triangle::other_corner(2, 0), 1);
        assert_eq!(Triangle::other_corner(1, 2), 0);
    }

    #[test]
    #[should_panic(expected = "distinct corner indices")]
    fn test_other_corner_same_index_panics() {
        let _ = Triangle::other_corner(1, 1);
    }

    #[test]
    fn test_clip_crossing_segment() {
        let triangle = right_triangle();
        let segment = LineSegment::new(
            Coordinate::new(-5.0, 2.0, 0.0),
            Coordinate::new(15.0, 2.0, 20.0),
        );
        let clipped = triangle.clip(&segment).expect("segment crosses triangle");
        assert_relative_eq!(clipped.p0.x, 0.0);
        assert_relative_eq!(clipped.p0.y, 2.0);
        assert_relative_eq!(clipped.p0.z, 5.0);
        assert_relative_eq!(clipped.p1.x, 8.0);
        assert_relative_eq!(clipped.p1.z, 13.0);
    }

    #[test]
    fn test_clip_inside_and_outside() {
        let triangle = right_triangle();
        let inside = LineSegment::new(
            Coordinate::new(1.0, 1.0, 1.0),
            Coordinate::new(2.0, 3.0, 2.0),
        );
        assert_eq!(triangle.clip(&inside), Some(inside));

        let outside = LineSegment::new(
            Coordinate::new_2d(6.0, 6.0),
            Coordinate::new_2d(9.0, 9.0),
        );
        assert!(triangle.clip(&outside).is_none());
    }

    #[test]
    fn test_clip_touching_corner_is_zero_length() {
        let triangle = right_triangle();
        let segment = LineSegment::new(
            Coordinate::new_2d(-5.0, 5.0),
            Coordinate::new_2d(5.0, 15.0),
        );
        let clipped = triangle.clip(&segment).expect("segment touches a corner");
        assert_relative_eq!(clipped.length(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(clipped.p0.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(clipped.p0.y, 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_nearest_corner() {
        let triangle = right_triangle();
        assert_eq!(triangle.nearest_corner(&Coordinate::new_2d(1.0, 1.0)), 0);
        assert_eq!(triangle.nearest_corner(&Coordinate::new_2d(1.0, 8.0)), 1);
        assert_eq!(triangle.corner_at(&Coordinate::new_2d(10.0, 0.0)), Some(2));
    }
}
