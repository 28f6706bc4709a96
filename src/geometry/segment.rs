//! Line segments with elevation interpolation.

use super::coordinate::{Coordinate, signed_area2};
use super::envelope::Envelope;
use serde::{Deserialize, Serialize};

/// A directed segment between two coordinates. Elevations at the ends may be `NaN`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    /// Start coordinate
    pub p0: Coordinate,
    /// End coordinate
    pub p1: Coordinate,
}

impl LineSegment {
    /// Creates a segment from `p0` to `p1`.
    #[must_use]
    pub const fn new(p0: Coordinate, p1: Coordinate) -> Self {
        Self { p0, p1 }
    }

    /// Planar length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.p0.distance(&self.p1)
    }

    /// Bounding envelope of both ends.
    #[must_use]
    pub const fn envelope(&self) -> Envelope {
        Envelope::new(self.p0.x, self.p0.y, self.p1.x, self.p1.y)
    }

    /// The same segment traversed from `p1` to `p0`.
    #[must_use]
    pub const fn reversed(&self) -> Self {
        Self {
            p0: self.p1,
            p1: self.p0,
        }
    }

    /// Fraction along the segment of the orthogonal projection of `point`; 0 at `p0`, 1 at `p1`.
    /// Not clamped. A zero-length segment yields 0.
    #[must_use]
    pub fn projection_factor(&self, point: &Coordinate) -> f64 {
        let dx = self.p1.x - self.p0.x;
        let dy = self.p1.y - self.p0.y;
        let len2 = dx.mul_add(dx, dy * dy);
        if len2 <= 0.0 {
            return 0.0;
        }
        (point.x - self.p0.x).mul_add(dx, (point.y - self.p0.y) * dy) / len2
    }

    /// Coordinate at `fraction` of the way from `p0` to `p1`, elevation interpolated.
    #[must_use]
    pub fn point_along(&self, fraction: f64) -> Coordinate {
        Coordinate::new(
            fraction.mul_add(self.p1.x - self.p0.x, self.p0.x),
            fraction.mul_add(self.p1.y - self.p0.y, self.p0.y),
            fraction.mul_add(self.p1.z - self.p0.z, self.p0.z),
        )
    }

    /// Closest point of the segment to `point`, with the segment's interpolated elevation.
    #[must_use]
    pub fn closest_point(&self, point: &Coordinate) -> Coordinate {
        let fraction = self.projection_factor(point).clamp(0.0, 1.0);
        self.point_along(fraction)
    }

    /// Planar distance from `point` to the closed segment.
    #[must_use]
    pub fn distance_to_point(&self, point: &Coordinate) -> f64 {
        self.closest_point(point).distance(point)
    }

    /// Elevation of the segment at the projection of `point` (clamped to the segment).
    ///
    /// `NaN` when either end has no elevation.
    #[must_use]
    pub fn elevation_at(&self, point: &Coordinate) -> f64 {
        let fraction = self.projection_factor(point).clamp(0.0, 1.0);
        fraction.mul_add(self.p1.z - self.p0.z, self.p0.z)
    }

    /// Planar intersection with another segment.
    ///
    /// For collinear overlapping segments the first shared end found is returned.
    /// The returned elevation is interpolated along `self`.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Coordinate> {
        let rx = self.p1.x - self.p0.x;
        let ry = self.p1.y - self.p0.y;
        let sx = other.p1.x - other.p0.x;
        let sy = other.p1.y - other.p0.y;
        let denom = rx.mul_add(sy, -(ry * sx));
        let qpx = other.p0.x - self.p0.x;
        let qpy = other.p0.y - self.p0.y;

        if denom == 0.0 {
            if signed_area2(&self.p0, &self.p1, &other.p0) != 0.0 {
                return None;
            }
            return [other.p0, other.p1, self.p0, self.p1]
                .into_iter()
                .find(|c| self.covers_collinear(c) && other.covers_collinear(c))
                .map(|c| c.with_z(self.elevation_at(&c)));
        }

        let t = qpx.mul_add(sy, -(qpy * sx)) / denom;
        let u = qpx.mul_add(ry, -(qpy * rx)) / denom;
        if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
            Some(self.point_along(t))
        } else {
            None
        }
    }

    /// Fraction along `self` where the infinite lines through both segments cross.
    ///
    /// `None` for parallel lines.
    #[must_use]
    pub fn line_intersection_factor(&self, other: &Self) -> Option<f64> {
        let rx = self.p1.x - self.p0.x;
        let ry = self.p1.y - self.p0.y;
        let sx = other.p1.x - other.p0.x;
        let sy = other.p1.y - other.p0.y;
        let denom = rx.mul_add(sy, -(ry * sx));
        if denom == 0.0 {
            return None;
        }
        let qpx = other.p0.x - self.p0.x;
        let qpy = other.p0.y - self.p0.y;
        Some(qpx.mul_add(sy, -(qpy * sx)) / denom)
    }

    fn covers_collinear(&self, point: &Coordinate) -> bool {
        Envelope::new(self.p0.x, self.p0.y, self.p1.x, self.p1.y).covers(point)
    }
}
