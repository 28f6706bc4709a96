//! Coordinates and the 2D predicates built on them.
//!
//! Topology decisions in the TIN only ever compare coordinates in 2D; the z ordinate
//! is carried along as data and may be `NaN` until an elevation is assigned.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// A 2D/3D point. `z` is `NaN` when no elevation is known.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Easting
    pub x: f64,
    /// Northing
    pub y: f64,
    /// Elevation, `NaN` when unset
    pub z: f64,
}

impl Coordinate {
    /// Creates a 3D coordinate.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Creates a 2D coordinate with no elevation.
    #[must_use]
    pub const fn new_2d(x: f64, y: f64) -> Self {
        Self { x, y, z: f64::NAN }
    }

    /// Returns a copy of this coordinate with a new elevation.
    #[must_use]
    pub const fn with_z(self, z: f64) -> Self {
        Self {
            x: self.x,
            y: self.y,
            z,
        }
    }

    /// Whether an elevation has been assigned.
    #[must_use]
    pub const fn has_z(&self) -> bool {
        !self.z.is_nan()
    }

    /// Whether both x and y are finite.
    #[must_use]
    pub const fn is_finite_2d(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Exact equality of the x and y ordinates, ignoring z.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn equals_2d(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// Hashable key of the x and y ordinates; `-0.0` and `0.0` share a key.
    #[must_use]
    pub fn xy_key(&self) -> (u64, u64) {
        ((self.x + 0.0).to_bits(), (self.y + 0.0).to_bits())
    }

    /// Planar distance to another coordinate.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Angle in radians, in `(-PI, PI]`, of the vector from this coordinate to `other`.
    #[must_use]
    pub fn angle_to(&self, other: &Self) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_z() {
            write!(f, "({} {} {})", self.x, self.y, self.z)
        } else {
            write!(f, "({} {})", self.x, self.y)
        }
    }
}

/// Turn direction of three points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Right turn
    Clockwise,
    /// The three points lie on one line
    Collinear,
    /// Left turn
    CounterClockwise,
}

/// Twice the signed area of the triangle `p, q, r`; positive for a left turn.
#[must_use]
#[allow(clippy::suboptimal_flops)]
pub fn signed_area2(p: &Coordinate, q: &Coordinate, r: &Coordinate) -> f64 {
    (q.x - p.x) * (r.y - p.y) - (q.y - p.y) * (r.x - p.x)
}

/// Orientation of the turn `p -> q -> r`.
#[must_use]
pub fn orientation(p: &Coordinate, q: &Coordinate, r: &Coordinate) -> Orientation {
    let det = signed_area2(p, q, r);
    if det > 0.0 {
        Orientation::CounterClockwise
    } else if det < 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// Unoriented angle at `tail` between the rays to `tip1` and `tip2`, in `[0, PI]`.
#[must_use]
pub fn angle_between(tip1: &Coordinate, tail: &Coordinate, tip2: &Coordinate) -> f64 {
    let a1 = tail.angle_to(tip1);
    let a2 = tail.angle_to(tip2);
    let diff = (a1 - a2).abs();
    if diff > PI { 2.0f64.mul_add(PI, -diff) } else { diff }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_equals_2d_ignores_z() {
        let a = Coordinate::new(1.0, 2.0, 3.0);
        let b = Coordinate::new_2d(1.0, 2.0);
        assert!(a.equals_2d(&b));
        assert_ne!(a, b);
        assert_eq!(a.xy_key(), b.xy_key());
        assert_eq!(
            Coordinate::new_2d(-0.0, 1.0).xy_key(),
            Coordinate::new_2d(0.0, 1.0).xy_key()
        );
    }

    #[test]
    fn test_distance() {
        let a = Coordinate::new_2d(0.0, 0.0);
        let b = Coordinate::new(3.0, 4.0, 100.0);
        assert_relative_eq!(a.distance(&b), 5.0);
    }

    #[test]
    fn test_orientation() {
        let p = Coordinate::new_2d(0.0, 0.0);
        let q = Coordinate::new_2d(1.0, 0.0);
        assert_eq!(
            orientation(&p, &q, &Coordinate::new_2d(1.0, 1.0)),
            Orientation::CounterClockwise
        );
        assert_eq!(
            orientation(&p, &q, &Coordinate::new_2d(1.0, -1.0)),
            Orientation::Clockwise
        );
        assert_eq!(
            orientation(&p, &q, &Coordinate::new_2d(2.0, 0.0)),
            Orientation::Collinear
        );
    }

    #[test]
    fn test_angle_between() {
        let tail = Coordinate::new_2d(0.0, 0.0);
        let east = Coordinate::new_2d(1.0, 0.0);
        let north = Coordinate::new_2d(0.0, 1.0);
        let west = Coordinate::new_2d(-1.0, 0.0);
        let south_west = Coordinate::new_2d(-1.0, -1.0);
        assert_relative_eq!(angle_between(&east, &tail, &north), FRAC_PI_2);
        assert_relative_eq!(angle_between(&north, &tail, &east), FRAC_PI_2);
        assert_relative_eq!(angle_between(&east, &tail, &west), PI);
        assert_relative_eq!(angle_between(&east, &tail, &south_west), 0.75 * PI);
    }

    #[test]
    fn test_display() {
        assert_eq!(Coordinate::new_2d(1.0, 2.5).to_string(), "(1 2.5)");
        assert_eq!(Coordinate::new(1.0, 2.0, 3.0).to_string(), "(1 2 3)");
    }
}
