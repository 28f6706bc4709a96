//! Axis-aligned bounding rectangles used as spatial index keys.

use super::coordinate::Coordinate;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding rectangle. Bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Minimum x
    pub min_x: f64,
    /// Minimum y
    pub min_y: f64,
    /// Maximum x
    pub max_x: f64,
    /// Maximum y
    pub max_y: f64,
}

impl Envelope {
    /// Creates an envelope from two opposite corners in any order.
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            min_x: x1.min(x2),
            min_y: y1.min(y2),
            max_x: x1.max(x2),
            max_y: y1.max(y2),
        }
    }

    /// Zero-size envelope at a point.
    #[must_use]
    pub const fn from_point(point: &Coordinate) -> Self {
        Self {
            min_x: point.x,
            min_y: point.y,
            max_x: point.x,
            max_y: point.y,
        }
    }

    /// Smallest envelope covering every coordinate. `None` for an empty slice.
    #[must_use]
    pub fn from_coordinates(coordinates: &[Coordinate]) -> Option<Self> {
        let (first, rest) = coordinates.split_first()?;
        Some(
            rest.iter()
                .fold(Self::from_point(first), |envelope, c| {
                    envelope.expand_to_include(c)
                }),
        )
    }

    /// Width along x.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height along y.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Area of the rectangle.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Center point (no elevation).
    #[must_use]
    pub fn center(&self) -> Coordinate {
        Coordinate::new_2d(
            (self.min_x + self.max_x) * 0.5,
            (self.min_y + self.max_y) * 0.5,
        )
    }

    /// Whether the two closed rectangles share at least one point.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }

    /// Whether the point lies inside or on the boundary.
    #[must_use]
    pub fn covers(&self, point: &Coordinate) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Grows the envelope by `amount` on every side.
    #[must_use]
    pub fn expand(&self, amount: f64) -> Self {
        Self {
            min_x: self.min_x - amount,
            min_y: self.min_y - amount,
            max_x: self.max_x + amount,
            max_y: self.max_y + amount,
        }
    }

    /// Smallest envelope covering this one and the point.
    #[must_use]
    pub const fn expand_to_include(&self, point: &Coordinate) -> Self {
        Self {
            min_x: self.min_x.min(point.x),
            min_y: self.min_y.min(point.y),
            max_x: self.max_x.max(point.x),
            max_y: self.max_y.max(point.y),
        }
    }

    /// Smallest envelope covering both envelopes.
    #[must_use]
    pub const fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// The four corners, clockwise from `(min_x, min_y)`, without elevation.
    #[must_use]
    pub const fn corners(&self) -> [Coordinate; 4] {
        [
            Coordinate::new_2d(self.min_x, self.min_y),
            Coordinate::new_2d(self.min_x, self.max_y),
            Coordinate::new_2d(self.max_x, self.max_y),
            Coordinate::new_2d(self.max_x, self.min_y),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_normalises_corners() {
        let envelope = Envelope::new(10.0, 5.0, 0.0, -5.0);
        assert_relative_eq!(envelope.min_x, 0.0);
        assert_relative_eq!(envelope.min_y, -5.0);
        assert_relative_eq!(envelope.max_x, 10.0);
        assert_relative_eq!(envelope.max_y, 5.0);
        assert_relative_eq!(envelope.area(), 100.0);
    }

    #[test]
    fn test_intersects_is_closed() {
        let a = Envelope::new(0.0, 0.0, 1.0, 1.0);
        let touching = Envelope::new(1.0, 1.0, 2.0, 2.0);
        let apart = Envelope::new(1.5, 0.0, 2.0, 1.0);
        assert!(a.intersects(&touching));
        assert!(touching.intersects(&a));
        assert!(!a.intersects(&apart));
        assert!(a.intersects(&Envelope::from_point(&Coordinate::new_2d(0.5, 1.0))));
    }

    #[test]
    fn test_from_coordinates() {
        let coordinates = [
            Coordinate::new_2d(3.0, -1.0),
            Coordinate::new_2d(-2.0, 4.0),
            Coordinate::new_2d(0.0, 0.0),
        ];
        let envelope = Envelope::from_coordinates(&coordinates).expect("non-empty input");
        assert_eq!(envelope, Envelope::new(-2.0, -1.0, 3.0, 4.0));
        assert!(Envelope::from_coordinates(&[]).is_none());
    }

    #[test]
    fn test_covers_and_expand() {
        let envelope = Envelope::new(0.0, 0.0, 10.0, 10.0);
        assert!(envelope.covers(&Coordinate::new_2d(10.0, 0.0)));
        assert!(!envelope.covers(&Coordinate::new_2d(10.1, 0.0)));
        assert!(envelope.expand(1.0).covers(&Coordinate::new_2d(10.1, -1.0)));
    }
}
