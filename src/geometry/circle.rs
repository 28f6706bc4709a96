//! Circumscribing circles.

use super::coordinate::Coordinate;
use super::envelope::Envelope;
use crate::config::Tolerances;

/// Circle with a tolerant containment test.
///
/// The tolerance absorbs rounding in the circumcenter so that a point lying exactly on
/// the circle, as happens for every fourth point of a regular grid, still counts as inside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    center: Coordinate,
    radius: f64,
    tolerance: f64,
}

impl Circle {
    /// Creates a circle with the default containment tolerance.
    #[must_use]
    pub const fn new(center: Coordinate, radius: f64) -> Self {
        Self::with_tolerance(center, radius, Tolerances::CIRCLE_TOLERANCE)
    }

    /// Creates a circle with an explicit containment tolerance.
    #[must_use]
    pub const fn with_tolerance(center: Coordinate, radius: f64, tolerance: f64) -> Self {
        Self {
            center,
            radius,
            tolerance,
        }
    }

    /// Circle through three points. Collinear points give an infinite radius.
    #[must_use]
    pub fn circumscribing(a: &Coordinate, b: &Coordinate, c: &Coordinate) -> Self {
        let center = circumcenter(a, b, c);
        Self::new(center, center.distance(a))
    }

    /// Center of the circle (no elevation).
    #[must_use]
    pub const fn center(&self) -> Coordinate {
        self.center
    }

    /// Radius of the circle.
    #[must_use]
    pub const fn radius(&self) -> f64 {
        self.radius
    }

    /// Tolerance added to the radius by [`Circle::contains`].
    #[must_use]
    pub const fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// True iff `distance(center, point) < radius + tolerance`.
    #[must_use]
    pub fn contains(&self, point: &Coordinate) -> bool {
        self.center.distance(point) < self.radius + self.tolerance
    }

    /// Square envelope `center ± radius`.
    #[must_use]
    pub fn envelope(&self) -> Envelope {
        Envelope::new(
            self.center.x - self.radius,
            self.center.y - self.radius,
            self.center.x + self.radius,
            self.center.y + self.radius,
        )
    }
}

/// Circumcenter of three points, computed relative to `a` to limit cancellation.
#[must_use]
pub fn circumcenter(a: &Coordinate, b: &Coordinate, c: &Coordinate) -> Coordinate {
    let bx = b.x - a.x;
    let by = b.y - a.y;
    let cx = c.x - a.x;
    let cy = c.y - a.y;
    let d = 2.0 * bx.mul_add(cy, -(by * cx));
    let b2 = bx.mul_add(bx, by * by);
    let c2 = cx.mul_add(cx, cy * cy);
    let ux = cy.mul_add(b2, -(by * c2)) / d;
    let uy = bx.mul_add(c2, -(cx * b2)) / d;
    Coordinate::new_2d(a.x + ux, a.y + uy)
}
