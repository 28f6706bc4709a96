//! Precision models used when the TIN manufactures or accepts coordinates.

use super::coordinate::Coordinate;
use serde::{Deserialize, Serialize};

/// Rounding rule for coordinate values.
pub trait PrecisionModel {
    /// Rounds a single ordinate value.
    fn make_precise(&self, value: f64) -> f64;

    /// Rounds x and y, leaving z untouched.
    fn make_precise_xy(&self, coordinate: &Coordinate) -> Coordinate {
        Coordinate::new(
            self.make_precise(coordinate.x),
            self.make_precise(coordinate.y),
            coordinate.z,
        )
    }

    /// Rounds z, leaving x and y untouched. `NaN` stays `NaN`.
    fn make_precise_z(&self, coordinate: &Coordinate) -> Coordinate {
        coordinate.with_z(self.make_precise(coordinate.z))
    }
}

/// The two supported models.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Precision {
    /// Values snap to a grid of `1 / scale`.
    Fixed {
        /// Grid cells per unit; `1000.0` keeps three decimals
        scale: f64,
    },
    /// Values are kept as they are.
    Floating,
}

impl Precision {
    /// A fixed grid with `scale` cells per unit.
    #[must_use]
    pub const fn fixed(scale: f64) -> Self {
        Self::Fixed { scale }
    }

    /// Whole-unit rounding, used for breakline elevations.
    #[must_use]
    pub const fn whole_units() -> Self {
        Self::Fixed { scale: 1.0 }
    }

    /// Grid resolution, or `0.0` for floating precision.
    #[must_use]
    pub fn resolution(&self) -> f64 {
        match self {
            Self::Fixed { scale } => 1.0 / scale,
            Self::Floating => 0.0,
        }
    }
}

impl Default for Precision {
    /// Millimetre grid for metre-based coordinates.
    fn default() -> Self {
        Self::fixed(1000.0)
    }
}

impl PrecisionModel for Precision {
    fn make_precise(&self, value: f64) -> f64 {
        match self {
            Self::Fixed { scale } if value.is_finite() => (value * scale).round() / scale,
            _ => value,
        }
    }
}
