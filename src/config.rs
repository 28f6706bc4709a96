//! Configuration for TIN construction.
//!
//! This module provides:
//! - The named tolerance constants that decide topology in the TIN
//! - The command line configuration of the `tin` binary
//! - Presets for tests and benchmarks

use crate::errors::{TinError, TinResult};
use crate::geometry::coordinate::Coordinate;
use crate::geometry::envelope::Envelope;
use crate::geometry::precision::Precision;
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

/// Distance thresholds used by node and breakline insertion.
///
/// These values are part of the observable behavior: changing them changes which
/// split a breakline produces near corners and edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerances {
    /// Slack added to a circumcircle radius when testing containment
    pub circle: f64,
    /// A breakline end closer than this to a corner or edge touches it
    pub touch: f64,
    /// With the other end on a corner, an end closer than this to an edge is moved onto it
    pub edge_near: f64,
    /// Clipped breakline pieces shorter than this are treated as a single point
    pub min_intersection_length: f64,
}

impl Tolerances {
    /// Default circumcircle containment slack.
    pub const CIRCLE_TOLERANCE: f64 = 1e-4;
    /// Default corner/edge touch distance.
    pub const TOUCH_TOLERANCE: f64 = 0.01;
    /// Default distance for moving a breakline end onto an edge.
    pub const EDGE_NEAR_DISTANCE: f64 = 1.0;
    /// Default single-point intersection length.
    pub const MIN_INTERSECTION_LENGTH: f64 = 0.01;

    /// The default tolerances.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            circle: Self::CIRCLE_TOLERANCE,
            touch: Self::TOUCH_TOLERANCE,
            edge_near: Self::EDGE_NEAR_DISTANCE,
            min_intersection_length: Self::MIN_INTERSECTION_LENGTH,
        }
    }

    /// Checks that every tolerance is finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`TinError::InvalidParameters`] naming the first bad tolerance.
    pub fn validate(&self) -> TinResult<()> {
        let named = [
            ("circle", self.circle),
            ("touch", self.touch),
            ("edge_near", self.edge_near),
            ("min_intersection_length", self.min_intersection_length),
        ];
        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(TinError::InvalidParameters(format!(
                    "Tolerance {name} must be finite and non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self::new()
    }
}

/// Precision and tolerance settings of one network.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TinOptions {
    /// Rounding applied to inserted nodes, rectangle corners and breakline vertices
    pub xy_precision: Precision,
    /// Rounding applied to breakline elevations
    pub z_precision: Precision,
    /// Topology thresholds
    pub tolerances: Tolerances,
}

impl TinOptions {
    /// Millimetre x/y grid, whole-unit breakline elevations, default tolerances.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            xy_precision: Precision::fixed(1000.0),
            z_precision: Precision::whole_units(),
            tolerances: Tolerances::new(),
        }
    }

    /// Replaces the x/y precision model.
    #[must_use]
    pub const fn with_xy_precision(mut self, precision: Precision) -> Self {
        self.xy_precision = precision;
        self
    }

    /// Replaces the breakline elevation precision model.
    #[must_use]
    pub const fn with_z_precision(mut self, precision: Precision) -> Self {
        self.z_precision = precision;
        self
    }

    /// Replaces the tolerances.
    #[must_use]
    pub const fn with_tolerances(mut self, tolerances: Tolerances) -> Self {
        self.tolerances = tolerances;
        self
    }
}

impl Default for TinOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Spatial index used for the committed circumcircle index.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexBackend {
    /// R*-tree from the `rstar` crate
    #[default]
    #[value(name = "rtree")]
    RTree,
    /// Brute-force scan
    #[value(name = "linear")]
    Linear,
}

/// Command line configuration of the `tin` binary.
///
/// Builds a rectangle-seeded TIN, fills it with random nodes, optionally adds one
/// breakline polyline and optionally reports the elevation at a query point.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct TinConfig {
    /// Minimum x of the domain rectangle
    #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
    pub min_x: f64,

    /// Minimum y of the domain rectangle
    #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
    pub min_y: f64,

    /// Maximum x of the domain rectangle
    #[arg(long, default_value = "100.0", allow_negative_numbers = true)]
    pub max_x: f64,

    /// Maximum y of the domain rectangle
    #[arg(long, default_value = "100.0", allow_negative_numbers = true)]
    pub max_y: f64,

    /// Number of random nodes to insert
    #[arg(short, long, default_value = "100")]
    pub points: u32,

    /// Upper bound of random node elevations
    #[arg(long, default_value = "100.0")]
    pub max_elevation: f64,

    /// Seed for reproducible node generation
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Grid cells per unit used to round node x/y
    #[arg(long, default_value = "1000.0")]
    pub xy_scale: f64,

    /// Breakline vertices as comma separated x,y,z triples
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    pub breakline: Vec<f64>,

    /// Point x,y at which to report the interpolated elevation
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    pub elevation_at: Vec<f64>,

    /// Spatial index backend for circumcircles
    #[arg(long, value_enum, default_value_t = IndexBackend::RTree)]
    pub index: IndexBackend,
}

impl TinConfig {
    /// Builds a new instance of `TinConfig` from command line arguments.
    #[must_use]
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Creates a configuration over `(0, 0) - (100, 100)` with `points` random nodes.
    #[must_use]
    pub const fn new(points: u32) -> Self {
        Self {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 100.0,
            max_y: 100.0,
            points,
            max_elevation: 100.0,
            seed: None,
            xy_scale: 1000.0,
            breakline: Vec::new(),
            elevation_at: Vec::new(),
            index: IndexBackend::RTree,
        }
    }

    /// The domain rectangle.
    #[must_use]
    pub const fn envelope(&self) -> Envelope {
        Envelope::new(self.min_x, self.min_y, self.max_x, self.max_y)
    }

    /// Network options with the configured x/y precision.
    #[must_use]
    pub const fn options(&self) -> TinOptions {
        TinOptions::new().with_xy_precision(Precision::fixed(self.xy_scale))
    }

    /// Breakline vertices parsed from the flat `x,y,z` list.
    #[must_use]
    pub fn breakline_coordinates(&self) -> Vec<Coordinate> {
        self.breakline
            .chunks_exact(3)
            .map(|xyz| Coordinate::new(xyz[0], xyz[1], xyz[2]))
            .collect()
    }

    /// The elevation query point, if one was given.
    #[must_use]
    pub fn query_point(&self) -> Option<Coordinate> {
        match self.elevation_at.as_slice() {
            [x, y] => Some(Coordinate::new_2d(*x, *y)),
            _ => None,
        }
    }

    /// Validates the configuration parameters.
    ///
    /// # Errors
    ///
    /// Returns [`TinError::InvalidParameters`] if any parameter is out of range.
    pub fn validate(&self) -> TinResult<()> {
        let bounds = [self.min_x, self.min_y, self.max_x, self.max_y];
        if bounds.iter().any(|v| !v.is_finite()) {
            return Err(TinError::InvalidParameters(
                "Domain bounds must be finite".to_string(),
            ));
        }

        if self.min_x >= self.max_x || self.min_y >= self.max_y {
            return Err(TinError::InvalidParameters(format!(
                "Domain must have positive extent, got ({}, {}) - ({}, {})",
                self.min_x, self.min_y, self.max_x, self.max_y
            )));
        }

        if !self.max_elevation.is_finite() || self.max_elevation < 0.0 {
            return Err(TinError::InvalidParameters(
                "Maximum elevation must be finite and non-negative".to_string(),
            ));
        }

        if !self.xy_scale.is_finite() || self.xy_scale <= 0.0 {
            return Err(TinError::InvalidParameters(
                "XY scale must be positive".to_string(),
            ));
        }

        if !self.breakline.is_empty() && (self.breakline.len() % 3 != 0 || self.breakline.len() < 6)
        {
            return Err(TinError::InvalidParameters(format!(
                "Breakline needs at least two x,y,z triples, got {} values",
                self.breakline.len()
            )));
        }

        if !self.elevation_at.is_empty() && self.elevation_at.len() != 2 {
            return Err(TinError::InvalidParameters(format!(
                "Elevation query needs exactly x,y, got {} values",
                self.elevation_at.len()
            )));
        }

        Ok(())
    }
}

/// Configuration presets for tests and benchmarks.
#[derive(Debug, Clone)]
pub struct TestConfig;

impl TestConfig {
    /// A small, fast configuration suitable for unit tests.
    #[must_use]
    pub const fn small() -> TinConfig {
        let mut config = TinConfig::new(16);
        config.seed = Some(7);
        config
    }

    /// A medium-sized configuration for integration tests.
    #[must_use]
    pub const fn medium() -> TinConfig {
        let mut config = TinConfig::new(256);
        config.seed = Some(42);
        config
    }

    /// A large configuration for performance testing.
    #[must_use]
    pub const fn large() -> TinConfig {
        let mut config = TinConfig::new(4096);
        config.max_x = 1000.0;
        config.max_y = 1000.0;
        config.seed = Some(1234);
        config
    }
}
