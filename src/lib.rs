#![allow(clippy::multiple_crate_versions)]
#![warn(missing_docs)]

//! Triangulated Irregular Networks with breakline constraints.
//!
//! This library builds a terrain surface from a seed rectangle (or triangle) by
//! incremental node insertion, forces breaklines into the mesh, and answers
//! elevation and range queries against it.
//!
//! # Key Features
//!
//! - Bowyer-Watson node insertion driven by a circumcircle spatial index
//! - Breakline insertion with corner and edge snapping tolerances
//! - Planar elevation interpolation and polyline draping
//! - Pluggable spatial index backends (`rstar` R*-tree or a linear scan)
//! - Fixed-grid precision models for node and breakline coordinates
//!
//! # Example
//!
//! ```rust
//! use triangulated_irregular_network::{Coordinate, Envelope, TriangulatedIrregularNetwork};
//!
//! let mut tin = TriangulatedIrregularNetwork::new(Envelope::new(0.0, 0.0, 10.0, 10.0))?;
//! tin.insert_node(Coordinate::new(5.0, 5.0, 2.0));
//! tin.build_index();
//! assert_eq!(tin.triangle_count(), 4);
//! assert_eq!(tin.elevation(&Coordinate::new_2d(5.0, 5.0)), 2.0);
//! # Ok::<(), triangulated_irregular_network::TinError>(())
//! ```

// Module declarations (avoiding mod.rs files)
/// Error types for the TIN library.
pub mod errors;

/// Tolerances, network options and the command line configuration.
pub mod config;

/// Random node generation.
pub mod util;

/// Planar geometry primitives used by the network.
pub mod geometry {
    /// Circles and circumcircles.
    pub mod circle;
    /// Coordinates and orientation predicates.
    pub mod coordinate;
    /// Axis-aligned envelopes.
    pub mod envelope;
    /// Indexed mesh export.
    pub mod mesh;
    /// Coordinate precision models.
    pub mod precision;
    /// Line segments.
    pub mod segment;
    /// Clockwise triangles.
    pub mod triangle;
}

/// Spatial indexing abstraction.
///
/// The network only talks to [`index::traits::SpatialIndex`], so the backend can be
/// swapped without touching triangulation code.
pub mod index {
    /// Core spatial index traits.
    pub mod traits;

    /// Spatial index backend implementations.
    pub mod backends {
        /// Brute-force backend for testing.
        pub mod linear;
        /// R*-tree backend - wraps the `rstar` crate.
        pub mod rtree;
    }
}

/// The triangulated irregular network and its insertion algorithms.
pub mod tin {
    /// Breakline topology cases and triangle splitting.
    pub mod breakline;
    /// The network itself.
    pub mod network;
    /// Insertion outcomes and counters.
    pub mod statistics;
}

// Re-exports for convenience
pub use config::{IndexBackend, TestConfig, TinConfig, TinOptions, Tolerances};
pub use errors::{TinError, TinResult};
pub use geometry::coordinate::Coordinate;
pub use geometry::envelope::Envelope;
pub use geometry::mesh::Mesh;
pub use geometry::precision::{Precision, PrecisionModel};
pub use geometry::segment::LineSegment;
pub use geometry::triangle::Triangle;
pub use index::backends::linear::LinearIndex;
pub use index::backends::rtree::RTreeIndex;
pub use index::traits::SpatialIndex;
pub use tin::network::{Seed, TriangleId, TriangulatedIrregularNetwork};
pub use tin::statistics::{NodeInsertion, TinStatistics};

/// What one run of the `tin` binary produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Name of the spatial index backend
    pub index: &'static str,
    /// Random nodes offered to the network
    pub nodes_requested: u32,
    /// Triangles in the final network
    pub triangle_count: usize,
    /// Distinct vertices in the final network
    pub node_count: usize,
    /// Summed triangle area
    pub total_area: f64,
    /// Triangles replaced by the breakline, if one was given
    pub breakline_splits: Option<usize>,
    /// Interpolated elevation at the query point, if one was given
    pub elevation: Option<f64>,
    /// Insertion counters
    pub statistics: TinStatistics,
}

/// Builds a network from `config` on the configured index backend.
///
/// # Errors
///
/// Returns [`TinError::InvalidParameters`] for an invalid configuration, and any
/// error raised while seeding the network or inserting the breakline.
pub fn run(config: &TinConfig) -> TinResult<RunSummary> {
    config.validate()?;
    log::info!(
        "Domain: [{}, {}] - [{}, {}]",
        config.min_x,
        config.min_y,
        config.max_x,
        config.max_y
    );
    log::info!("Number of nodes: {}", config.points);

    match config.index {
        IndexBackend::RTree => run_with_index::<RTreeIndex<TriangleId>>(config),
        IndexBackend::Linear => run_with_index::<LinearIndex<TriangleId>>(config),
    }
}

fn run_with_index<I>(config: &TinConfig) -> TinResult<RunSummary>
where
    I: SpatialIndex<TriangleId> + Default,
{
    let envelope = config.envelope();
    let mut tin: TriangulatedIrregularNetwork<I> =
        TriangulatedIrregularNetwork::with_seed(Seed::Rectangle(envelope), config.options())?;

    let nodes = util::generate_nodes_with_context(
        config.points,
        &envelope,
        config.max_elevation,
        config.seed,
    )?;
    let inserted = tin.insert_nodes(nodes);
    log::info!(
        "Inserted {inserted} of {} nodes ({:.1}%)",
        config.points,
        tin.statistics().insertion_rate() * 100.0
    );

    let breakline = config.breakline_coordinates();
    let breakline_splits = if breakline.is_empty() {
        None
    } else {
        let splits = tin.insert_breakline(&breakline)?;
        log::info!(
            "Breakline with {} vertices replaced {splits} triangles",
            breakline.len()
        );
        Some(splits)
    };

    tin.build_index();
    let elevation = config.query_point().map(|point| {
        let z = tin.elevation(&point);
        log::info!("Elevation at ({}, {}): {z}", point.x, point.y);
        z
    });

    log::info!(
        "Triangulation has {} nodes and {} triangles covering area {:.3}",
        tin.node_count(),
        tin.triangle_count(),
        tin.total_area()
    );

    Ok(RunSummary {
        index: tin.index_name(),
        nodes_requested: config.points,
        triangle_count: tin.triangle_count(),
        node_count: tin.node_count(),
        total_area: tin.total_area(),
        breakline_splits,
        elevation,
        statistics: tin.statistics().clone(),
    })
}

#[cfg(test)]
mod lib_tests {
    use super::*;
    use approx::assert_relative_eq;

    fn create_test_config() -> TinConfig {
        let mut config = TinConfig::new(32);
        config.seed = Some(7);
        config
    }

    #[test]
    fn test_run() {
        let summary = run(&create_test_config()).expect("Failed to run triangulation");
        assert_eq!(summary.index, "rtree");
        assert_eq!(summary.nodes_requested, 32);
        assert!(summary.triangle_count >= 2);
        assert_relative_eq!(summary.total_area, 10_000.0, epsilon = 1e-6);
        assert_eq!(summary.breakline_splits, None);
        assert_eq!(summary.elevation, None);
        assert_eq!(summary.statistics.nodes_attempted, 32);
    }

    #[test]
    fn test_run_is_reproducible_across_backends() {
        let config = create_test_config();
        let mut linear = config.clone();
        linear.index = IndexBackend::Linear;

        let a = run(&config).expect("rtree run");
        let b = run(&linear).expect("linear run");
        assert_eq!(b.index, "linear");
        assert_eq!(a.triangle_count, b.triangle_count);
        assert_eq!(a.node_count, b.node_count);
        assert_eq!(a.statistics, b.statistics);
    }

    #[test]
    fn test_run_with_breakline_and_query() {
        let mut config = create_test_config();
        config.breakline = vec![10.0, 50.0, 5.0, 90.0, 50.0, 5.0];
        config.elevation_at = vec![50.0, 50.0];

        let summary = run(&config).expect("Failed to run triangulation");
        assert!(summary.breakline_splits.is_some_and(|n| n > 0));
        assert_relative_eq!(summary.total_area, 10_000.0, epsilon = 1e-6);
        assert!(summary.elevation.is_some_and(f64::is_finite));
    }

    #[test]
    fn test_run_rejects_invalid_config() {
        let mut config = create_test_config();
        config.max_x = config.min_x;
        assert!(matches!(run(&config), Err(TinError::InvalidParameters(_))));
    }
}
