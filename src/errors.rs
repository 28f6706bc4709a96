//! Error types for the TIN library.

/// Main error type for TIN operations.
///
/// Geometric edge cases (a node outside the domain, a breakline that misses every
/// triangle) are not errors; they are reported as no-ops by the operations themselves.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TinError {
    /// Invalid construction or configuration parameters
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// The seed envelope is empty, inverted or not finite
    #[error("Invalid envelope [{min_x}, {min_y}] - [{max_x}, {max_y}]: {reason}")]
    InvalidEnvelope {
        /// Minimum x of the rejected envelope
        min_x: f64,
        /// Minimum y of the rejected envelope
        min_y: f64,
        /// Maximum x of the rejected envelope
        max_x: f64,
        /// Maximum y of the rejected envelope
        max_y: f64,
        /// Why the envelope was rejected
        reason: String,
    },

    /// Three corners that do not span any area
    #[error("Degenerate triangle: corners {0} are collinear")]
    DegenerateTriangle(String),

    /// A coordinate with a non-finite x or y
    #[error("Invalid coordinate ({x}, {y}): x and y must be finite")]
    InvalidCoordinate {
        /// Rejected x ordinate
        x: f64,
        /// Rejected y ordinate
        y: f64,
    },

    /// The triangle snapshot index is older than the triangulation
    #[error(
        "Triangle index is stale (built at modification {built_at}, triangulation is at {current}); call build_index() first"
    )]
    StaleIndex {
        /// Modification count when the snapshot was built
        built_at: u64,
        /// Current modification count
        current: u64,
    },
}

/// Result type for TIN operations.
pub type TinResult<T> = Result<T, TinError>;
