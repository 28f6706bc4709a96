use crate::errors::{TinError, TinResult};
use crate::geometry::coordinate::Coordinate;
use crate::geometry::envelope::Envelope;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

/// Generates random nodes inside `envelope` with elevations in `[0, max_elevation]`.
///
/// With a seed the same nodes are produced on every run.
///
/// # Errors
///
/// Returns [`TinError::InvalidParameters`] if the envelope is empty or not finite, or
/// if `max_elevation` is negative or not finite.
pub fn generate_nodes_with_context(
    count: u32,
    envelope: &Envelope,
    max_elevation: f64,
    seed: Option<u64>,
) -> TinResult<Vec<Coordinate>> {
    let bounds = [envelope.min_x, envelope.min_y, envelope.max_x, envelope.max_y];
    if bounds.iter().any(|v| !v.is_finite()) || envelope.width() <= 0.0 || envelope.height() <= 0.0
    {
        return Err(TinError::InvalidParameters(format!(
            "Cannot generate nodes in {envelope:?}: bounds must be finite with min < max"
        )));
    }
    if !max_elevation.is_finite() || max_elevation < 0.0 {
        return Err(TinError::InvalidParameters(format!(
            "Cannot generate nodes with max elevation {max_elevation}: must be finite and non-negative"
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed.unwrap_or_else(rand::random));
    Ok((0..count)
        .map(|_| {
            Coordinate::new(
                rng.random_range(envelope.min_x..envelope.max_x),
                rng.random_range(envelope.min_y..envelope.max_y),
                rng.random_range(0.0..=max_elevation),
            )
        })
        .collect())
}

/// Generates random nodes.
///
/// # Panics
///
/// Panics if the envelope or elevation bound is invalid.
#[must_use]
pub fn generate_random_nodes(count: u32, envelope: &Envelope, max_elevation: f64) -> Vec<Coordinate> {
    generate_nodes_with_context(count, envelope, max_elevation, None)
        .unwrap_or_else(|e| panic!("Failed to generate {count} random nodes: {e}"))
}

/// Generates seeded nodes for deterministic testing.
///
/// # Panics
///
/// Panics if the envelope or elevation bound is invalid.
#[must_use]
pub fn generate_seeded_nodes(
    count: u32,
    envelope: &Envelope,
    max_elevation: f64,
    seed: u64,
) -> Vec<Coordinate> {
    generate_nodes_with_context(count, envelope, max_elevation, Some(seed))
        .unwrap_or_else(|e| panic!("Failed to generate {count} nodes with seed {seed}: {e}"))
}
