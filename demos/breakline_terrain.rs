//! Breakline example for the Triangulated Irregular Network library
//!
//! Builds a rolling terrain from random nodes, forces a ridge line into it and
//! drapes a profile across the ridge.

use log::{LevelFilter, info};
use triangulated_irregular_network::{
    Coordinate, Envelope, Precision, Seed, TinOptions, TriangulatedIrregularNetwork, util,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .init();

    let domain = Envelope::new(0.0, 0.0, 200.0, 100.0);
    // Keep breakline elevations to one decimal instead of whole units.
    let options = TinOptions::default().with_z_precision(Precision::fixed(10.0));
    let mut tin: TriangulatedIrregularNetwork =
        TriangulatedIrregularNetwork::with_seed(Seed::Rectangle(domain), options)?;

    let nodes = util::generate_nodes_with_context(300, &domain, 20.0, Some(7))?;
    tin.insert_nodes(nodes);
    info!("Terrain has {} triangles", tin.triangle_count());

    let ridge = [
        Coordinate::new(10.0, 50.0, 35.5),
        Coordinate::new(80.0, 55.0, 42.0),
        Coordinate::new(140.0, 45.0, 38.25),
        Coordinate::new(190.0, 50.0, 30.0),
    ];
    let replaced = tin.insert_breakline(&ridge)?;
    info!(
        "Ridge replaced {replaced} triangles; terrain now has {} triangles",
        tin.triangle_count()
    );

    tin.build_index();
    let profile: Vec<Coordinate> = (0..=10)
        .map(|i| Coordinate::new_2d(80.0, f64::from(i) * 10.0))
        .collect();
    for point in tin.elevations_along(&profile) {
        info!("  ({:.1}, {:.1}) -> {:.2}", point.x, point.y, point.z);
    }

    info!("Valid partition: {}", tin.is_valid());
    Ok(())
}
