//! Basic example of using the Triangulated Irregular Network library
//!
//! This example shows how to:
//! - Seed a TIN from a rectangle
//! - Insert random nodes
//! - Rebuild the triangle snapshot and query elevations
//! - Export the result as an indexed mesh

use log::{LevelFilter, info};
use triangulated_irregular_network::{Coordinate, Envelope, TriangulatedIrregularNetwork, util};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .init();

    info!("Starting basic TIN example");

    let domain = Envelope::new(0.0, 0.0, 100.0, 100.0);
    let mut tin = TriangulatedIrregularNetwork::new(domain)?;

    let nodes = util::generate_nodes_with_context(200, &domain, 50.0, Some(42))?;
    let inserted = tin.insert_nodes(nodes);
    info!(
        "Inserted {inserted} nodes: {} triangles, {} vertices",
        tin.triangle_count(),
        tin.node_count()
    );

    tin.build_index();
    for (x, y) in [(10.0, 10.0), (50.0, 50.0), (99.0, 1.0), (150.0, 0.0)] {
        let z = tin.elevation(&Coordinate::new_2d(x, y));
        info!("  Elevation at ({x}, {y}): {z:.3}");
    }

    let mesh = tin.to_mesh();
    info!(
        "Mesh: {} vertices, {} edges ({} on the boundary), {} faces, Euler characteristic {}",
        mesh.vertex_count(),
        mesh.edge_count(),
        mesh.boundary_edge_count(),
        mesh.face_count(),
        mesh.euler_characteristic()
    );

    let stats = tin.statistics();
    info!(
        "Insertion rate {:.1}% ({} duplicates, {} rejected)",
        stats.insertion_rate() * 100.0,
        stats.nodes_duplicate,
        stats.nodes_rejected
    );

    Ok(())
}
