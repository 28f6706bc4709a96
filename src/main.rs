//! Triangulated Irregular Network binary executable.
//!
//! Builds a rectangle-seeded TIN from random nodes, optionally forces a breakline
//! into it and reports the elevation at a query point.

use triangulated_irregular_network::{TinConfig, run};

fn main() {
    // Initialize logging
    env_logger::init();

    let config = TinConfig::from_args();
    match run(&config) {
        Ok(summary) => {
            log::info!(
                "TIN built successfully: {} triangles over {} nodes",
                summary.triangle_count,
                summary.node_count
            );
            if let Some(z) = summary.elevation {
                println!("{z}");
            }
        }
        Err(e) => {
            log::error!("TIN construction failed: {e}");
            std::process::exit(1);
        }
    }
}
