//! Indexed mesh export.
//!
//! The network stores loose triangles. [`Mesh`] turns them into shared vertices,
//! undirected edges and faces so callers can count, serialize or render the surface.

use super::coordinate::Coordinate;
use super::triangle::Triangle;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An edge in the mesh
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Indices of the two vertices forming this edge, smaller index first
    pub vertex_indices: (usize, usize),
    /// Whether only one face uses this edge
    pub is_boundary: bool,
}

/// A triangular face in the mesh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Face {
    /// Indices of the corners, in clockwise order
    pub vertex_indices: [usize; 3],
}

/// Complete mesh representation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    /// All vertices in the mesh
    pub vertices: Vec<Coordinate>,
    /// All edges in the mesh
    pub edges: Vec<Edge>,
    /// All faces in the mesh
    pub faces: Vec<Face>,
}

impl Mesh {
    /// Create a new empty mesh
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            edges: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Builds a mesh from triangles, merging corners with identical x and y.
    ///
    /// The first corner seen at a position supplies the vertex elevation.
    #[must_use]
    pub fn from_triangles(triangles: &[Triangle]) -> Self {
        let mut mesh = Self::new();
        let mut vertex_ids: HashMap<(u64, u64), usize> = HashMap::new();
        let mut edge_uses: HashMap<(usize, usize), usize> = HashMap::new();

        for triangle in triangles {
            let corners = *triangle.corners();
            let vertex_indices = corners.map(|corner| {
                *vertex_ids.entry(corner.xy_key()).or_insert_with(|| {
                    mesh.vertices.push(corner);
                    mesh.vertices.len() - 1
                })
            });
            for i in 0..3 {
                let (a, b) = (vertex_indices[i], vertex_indices[(i + 1) % 3]);
                *edge_uses.entry((a.min(b), a.max(b))).or_default() += 1;
            }
            mesh.faces.push(Face { vertex_indices });
        }

        mesh.edges = edge_uses
            .into_iter()
            .map(|(vertex_indices, uses)| Edge {
                vertex_indices,
                is_boundary: uses == 1,
            })
            .collect();
        mesh.edges.sort_by_key(|edge| edge.vertex_indices);
        mesh
    }

    /// Get the number of vertices
    #[must_use]
    pub const fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of edges
    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Get the number of faces
    #[must_use]
    pub const fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Number of edges used by a single face.
    #[must_use]
    pub fn boundary_edge_count(&self) -> usize {
        self.edges.iter().filter(|edge| edge.is_boundary).count()
    }

    /// `V - E + F`, which is 1 for a triangulated disc.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn euler_characteristic(&self) -> i64 {
        self.vertex_count() as i64 - self.edge_count() as i64 + self.face_count() as i64
    }
}
