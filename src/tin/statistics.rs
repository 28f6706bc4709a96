//! Counters for node and breakline insertion.

use num_traits::cast::NumCast;

/// Outcome of inserting one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeInsertion {
    /// The node became a vertex
    Inserted {
        /// Triangles whose circumcircle contained the node
        removed: usize,
        /// Triangles fanned around the node
        added: usize,
    },
    /// The node lies outside the seed domain
    OutsideDomain,
    /// A vertex already exists at the node's x/y
    Duplicate,
    /// The cavity around the node could not be re-fanned without overlap
    Rejected,
}

impl NodeInsertion {
    /// Whether the node was added to the mesh.
    #[must_use]
    pub const fn is_inserted(&self) -> bool {
        matches!(self, Self::Inserted { .. })
    }

    /// Change in triangle count caused by the insertion.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn triangle_delta(&self) -> isize {
        match self {
            Self::Inserted { removed, added } => *added as isize - *removed as isize,
            _ => 0,
        }
    }
}

/// Running totals for one network.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TinStatistics {
    /// Nodes offered to `insert_node`
    pub nodes_attempted: u64,
    /// Nodes that became vertices
    pub nodes_inserted: u64,
    /// Nodes outside the seed domain
    pub nodes_outside: u64,
    /// Nodes matching an existing vertex
    pub nodes_duplicate: u64,
    /// Nodes whose cavity was rolled back
    pub nodes_rejected: u64,
    /// Breakline segments offered to `insert_edge`
    pub edges_attempted: u64,
    /// Triangles replaced by breakline pieces
    pub triangles_split: u64,
    /// Triangles touched by a breakline but left unchanged
    pub triangles_unchanged: u64,
}

impl TinStatistics {
    /// Creates a new statistics tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome of one node insertion.
    pub const fn record_node(&mut self, outcome: NodeInsertion) {
        self.nodes_attempted += 1;
        match outcome {
            NodeInsertion::Inserted { .. } => self.nodes_inserted += 1,
            NodeInsertion::OutsideDomain => self.nodes_outside += 1,
            NodeInsertion::Duplicate => self.nodes_duplicate += 1,
            NodeInsertion::Rejected => self.nodes_rejected += 1,
        }
    }

    /// Records one breakline segment.
    pub const fn record_edge(&mut self) {
        self.edges_attempted += 1;
    }

    /// Records a triangle touched by a breakline piece.
    pub const fn record_split(&mut self, replaced: bool) {
        if replaced {
            self.triangles_split += 1;
        } else {
            self.triangles_unchanged += 1;
        }
    }

    /// Fraction of attempted nodes that became vertices.
    ///
    /// # Panics
    ///
    /// This function should never panic as u64 to f64 conversion is always valid.
    #[must_use]
    pub fn insertion_rate(&self) -> f64 {
        if self.nodes_attempted == 0 {
            0.0
        } else {
            <f64 as NumCast>::from(self.nodes_inserted)
                .expect("u64 to f64 conversion should never fail")
                / <f64 as NumCast>::from(self.nodes_attempted)
                    .expect("u64 to f64 conversion should never fail")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_node_statistics() {
        let mut stats = TinStatistics::new();
        assert_relative_eq!(stats.insertion_rate(), 0.0);

        stats.record_node(NodeInsertion::Inserted {
            removed: 2,
            added: 4,
        });
        stats.record_node(NodeInsertion::Inserted {
            removed: 1,
            added: 3,
        });
        stats.record_node(NodeInsertion::Duplicate);
        stats.record_node(NodeInsertion::OutsideDomain);

        assert_eq!(stats.nodes_attempted, 4);
        assert_eq!(stats.nodes_inserted, 2);
        assert_eq!(stats.nodes_duplicate, 1);
        assert_eq!(stats.nodes_outside, 1);
        assert_relative_eq!(stats.insertion_rate(), 0.5);
    }

    #[test]
    fn test_split_statistics() {
        let mut stats = TinStatistics::new();
        stats.record_edge();
        stats.record_split(true);
        stats.record_split(true);
        stats.record_split(false);
        assert_eq!(stats.edges_attempted, 1);
        assert_eq!(stats.triangles_split, 2);
        assert_eq!(stats.triangles_unchanged, 1);
    }

    #[test]
    fn test_node_insertion_outcome() {
        let inserted = NodeInsertion::Inserted {
            removed: 2,
            added: 4,
        };
        assert!(inserted.is_inserted());
        assert_eq!(inserted.triangle_delta(), 2);
        assert!(!NodeInsertion::Rejected.is_inserted());
        assert_eq!(NodeInsertion::Duplicate.triangle_delta(), 0);
    }
}
