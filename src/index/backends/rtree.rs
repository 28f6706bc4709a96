//! R*-tree index backend - wraps the `rstar` crate.

use crate::geometry::envelope::Envelope;
use crate::index::traits::{IndexItem, SpatialIndex};
use rstar::{AABB, RTree, RTreeObject};

/// An item stored under its envelope.
#[derive(Debug, Clone, PartialEq)]
struct IndexEntry<T> {
    envelope: Envelope,
    item: T,
}

impl<T> RTreeObject for IndexEntry<T> {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        to_aabb(&self.envelope)
    }
}

fn to_aabb(envelope: &Envelope) -> AABB<[f64; 2]> {
    AABB::from_corners(
        [envelope.min_x, envelope.min_y],
        [envelope.max_x, envelope.max_y],
    )
}

/// Envelope index backed by an `rstar::RTree`.
#[derive(Debug, Clone)]
pub struct RTreeIndex<T> {
    tree: RTree<IndexEntry<T>>,
}

impl<T: IndexItem> RTreeIndex<T> {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }
}

impl<T: IndexItem> Default for RTreeIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: IndexItem> SpatialIndex<T> for RTreeIndex<T> {
    fn index_name(&self) -> &'static str {
        "rtree"
    }

    fn insert(&mut self, envelope: Envelope, item: T) {
        self.tree.insert(IndexEntry { envelope, item });
    }

    fn remove(&mut self, envelope: &Envelope, item: &T) -> bool {
        self.tree
            .remove(&IndexEntry {
                envelope: *envelope,
                item: *item,
            })
            .is_some()
    }

    fn query(&self, envelope: &Envelope) -> Vec<T> {
        self.tree
            .locate_in_envelope_intersecting(&to_aabb(envelope))
            .map(|entry| entry.item)
            .collect()
    }

    fn query_all(&self) -> Vec<T> {
        self.tree.iter().map(|entry| entry.item).collect()
    }

    fn len(&self) -> usize {
        self.tree.size()
    }

    fn clear(&mut self) {
        self.tree = RTree::new();
    }

    fn bulk_load(&mut self, entries: Vec<(Envelope, T)>) {
        let entries = entries
            .into_iter()
            .map(|(envelope, item)| IndexEntry { envelope, item })
            .collect();
        self.tree = RTree::bulk_load(entries);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(x: f64, y: f64) -> Envelope {
        Envelope::new(x, y, x + 1.0, y + 1.0)
    }

    #[test]
    fn test_insert_query_remove() {
        let mut index = RTreeIndex::new();
        index.insert(unit(0.0, 0.0), 1_usize);
        index.insert(unit(5.0, 5.0), 2);
        index.insert(unit(0.5, 0.5), 3);
        assert_eq!(index.len(), 3);
        assert_eq!(index.index_name(), "rtree");

        let mut hits = index.query(&Envelope::new(0.9, 0.9, 0.9, 0.9));
        hits.sort_unstable();
        assert_eq!(hits, vec![1, 3]);

        assert!(index.remove(&unit(0.0, 0.0), &1));
        assert!(!index.remove(&unit(0.0, 0.0), &1));
        // Same item under a different envelope is not removed.
        assert!(!index.remove(&unit(1.0, 1.0), &2));
        assert_eq!(index.query(&unit(0.0, 0.0)), vec![3]);
    }

    #[test]
    fn test_touching_envelopes_intersect() {
        let mut index = RTreeIndex::new();
        index.insert(unit(0.0, 0.0), 'a');
        assert_eq!(index.query(&unit(1.0, 1.0)), vec!['a']);
        assert!(index.query(&unit(1.5, 1.5)).is_empty());
    }

    #[test]
    fn test_bulk_load_and_clear() {
        let mut index = RTreeIndex::new();
        index.insert(unit(100.0, 100.0), 99_usize);
        index.bulk_load((0..10).map(|i| (unit(i as f64, 0.0), i)).collect());
        assert_eq!(index.len(), 10);
        assert!(index.query(&unit(100.0, 100.0)).is_empty());
        let mut all = index.query_all();
        all.sort_unstable();
        assert_eq!(all, (0..10).collect::<Vec<_>>());
        index.clear();
        assert!(index.is_empty());
    }
}
