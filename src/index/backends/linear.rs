//! Brute-force index backend for testing.
//!
//! Every query scans all entries. It shares no code with the R*-tree backend, which
//! makes it a reference for checking that triangulation results do not depend on the
//! index.

use crate::geometry::envelope::Envelope;
use crate::index::traits::{IndexItem, SpatialIndex};

/// Envelope index backed by a plain vector.
#[derive(Debug, Clone)]
pub struct LinearIndex<T> {
    entries: Vec<(Envelope, T)>,
}

impl<T: IndexItem> LinearIndex<T> {
    /// Creates an empty index.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: IndexItem> Default for LinearIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: IndexItem> SpatialIndex<T> for LinearIndex<T> {
    fn index_name(&self) -> &'static str {
        "linear"
    }

    fn insert(&mut self, envelope: Envelope, item: T) {
        self.entries.push((envelope, item));
    }

    fn remove(&mut self, envelope: &Envelope, item: &T) -> bool {
        let position = self
            .entries
            .iter()
            .position(|(e, i)| e == envelope && i == item);
        position.map(|p| self.entries.swap_remove(p)).is_some()
    }

    fn query(&self, envelope: &Envelope) -> Vec<T> {
        self.entries
            .iter()
            .filter(|(e, _)| e.intersects(envelope))
            .map(|(_, item)| *item)
            .collect()
    }

    fn query_all(&self) -> Vec<T> {
        self.entries.iter().map(|(_, item)| *item).collect()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}
