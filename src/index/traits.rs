//! Envelope-keyed spatial index abstraction.
//!
//! The TIN keeps two indexes of triangle handles: one keyed by circumcircle envelopes
//! and one keyed by triangle envelopes. Both only need the operations below, so the
//! index implementation can be swapped without touching the triangulation code.

use crate::geometry::envelope::Envelope;

/// Item types storable in an index.
pub trait IndexItem: Copy + PartialEq + std::fmt::Debug {}

// Blanket implementation for any type satisfying the constraints
impl<T> IndexItem for T where T: Copy + PartialEq + std::fmt::Debug {}

/// Mapping from envelope to item.
///
/// Query results carry no ordering guarantee.
pub trait SpatialIndex<T: IndexItem> {
    /// Index identifier for debugging
    fn index_name(&self) -> &'static str;

    /// Adds `item` under `envelope`.
    fn insert(&mut self, envelope: Envelope, item: T);

    /// Removes `item` stored under exactly `envelope`. Returns whether it was found.
    fn remove(&mut self, envelope: &Envelope, item: &T) -> bool;

    /// All items whose envelope intersects `envelope` (closed bounds).
    fn query(&self, envelope: &Envelope) -> Vec<T>;

    /// Every stored item.
    fn query_all(&self) -> Vec<T>;

    /// Number of stored items.
    fn len(&self) -> usize;

    /// Removes every item.
    fn clear(&mut self);

    /// Whether the index holds no items.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replaces the contents with `entries`.
    fn bulk_load(&mut self, entries: Vec<(Envelope, T)>) {
        self.clear();
        for (envelope, item) in entries {
            self.insert(envelope, item);
        }
    }
}
