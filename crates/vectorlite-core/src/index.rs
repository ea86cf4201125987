//! The capability contract a vector index must satisfy.
//!
//! Deliberately plain and synchronous rather than `async_trait`: the
//! algorithms behind it have no suspension points of their own, they're
//! CPU-bound graph/array walks, and an async signature would only push a
//! runtime dependency into a crate that doesn't need one.

use crate::entry::{Entry, EntryId, ScoredEntry};
use crate::vector::Vector;

/// A vector index: something that can absorb entries and answer
/// approximate-or-exact nearest neighbor queries against them.
pub trait Index {
    /// Inserts a new entry, assigning it the next id, and returns that id.
    fn add_entry(&mut self, vector: Vector, metadata: std::collections::HashMap<String, String>) -> EntryId;

    /// Returns up to `k` nearest entries to `query`, scored under `metric`,
    /// ordered by ascending score (closest first).
    fn query(&self, query: &Vector, k: usize, metric: crate::vector::Metric) -> Vec<ScoredEntry>;

    /// Returns every stored entry, in insertion order.
    fn list_entries(&self) -> Vec<Entry>;

    /// Returns the number of stored entries.
    fn len(&self) -> usize;

    /// Returns `true` when no entries have been inserted.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
