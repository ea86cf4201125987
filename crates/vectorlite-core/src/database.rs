//! A named, single-backend vector database.
//!
//! Generic over the backend so this crate never needs to know about
//! concrete index implementations — `vectorlite-index` is the first crate
//! aware of both `BruteForceIndex` and `HnswIndex`, and it's the one that
//! assembles the tagged `Index` enum and the `Registry` that holds
//! `Database<Index>` values.

use crate::entry::{Entry, EntryId, ScoredEntry};
use crate::index::Index;
use crate::vector::{Metric, Vector};
use std::collections::HashMap;

/// A database: a name plus one index backend. Id assignment is delegated
/// entirely to the backend (each backend keeps its own dense counter,
/// a per-algorithm `len(entries) + 1` scheme), so `Database` itself holds
/// no mutable counter state.
#[derive(Debug)]
pub struct Database<I: Index> {
    name: String,
    backend: I,
}

impl<I: Index> Database<I> {
    /// Creates a new, empty database wrapping `backend`.
    #[must_use]
    pub fn new(name: impl Into<String>, backend: I) -> Self {
        Self {
            name: name.into(),
            backend,
        }
    }

    /// The database's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inserts a vector with metadata, returning the assigned id.
    pub fn add_entry(
        &mut self,
        vector: Vector,
        metadata: HashMap<String, String>,
    ) -> EntryId {
        self.backend.add_entry(vector, metadata)
    }

    /// Returns up to `k` nearest entries to `query`, scored under `metric`.
    #[must_use]
    pub fn query(&self, query: &Vector, k: usize, metric: Metric) -> Vec<ScoredEntry> {
        self.backend.query(query, k, metric)
    }

    /// Returns every stored entry, in insertion order.
    #[must_use]
    pub fn list_entries(&self) -> Vec<Entry> {
        self.backend.list_entries()
    }

    /// Number of entries currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.backend.len()
    }

    /// `true` when the database holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.backend.is_empty()
    }

    /// Borrows the underlying backend.
    #[must_use]
    pub fn backend(&self) -> &I {
        &self.backend
    }

    /// Mutably borrows the underlying backend.
    pub fn backend_mut(&mut self) -> &mut I {
        &mut self.backend
    }
}
