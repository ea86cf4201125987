//! Exhaustive linear-scan index — the correctness oracle the HNSW recall
//! tests are checked against.

use std::collections::HashMap;

use vectorlite_core::{Entry, EntryId, Index, Metric, ScoredEntry, Vector};

/// Brute-force index: scores every stored entry against the query on each
/// call. O(n·d) per query, O(1) per insert. Ids are dense and 1-based,
/// assigned in insertion order.
#[derive(Debug, Default)]
pub struct BruteForceIndex {
    entries: Vec<Entry>,
}

impl BruteForceIndex {
    /// Creates an empty brute-force index.
    #[must_use]
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }
}

impl Index for BruteForceIndex {
    fn add_entry(&mut self, vector: Vector, metadata: HashMap<String, String>) -> EntryId {
        let id = EntryId::new(self.entries.len() as u64 + 1);
        self.entries.push(Entry::new(id, vector, metadata));
        id
    }

    #[tracing::instrument(skip(self, query), fields(k, metric = metric.as_str(), n = self.entries.len()))]
    fn query(&self, query: &Vector, k: usize, metric: Metric) -> Vec<ScoredEntry> {
        if k == 0 {
            return Vec::new();
        }

        let mut scored: Vec<ScoredEntry> = self
            .entries
            .iter()
            .map(|entry| ScoredEntry {
                entry: entry.clone(),
                score: entry.vector.distance_score(query, metric),
            })
            .collect();

        // Stable sort: ties keep insertion order.
        scored.sort_by(|a, b| a.score.total_cmp(&b.score));
        scored.truncate(k);
        scored
    }

    fn list_entries(&self) -> Vec<Entry> {
        self.entries.clone()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
