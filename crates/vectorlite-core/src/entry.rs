//! The stored unit of a database: a vector plus caller-supplied metadata.

use crate::vector::Vector;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A dense, 1-based, monotonically increasing identifier assigned by a
/// `Database` at insertion time. Never reused, even after the entry it
/// named is gone — though entry deletion is itself out of scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntryId(u64);

impl EntryId {
    /// Wraps a raw id. Only the `Database` counter should mint new ones;
    /// this is exposed for deserializing ids that arrive over the wire.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw id value.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A vector plus its id and arbitrary string metadata. Metadata is carried
/// and returned verbatim; filtering on it is out of scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub vector: Vector,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl Entry {
    #[must_use]
    pub fn new(id: EntryId, vector: Vector, metadata: HashMap<String, String>) -> Self {
        Self {
            id,
            vector,
            metadata,
        }
    }
}

/// One ranked result from a query: the matched entry and its score under
/// the metric the query was issued with ("smaller is closer").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredEntry {
    pub entry: Entry,
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_id_displays_as_raw_number() {
        assert_eq!(EntryId::new(42).to_string(), "42");
    }

    #[test]
    fn entry_carries_metadata_through() {
        let mut metadata = HashMap::new();
        metadata.insert("source".to_string(), "import".to_string());
        let entry = Entry::new(EntryId::new(1), Vector::new(vec![1.0, 2.0]), metadata.clone());
        assert_eq!(entry.metadata, metadata);
    }
}
