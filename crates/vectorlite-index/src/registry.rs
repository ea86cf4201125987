//! The tagged index enum and the multi-database registry.
//!
//! `vectorlite-core` only knows the `Index` trait; this crate is the first
//! one aware of both concrete backends, so it's where the tagged dispatch
//! enum and the registry that holds `Database<Backend>` values live.

use std::collections::HashMap;

use vectorlite_core::{CoreError, CoreResult, Database, Entry, EntryId, Index, Metric, ScoredEntry, Vector};

use crate::{BruteForceIndex, HnswConfig, HnswIndex};

/// The two index implementations a database can be backed by. A plain
/// match on this enum dispatches to the concrete type — no vtables, no
/// `dyn Trait`.
pub enum Backend {
    BruteForce(BruteForceIndex),
    Hnsw(HnswIndex),
}

impl Index for Backend {
    fn add_entry(&mut self, vector: Vector, metadata: HashMap<String, String>) -> EntryId {
        match self {
            Self::BruteForce(idx) => idx.add_entry(vector, metadata),
            Self::Hnsw(idx) => idx.add_entry(vector, metadata),
        }
    }

    fn query(&self, query: &Vector, k: usize, metric: Metric) -> Vec<ScoredEntry> {
        match self {
            Self::BruteForce(idx) => idx.query(query, k, metric),
            Self::Hnsw(idx) => idx.query(query, k, metric),
        }
    }

    fn list_entries(&self) -> Vec<Entry> {
        match self {
            Self::BruteForce(idx) => idx.list_entries(),
            Self::Hnsw(idx) => idx.list_entries(),
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::BruteForce(idx) => idx.len(),
            Self::Hnsw(idx) => idx.len(),
        }
    }
}

/// The algorithm name a caller asks for when creating a database.
const BRUTE_FORCE: &str = "bruteforce";
const HNSW: &str = "hnsw";

/// A name-keyed map of every live database. Holding it in application state
/// (rather than a process-wide global) keeps `vectorlite-api` testable with
/// an isolated registry per test.
#[derive(Default)]
pub struct Registry {
    databases: HashMap<String, Database<Backend>>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new, empty database backed by the named algorithm
    /// (`"bruteforce"` or `"hnsw"`). `hnsw_config` is ignored when the
    /// algorithm is `"bruteforce"`.
    #[tracing::instrument(skip(self, hnsw_config), fields(name = tracing::field::Empty))]
    pub fn create(
        &mut self,
        name: impl Into<String>,
        algorithm: &str,
        hnsw_config: HnswConfig,
    ) -> CoreResult<()> {
        let name = name.into();
        tracing::Span::current().record("name", &name.as_str());
        if self.databases.contains_key(&name) {
            return Err(CoreError::already_exists("database", name));
        }

        let backend = match algorithm {
            BRUTE_FORCE => Backend::BruteForce(BruteForceIndex::new()),
            HNSW => Backend::Hnsw(HnswIndex::new(hnsw_config)),
            other => return Err(CoreError::unknown_algorithm(other)),
        };

        self.databases.insert(name.clone(), Database::new(name, backend));
        tracing::info!(algorithm, "database created");
        Ok(())
    }

    /// Borrows the named database.
    pub fn get(&self, name: &str) -> CoreResult<&Database<Backend>> {
        self.databases
            .get(name)
            .ok_or_else(|| CoreError::not_found("database", name))
    }

    /// Mutably borrows the named database.
    pub fn get_mut(&mut self, name: &str) -> CoreResult<&mut Database<Backend>> {
        self.databases
            .get_mut(name)
            .ok_or_else(|| CoreError::not_found("database", name))
    }

    /// Lists every database name currently registered.
    #[must_use]
    pub fn list(&self) -> Vec<&str> {
        self.databases.keys().map(String::as_str).collect()
    }

    /// Removes a database by name.
    #[tracing::instrument(skip(self))]
    pub fn delete(&mut self, name: &str) -> CoreResult<()> {
        let result = self
            .databases
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| CoreError::not_found("database", name));
        if result.is_ok() {
            tracing::info!("database deleted");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_rejects_duplicate_name() {
        let mut registry = Registry::new();
        registry.create("a", BRUTE_FORCE, HnswConfig::default()).unwrap();
        let err = registry.create("a", BRUTE_FORCE, HnswConfig::default());
        assert!(matches!(err, Err(CoreError::AlreadyExists { .. })));
    }

    #[test]
    fn create_rejects_unknown_algorithm() {
        let mut registry = Registry::new();
        let err = registry.create("a", "quantum", HnswConfig::default());
        assert!(matches!(err, Err(CoreError::UnknownAlgorithm { .. })));
    }

    #[test]
    fn get_on_missing_database_is_not_found() {
        let registry = Registry::new();
        assert!(matches!(registry.get("missing"), Err(CoreError::NotFound { .. })));
    }

    #[test]
    fn delete_removes_database() {
        let mut registry = Registry::new();
        registry.create("a", BRUTE_FORCE, HnswConfig::default()).unwrap();
        registry.delete("a").unwrap();
        assert!(matches!(registry.get("a"), Err(CoreError::NotFound { .. })));
    }

    #[test]
    fn list_reflects_created_databases() {
        let mut registry = Registry::new();
        registry.create("a", BRUTE_FORCE, HnswConfig::default()).unwrap();
        registry.create("b", HNSW, HnswConfig::default()).unwrap();
        let mut names = registry.list();
        names.sort_unstable();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn entries_round_trip_through_registry() {
        let mut registry = Registry::new();
        registry.create("a", BRUTE_FORCE, HnswConfig::default()).unwrap();
        let db = registry.get_mut("a").unwrap();
        let id = db.add_entry(Vector::new(vec![1.0, 0.0]), HashMap::new());
        assert_eq!(id, EntryId::new(1));
        assert_eq!(registry.get("a").unwrap().len(), 1);
    }
}
