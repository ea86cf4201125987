//! Domain types and the capability contract shared by every index backend:
//! vectors and distance scoring, the entry/id model, the `Index` trait, and
//! the `Database` wrapper around it. Concrete index implementations and the
//! multi-database `Registry` live one layer up, in `vectorlite-index`, so
//! this crate never needs to know `bruteforce` or `hnsw` by name.

pub mod database;
pub mod entry;
pub mod error;
pub mod index;
pub mod vector;

pub use database::Database;
pub use entry::{Entry, EntryId, ScoredEntry};
pub use error::{CoreError, CoreResult};
pub use index::Index;
pub use vector::{Metric, UnknownMetric, Vector};
