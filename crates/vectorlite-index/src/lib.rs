//! Concrete vector index implementations and the multi-database registry.
//!
//! This crate provides the two index backends:
//! - `BruteForceIndex`: exhaustive linear scan, the correctness oracle
//! - `HnswIndex`: HNSW graph-based approximate nearest neighbor search
//!
//! and the `Backend`/`Registry` types that tie a named database to one of
//! them, since `vectorlite-core` deliberately stays ignorant of both.

pub mod brute_force;
pub mod hnsw;
pub mod registry;

pub use brute_force::BruteForceIndex;
pub use hnsw::{HnswConfig, HnswIndex};
pub use registry::{Backend, Registry};
