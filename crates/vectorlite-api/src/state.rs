//! Shared application state for the HTTP service.

use std::sync::Arc;

use parking_lot::RwLock;
use vectorlite_index::{HnswConfig, Registry};

/// A process-wide registry behind one lock. Since `Index` operations have
/// no suspension points, holding this across an `add_entry`/`query` call
/// never blocks the executor.
#[derive(Clone)]
pub struct AppState {
    registry: Arc<RwLock<Registry>>,
    hnsw_config: HnswConfig,
}

impl AppState {
    #[must_use]
    pub fn new(hnsw_config: HnswConfig) -> Self {
        Self {
            registry: Arc::new(RwLock::new(Registry::new())),
            hnsw_config,
        }
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<RwLock<Registry>> {
        &self.registry
    }

    #[must_use]
    pub fn hnsw_config(&self) -> HnswConfig {
        self.hnsw_config
    }
}
