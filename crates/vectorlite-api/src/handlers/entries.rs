//! `/entries` handlers: bulk insert and listing.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;
use vectorlite_core::{Entry, Vector};

use crate::error::ApiError;
use crate::handlers::databases::MessageResponse;
use crate::state::AppState;

/// Wire shape for a stored entry.
#[derive(Debug, Serialize)]
pub struct EntryJson {
    pub id: u64,
    pub vector: Vec<f64>,
    pub metadata: HashMap<String, String>,
}

impl From<Entry> for EntryJson {
    fn from(entry: Entry) -> Self {
        Self {
            id: entry.id.get(),
            vector: entry.vector.values().to_vec(),
            metadata: entry.metadata,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddEntriesRequest {
    pub database: String,
    pub vectors: Vec<Vec<f64>>,
    pub metadatas: Vec<HashMap<String, String>>,
}

pub async fn add_entries(
    State(state): State<AppState>,
    Json(req): Json<AddEntriesRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    info!(
        database = %req.database,
        count = req.vectors.len(),
        "adding entries"
    );

    let mut registry = state.registry().write();
    let database = registry.get_mut(&req.database)?;

    for (vector, metadata) in req.vectors.into_iter().zip(req.metadatas.into_iter()) {
        database.add_entry(Vector::new(vector), metadata);
    }

    Ok(Json(MessageResponse {
        message: "entries added successfully".to_string(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct ListEntriesQuery {
    pub database: String,
}

#[derive(Debug, Serialize)]
pub struct ListEntriesResponse {
    pub entries: Vec<EntryJson>,
}

pub async fn list_entries(
    State(state): State<AppState>,
    Query(params): Query<ListEntriesQuery>,
) -> Result<Json<ListEntriesResponse>, ApiError> {
    let registry = state.registry().read();
    let database = registry.get(&params.database)?;

    let entries: Vec<EntryJson> = database.list_entries().into_iter().map(EntryJson::from).collect();
    info!(database = %params.database, count = entries.len(), "listing entries");

    Ok(Json(ListEntriesResponse { entries }))
}
