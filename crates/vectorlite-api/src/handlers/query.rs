//! `/query` handler: nearest-neighbor lookup.

use std::str::FromStr;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use vectorlite_core::{Metric, Vector};

use crate::error::ApiError;
use crate::handlers::entries::EntryJson;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub database: String,
    pub vector: Vec<f64>,
    pub k: usize,
    pub metric: String,
}

#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub entries: Vec<EntryJson>,
}

/// Runs a nearest-neighbor query. An unrecognized `metric` string is not a
/// hard error: the request still answers with up to `k` entries in
/// unspecified order, the HTTP-layer equivalent of every candidate scoring
/// `+∞` under `distance_score`.
pub async fn query(
    State(state): State<AppState>,
    Json(req): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, ApiError> {
    info!(database = %req.database, k = req.k, metric = %req.metric, "querying");

    let registry = state.registry().read();
    let database = registry.get(&req.database)?;
    let query_vector = Vector::new(req.vector);

    let entries = match Metric::from_str(&req.metric) {
        Ok(metric) => database
            .query(&query_vector, req.k, metric)
            .into_iter()
            .map(|scored| scored.entry.into())
            .collect(),
        Err(_) => {
            warn!(metric = %req.metric, "unrecognized metric, returning unranked entries");
            database
                .list_entries()
                .into_iter()
                .take(req.k)
                .map(EntryJson::from)
                .collect()
        }
    };

    Ok(Json(QueryResponse { entries }))
}
