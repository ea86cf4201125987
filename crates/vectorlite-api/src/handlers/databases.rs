//! `/databases` handlers: create, list, delete.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateDatabaseRequest {
    pub name: String,
    pub algorithm: String,
}

#[derive(Debug, Serialize)]
pub struct CreateDatabaseResponse {
    pub message: String,
    pub name: String,
    pub algorithm: String,
}

pub async fn create_database(
    State(state): State<AppState>,
    Json(req): Json<CreateDatabaseRequest>,
) -> Result<(StatusCode, Json<CreateDatabaseResponse>), ApiError> {
    info!(name = %req.name, algorithm = %req.algorithm, "creating database");

    state
        .registry()
        .write()
        .create(req.name.clone(), &req.algorithm, state.hnsw_config())?;

    Ok((
        StatusCode::CREATED,
        Json(CreateDatabaseResponse {
            message: "database created successfully".to_string(),
            name: req.name,
            algorithm: req.algorithm,
        }),
    ))
}

#[derive(Debug, Serialize)]
pub struct ListDatabasesResponse {
    pub databases: Vec<String>,
}

pub async fn list_databases(State(state): State<AppState>) -> Json<ListDatabasesResponse> {
    let registry = state.registry().read();
    let databases: Vec<String> = registry.list().into_iter().map(str::to_string).collect();
    info!(count = databases.len(), "listing databases");
    Json(ListDatabasesResponse { databases })
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

pub async fn delete_database(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.registry().write().delete(&name)?;
    info!(name = %name, "deleted database");
    Ok(Json(MessageResponse {
        message: "database deleted successfully".to_string(),
    }))
}
