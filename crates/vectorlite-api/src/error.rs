//! HTTP-facing error type: maps `CoreError` onto the status codes the
//! service exposes externally (409, 404, 400).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use vectorlite_core::CoreError;

#[derive(Debug)]
pub enum ApiError {
    Validation(String),
    Conflict(String),
    NotFound(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::AlreadyExists { .. } => ApiError::Conflict(err.to_string()),
            CoreError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            CoreError::UnknownAlgorithm { .. } => ApiError::Validation(err.to_string()),
            CoreError::InvalidState { .. } => ApiError::Validation(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
