//! Builds the Axum router exposing the database lifecycle, entry, and
//! query HTTP endpoints.

use axum::extract::Request;
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use tower_http::classify::ServerErrorsFailureClass;
use tower_http::trace::TraceLayer;
use tracing::{info_span, Span};

use crate::handlers::{
    add_entries, create_database, delete_database, list_databases, list_entries, query,
};
use crate::state::AppState;

/// Builds the Axum router hosting the HTTP facade over a `Registry`.
#[must_use]
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/databases", get(list_databases).post(create_database))
        .route("/databases/:name", axum::routing::delete(delete_database))
        .route("/entries", get(list_entries).post(add_entries))
        .route("/query", post(query))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request| {
                    info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                })
                .on_response(|response: &Response, latency: std::time::Duration, _span: &Span| {
                    tracing::info!(
                        status = %response.status(),
                        latency_ms = latency.as_millis(),
                        "request completed"
                    );
                })
                .on_failure(
                    |failure_class: ServerErrorsFailureClass, latency: std::time::Duration, _span: &Span| {
                        tracing::error!(
                            failure_class = ?failure_class,
                            latency_ms = latency.as_millis(),
                            "request failed"
                        );
                    },
                ),
        )
}
