//! HTTP service exposing database lifecycle, bulk entry insertion, entry
//! listing, and nearest-neighbor query — backed by a
//! `vectorlite_index::Registry` held in shared state.

pub mod config;
pub mod error;
pub mod handlers;
pub mod rest;
pub mod state;

pub use config::EngineConfig;
pub use error::ApiError;
pub use rest::build_router;
pub use state::AppState;

use tokio::net::TcpListener;
use tracing::info;

/// Boots the HTTP server using the given configuration, returning once the
/// listener is closed (graceful shutdown on Ctrl-C/SIGTERM).
pub async fn run_server(config: EngineConfig) -> std::io::Result<()> {
    let state = AppState::new((&config.hnsw).into());
    let app = build_router(state);

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    info!(address = %config.server.bind_address, "vectorlite-api listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C signal handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received CTRL+C, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
