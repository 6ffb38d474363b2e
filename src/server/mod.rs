//! HTTP front-end.
//!
//! - `POST /fit`: fit one request body, 200 with the result or 400/500 with an error body
//! - `GET /health`: liveness probe
//!
//! Handlers share only the immutable [`AppState`]; every request is fitted independently.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tracing::info;

use crate::domain::FitConfig;
use crate::error::AppError;

pub mod handlers;

/// Immutable state shared by all handlers.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub config: FitConfig,
}

/// Build the service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/fit", post(handlers::fit))
        .route("/health", get(handlers::health))
        .with_state(Arc::new(state))
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<(), AppError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::new(2, format!("Failed to bind {addr}: {e}")))?;
    let local = listener
        .local_addr()
        .map_err(|e| AppError::new(2, format!("Failed to read local address: {e}")))?;

    info!(
        addr = %local,
        max_iterations = state.config.max_iterations,
        bounds = ?state.config.bounds,
        "listening"
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::new(2, format!("Server error: {e}")))?;

    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}
