use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::server::endpoints::{receive, status};
use crate::types::BotState;

mod endpoints;
mod types;

/// Creates a router that can be used by `axum`.
///
/// # Parameters
/// - `app_state`: The bot state.
///
/// # Returns
/// The router.
pub fn create_router(app_state: Arc<BotState>) -> Router {
    Router::new()
        .route("/", get(status::get_root))
        .route("/health", get(status::get_health))
        .route("/receive", post(receive::post_receive))
        .with_state(app_state)
}

/// Serves the router on all interfaces at the configured port.
pub async fn serve(app_state: Arc<BotState>) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], app_state.config.port));
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, create_router(app_state)).await?;
    Ok(())
}
