//! HTTP API route definitions.

use std::net::SocketAddr;

use axum::{http::Method, routing::get, Router};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::handlers::{health, not_found, prometheus, results, AppState};
use crate::error::Result;
use crate::utils::shutdown_signal;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS]);

    let mut router = Router::new()
        // Health endpoint
        .route("/health", get(health))
        // Results endpoint
        .route("/api/results", get(results));

    if state.metrics.is_some() {
        router = router.route("/metrics", get(prometheus));
    }

    router
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Bind the API listener.
pub async fn bind(addr: SocketAddr) -> Result<TcpListener> {
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);
    Ok(listener)
}

/// Serve the API on `listener` until SIGINT/SIGTERM.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}
