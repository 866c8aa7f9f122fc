//! HTTP API handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;

use crate::config::Config;
use crate::error::Result;
use crate::metrics;
use crate::scrape::ResultsScraper;

/// Error body returned whenever a scrape yields nothing.
pub const NO_DATA_MESSAGE: &str =
    "No data scraped. Site may be blocking requests or changed structure.";

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Scraper run once per results request.
    pub scraper: Arc<ResultsScraper>,
    /// Prometheus handle, when the recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state without a metrics endpoint.
    pub fn new(scraper: ResultsScraper) -> Self {
        Self {
            scraper: Arc::new(scraper),
            metrics: None,
        }
    }

    /// Build state with a scraper for the configured source.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(ResultsScraper::new(config)?))
    }

    /// Attach a Prometheus handle so `/metrics` is served.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human readable reason.
    pub error: &'static str,
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Results handler - scrapes on every call.
///
/// Returns 200 with the entries, or 500 with [`NO_DATA_MESSAGE`] when the
/// scrape produced nothing for any reason.
pub async fn results(State(state): State<AppState>) -> Response {
    let entries = state.scraper.scrape().await;

    if entries.is_empty() {
        metrics::inc_results_responses(StatusCode::INTERNAL_SERVER_ERROR.as_u16());
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: NO_DATA_MESSAGE,
            }),
        )
            .into_response();
    }

    metrics::inc_results_responses(StatusCode::OK.as_u16());
    (StatusCode::OK, Json(entries)).into_response()
}

/// Prometheus exposition handler.
pub async fn prometheus(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => handle.render().into_response(),
        None => not_found().await.into_response(),
    }
}

/// Fallback for every unknown path.
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}
