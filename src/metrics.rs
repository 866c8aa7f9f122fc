//! Prometheus metrics for scrape outcomes and upstream latency.
//!
//! This module provides metrics for:
//! - Source page fetch latency
//! - Scrape outcomes (ok, empty, fetch_error, parse_error)
//! - Entries returned per scrape
//! - Results endpoint responses by status

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::{debug, warn};

// === Metric Name Constants ===

/// Source page fetch latency metric name.
pub const METRIC_SOURCE_FETCH_LATENCY: &str = "source_fetch_latency_ms";
/// Scrapes counter metric name, labeled by outcome.
pub const METRIC_SCRAPES: &str = "scrapes_total";
/// Entries returned counter metric name.
pub const METRIC_ENTRIES_SCRAPED: &str = "entries_scraped_total";
/// Results endpoint responses counter metric name, labeled by status.
pub const METRIC_RESULTS_RESPONSES: &str = "results_responses_total";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_SOURCE_FETCH_LATENCY,
        "Source page fetch latency in milliseconds"
    );

    describe_counter!(METRIC_SCRAPES, "Total number of scrapes by outcome");
    describe_counter!(
        METRIC_ENTRIES_SCRAPED,
        "Total number of market entries returned by scrapes"
    );
    describe_counter!(
        METRIC_RESULTS_RESPONSES,
        "Total number of results endpoint responses by status"
    );

    debug!("Metrics initialized");
}

/// Install the global Prometheus recorder and return a handle for rendering.
///
/// Returns `None` if a recorder is already installed.
pub fn install_recorder() -> Option<PrometheusHandle> {
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            init_metrics();
            Some(handle)
        }
        Err(e) => {
            warn!(error = %e, "Failed to install metrics recorder");
            None
        }
    }
}

/// Increment the scrape counter for an outcome.
pub fn inc_scrapes(outcome: &'static str) {
    counter!(METRIC_SCRAPES, "outcome" => outcome).increment(1);
}

/// Add to the scraped entries counter.
pub fn add_entries_scraped(count: usize) {
    counter!(METRIC_ENTRIES_SCRAPED).increment(count as u64);
}

/// Increment the results responses counter.
pub fn inc_results_responses(status: u16) {
    counter!(METRIC_RESULTS_RESPONSES, "status" => status.to_string()).increment(1);
}

/// Histogram timer that records when dropped, so early returns are measured too.
pub struct LatencyTimer {
    started: Instant,
    histogram: &'static str,
}

impl LatencyTimer {
    /// Start timing into `histogram`.
    pub fn new(histogram: &'static str) -> Self {
        Self {
            started: Instant::now(),
            histogram,
        }
    }

    /// Milliseconds since the timer started; used for log fields.
    pub fn elapsed_ms(&self) -> f64 {
        millis_since(self.started)
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        histogram!(self.histogram).record(millis_since(self.started));
    }
}

fn millis_since(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// Create a latency timer for the source page fetch.
pub fn timer_source_fetch() -> LatencyTimer {
    LatencyTimer::new(METRIC_SOURCE_FETCH_LATENCY)
}
