//! Unified error types for the results service.

use reqwest::StatusCode;
use thiserror::Error;

/// Top-level error type for the service binary.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Built-in market table is malformed.
    #[error("market table error: {0}")]
    Market(#[from] MarketError),

    /// Scraper could not be constructed.
    #[error("scrape error: {0}")]
    Scrape(#[from] ScrapeError),

    /// Listener bind or serve failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures while fetching or reading the source page.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// Source answered with a non-success status.
    #[error("source returned HTTP {status}")]
    Fetch {
        /// Observed status code.
        status: StatusCode,
    },

    /// Request never produced a response (DNS, TLS, timeout, ...).
    #[error("request to source failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Response body could not be read as an HTML document.
    #[error("failed to parse source page: {0}")]
    Parse(String),
}

impl ScrapeError {
    /// Short label used for the outcome metric.
    pub fn kind(&self) -> &'static str {
        match self {
            ScrapeError::Fetch { .. } | ScrapeError::Request(_) => "fetch_error",
            ScrapeError::Parse(_) => "parse_error",
        }
    }
}

/// Market table errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketError {
    /// A time-of-day literal is not `hh:mm AM/PM`.
    #[error("invalid time of day {value:?}, expected hh:mm AM/PM")]
    InvalidTimeOfDay {
        /// The offending literal.
        value: String,
    },
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ServiceError>;
