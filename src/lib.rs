//! Daily market results scraper and JSON API.
//!
//! Fetches a public results page, picks out the winning numbers for a fixed
//! set of markets, and republishes them with time-based redaction:
//!
//! ```text
//! before open   ***-**-***
//! open          123-4        (first three characters, then the fourth)
//! after close   123456       (unchanged)
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`market`]: Market table, window evaluation and redaction
//! - [`scrape`]: Source page fetch and extraction
//! - [`api`]: HTTP API for results, health and metrics
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod market;
pub mod metrics;
pub mod scrape;
pub mod utils;

pub use config::Config;
pub use error::{Result, ServiceError};
