//! Scraping of the source results page.
//!
//! This module handles:
//! - Fetching the page with browser-like headers
//! - Extracting label/value pairs from both page layouts
//! - Matching labels to known markets and redacting values

pub mod client;
pub mod extract;
pub mod results;
pub mod types;

pub use client::SourceClient;
pub use extract::extract_pairs;
pub use results::ResultsScraper;
pub use types::{RawPair, ScrapedEntry};
