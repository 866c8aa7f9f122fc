//! Fetch client for the source page.

use std::time::Duration;

use reqwest::header::{ACCEPT_LANGUAGE, REFERER, USER_AGENT};
use reqwest::StatusCode;
use tracing::{debug, instrument};

use crate::config::Config;
use crate::error::ScrapeError;
use crate::metrics;

/// Browser user agent sent with every fetch.
pub const SOURCE_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36";
/// Referer sent with every fetch.
pub const SOURCE_REFERER: &str = "https://www.google.com/";
/// Accept-Language sent with every fetch.
pub const SOURCE_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Single-shot HTTP client for the results page.
#[derive(Debug, Clone)]
pub struct SourceClient {
    /// HTTP client for page requests.
    http: reqwest::Client,
    /// Page to fetch.
    source_url: String,
}

impl SourceClient {
    /// Create a client for the configured source page.
    pub fn new(config: &Config) -> Result<Self, ScrapeError> {
        let timeout = config.http_timeout();
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(5)))
            .build()?;

        Ok(Self {
            http,
            source_url: config.source_url.clone(),
        })
    }

    /// Get the source page URL.
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// Fetch the source page body. Anything but `200 OK` is an error.
    #[instrument(skip(self), fields(url = %self.source_url))]
    pub async fn fetch_page(&self) -> Result<String, ScrapeError> {
        let timer = metrics::timer_source_fetch();

        let response = self
            .http
            .get(&self.source_url)
            .header(USER_AGENT, SOURCE_USER_AGENT)
            .header(REFERER, SOURCE_REFERER)
            .header(ACCEPT_LANGUAGE, SOURCE_ACCEPT_LANGUAGE)
            .send()
            .await?;

        let status = response.status();
        debug!(%status, elapsed_ms = timer.elapsed_ms(), "Source responded");
        if status != StatusCode::OK {
            return Err(ScrapeError::Fetch { status });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ScrapeError::Parse(format!("unreadable response body: {}", e)))?;

        debug!(bytes = body.len(), "Fetched source page");

        Ok(body)
    }
}
