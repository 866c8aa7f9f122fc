//! Fetch, extract, match and redact in one pass.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use super::client::SourceClient;
use super::extract::extract_pairs;
use super::types::{RawPair, ScrapedEntry};
use crate::config::Config;
use crate::error::ScrapeError;
use crate::market::{classify, find_market, redact, Clock, SystemClock};
use crate::metrics;

/// Scrapes the source page into redacted market results.
#[derive(Clone)]
pub struct ResultsScraper {
    client: SourceClient,
    clock: Arc<dyn Clock>,
    dedupe: bool,
}

impl ResultsScraper {
    /// Create a scraper from config, using the system clock.
    pub fn new(config: &Config) -> Result<Self, ScrapeError> {
        let clock = config
            .market_utc_offset_minutes
            .and_then(SystemClock::with_offset_minutes)
            .unwrap_or_else(SystemClock::local);

        Ok(Self {
            client: SourceClient::new(config)?,
            clock: Arc::new(clock),
            dedupe: config.dedupe_results,
        })
    }

    /// Replace the clock used to evaluate market windows.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Get the source page URL.
    pub fn source_url(&self) -> &str {
        self.client.source_url()
    }

    /// Scrape the source page, collapsing every failure into an empty result.
    ///
    /// Failures are logged; callers cannot tell a failed fetch from a page
    /// with no known markets.
    #[instrument(skip(self), fields(url = %self.source_url()))]
    pub async fn scrape(&self) -> Vec<ScrapedEntry> {
        info!("Scraping results");

        match self.try_scrape().await {
            Ok(entries) if entries.is_empty() => {
                warn!("No known markets found on source page");
                metrics::inc_scrapes("empty");
                entries
            }
            Ok(entries) => {
                info!(count = entries.len(), "Scrape complete");
                metrics::inc_scrapes("ok");
                metrics::add_entries_scraped(entries.len());
                entries
            }
            Err(e) => {
                error!(error = %e, "Scrape failed");
                metrics::inc_scrapes(e.kind());
                Vec::new()
            }
        }
    }

    /// Scrape the source page, reporting fetch and parse failures.
    pub async fn try_scrape(&self) -> Result<Vec<ScrapedEntry>, ScrapeError> {
        let body = self.client.fetch_page().await?;
        let pairs = extract_pairs(&body);
        Ok(self.resolve(pairs))
    }

    /// Match pairs against the market table and redact their values.
    ///
    /// Pairs with an unknown label or an empty value are dropped.
    pub fn resolve(&self, pairs: Vec<RawPair>) -> Vec<ScrapedEntry> {
        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(pairs.len());

        for RawPair { label, value } in pairs {
            let Some(market) = find_market(&label) else {
                debug!(label = %label, "Skipping unknown market");
                continue;
            };
            if value.is_empty() {
                debug!(market = market.name, "Skipping market without a result");
                continue;
            }
            if self.dedupe && !seen.insert(market.name) {
                debug!(market = market.name, "Skipping repeated market");
                continue;
            }

            let state = classify(self.clock.now(), market);
            entries.push(ScrapedEntry {
                winning_number: redact(&value, state),
                market_name: label,
            });
        }

        entries
    }
}

impl std::fmt::Debug for ResultsScraper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultsScraper")
            .field("client", &self.client)
            .field("dedupe", &self.dedupe)
            .finish_non_exhaustive()
    }
}
