//! Application configuration loaded from environment variables.

use serde::Deserialize;
use tracing_subscriber::EnvFilter;
use url::Url;

use crate::error::{Result, ServiceError};

/// Largest UTC offset accepted for `MARKET_UTC_OFFSET_MINUTES` (±14h).
const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// HTTP server port for the results API.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log filter directives, e.g. `info` or `market_results=debug,info`.
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Mount the Prometheus `/metrics` endpoint.
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,

    // === Source Page ===
    /// Page the results are scraped from.
    #[serde(default = "default_source_url")]
    pub source_url: String,

    /// Timeout for the outbound fetch, in seconds.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,

    // === Result Shaping ===
    /// Fixed UTC offset used to resolve market times. Server local time when unset.
    #[serde(default)]
    pub market_utc_offset_minutes: Option<i32>,

    /// Keep only the first entry per market when both page layouts list it.
    #[serde(default)]
    pub dedupe_results: bool,
}

fn default_port() -> u16 {
    9000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_source_url() -> String {
    "https://dpbosssnet.services/".to_string()
}

fn default_http_timeout() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            rust_log: default_log_level(),
            metrics_enabled: default_true(),
            source_url: default_source_url(),
            http_timeout_secs: default_http_timeout(),
            market_utc_offset_minutes: None,
            dedupe_results: false,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> std::result::Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Load configuration and reject invalid values.
    pub fn load_validated() -> Result<Self> {
        let config = Self::load()?;
        config.validate().map_err(ServiceError::InvalidConfig)?;
        Ok(config)
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.port == 0 {
            return Err("PORT must be non-zero".to_string());
        }

        let url = Url::parse(&self.source_url)
            .map_err(|e| format!("SOURCE_URL is not a valid URL: {}", e))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!(
                "SOURCE_URL must use http or https, got {}",
                url.scheme()
            ));
        }

        if self.http_timeout_secs == 0 {
            return Err("HTTP_TIMEOUT_SECS must be at least 1".to_string());
        }

        if let Some(offset) = self.market_utc_offset_minutes {
            if offset.abs() > MAX_UTC_OFFSET_MINUTES {
                return Err(format!(
                    "MARKET_UTC_OFFSET_MINUTES must be within ±{}, got {}",
                    MAX_UTC_OFFSET_MINUTES, offset
                ));
            }
        }

        Ok(())
    }

    /// Log filter built from `RUST_LOG`, falling back to `info` when it does not parse.
    pub fn log_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.rust_log).unwrap_or_else(|_| EnvFilter::new(default_log_level()))
    }

    /// Outbound fetch timeout.
    pub fn http_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.http_timeout_secs)
    }
}
