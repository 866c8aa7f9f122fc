//! Types produced by a scrape pass.

use serde::{Deserialize, Serialize};

/// A label/value pair as found on the source page, before matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPair {
    /// Market label, trimmed.
    pub label: String,
    /// Winning number text, trimmed.
    pub value: String,
}

impl RawPair {
    /// Create a pair from anything string-like.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// One published market result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedEntry {
    /// Market label exactly as it appeared on the source page.
    #[serde(rename = "market")]
    pub market_name: String,
    /// Winning number after redaction.
    #[serde(rename = "winningNumber")]
    pub winning_number: String,
}
