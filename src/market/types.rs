//! Market-related types for the daily results table.

use chrono::NaiveTime;
use serde::Serialize;
use strum::{Display, EnumString};

/// Where "now" falls relative to a market's daily disclosure window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum WindowState {
    /// Before today's open time; nothing is revealed.
    BeforeOpen,
    /// Open but not yet closed; partial reveal.
    Open,
    /// At or after today's close time; full reveal.
    AfterClose,
}

/// A known market and its daily open/close times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Market {
    /// Display name, matched case-insensitively against scraped labels.
    pub name: &'static str,
    /// Time of day the market opens.
    pub open_time: NaiveTime,
    /// Time of day the market closes.
    pub close_time: NaiveTime,
}

impl Market {
    /// Whether `label` names this market, ignoring case and surrounding whitespace.
    pub fn matches(&self, label: &str) -> bool {
        self.name.to_lowercase() == label.trim().to_lowercase()
    }

    /// Open time formatted the way the table literals are written.
    pub fn open_str(&self) -> String {
        self.open_time.format("%I:%M %p").to_string()
    }

    /// Close time formatted the way the table literals are written.
    pub fn close_str(&self) -> String {
        self.close_time.format("%I:%M %p").to_string()
    }
}
