//! Market module for the daily results table.
//!
//! This module handles:
//! - The fixed table of known markets
//! - Classifying the current time against a market's daily window
//! - Redacting results according to that window

pub mod redact;
pub mod table;
pub mod types;
pub mod window;

pub use redact::{redact, HIDDEN_RESULT};
pub use table::{check_table, find_market, markets};
pub use types::{Market, WindowState};
pub use window::{classify, parse_time_of_day, Clock, FixedClock, SystemClock};
