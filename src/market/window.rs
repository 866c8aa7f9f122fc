//! Daily disclosure window evaluation.
//!
//! Market open/close times are times of day. They are resolved against the
//! calendar day of the instant being classified, so a market's window moves
//! to the next day at midnight without any rollover bookkeeping.

use chrono::{FixedOffset, Local, NaiveDateTime, NaiveTime, Utc};

use super::types::{Market, WindowState};
use crate::error::MarketError;

/// Classify `now` against `market`'s window on `now`'s calendar day.
///
/// The open boundary is inclusive (`now == open` is [`WindowState::Open`]) and
/// the close boundary belongs to [`WindowState::AfterClose`].
pub fn classify(now: NaiveDateTime, market: &Market) -> WindowState {
    let today = now.date();
    let open = today.and_time(market.open_time);
    let close = today.and_time(market.close_time);

    if now < open {
        WindowState::BeforeOpen
    } else if now < close {
        WindowState::Open
    } else {
        WindowState::AfterClose
    }
}

/// Parse a 12-hour `hh:mm AM/PM` literal such as `"03:45 PM"`.
///
/// `12:xx AM` is just after midnight and `12:xx PM` is just after noon.
pub fn parse_time_of_day(value: &str) -> Result<NaiveTime, MarketError> {
    let invalid = || MarketError::InvalidTimeOfDay {
        value: value.to_string(),
    };

    let (clock, meridiem) = value.trim().split_once(' ').ok_or_else(invalid)?;
    let (hours, minutes) = clock.split_once(':').ok_or_else(invalid)?;
    let mut hours: u32 = hours.parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.parse().map_err(|_| invalid())?;

    if !(1..=12).contains(&hours) {
        return Err(invalid());
    }

    match meridiem.trim().to_ascii_uppercase().as_str() {
        "AM" if hours == 12 => hours = 0,
        "AM" => {}
        "PM" if hours != 12 => hours += 12,
        "PM" => {}
        _ => return Err(invalid()),
    }

    NaiveTime::from_hms_opt(hours, minutes, 0).ok_or_else(invalid)
}

/// Source of the current wall-clock time used to evaluate windows.
pub trait Clock: Send + Sync {
    /// Current date and time in the markets' local time.
    fn now(&self) -> NaiveDateTime;
}

/// Reads the system clock, either in server local time or at a fixed offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    offset: Option<FixedOffset>,
}

impl SystemClock {
    /// Clock in the server's local time zone.
    pub fn local() -> Self {
        Self { offset: None }
    }

    /// Clock at a fixed offset from UTC, in minutes.
    ///
    /// Returns `None` when the offset is out of range.
    pub fn with_offset_minutes(minutes: i32) -> Option<Self> {
        let offset = FixedOffset::east_opt(minutes.checked_mul(60)?)?;
        Some(Self {
            offset: Some(offset),
        })
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        match self.offset {
            Some(offset) => Utc::now().with_timezone(&offset).naive_local(),
            None => Local::now().naive_local(),
        }
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
