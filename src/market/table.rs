//! The fixed table of known markets.

use once_cell::sync::Lazy;

use super::types::Market;
use super::window::parse_time_of_day;
use crate::error::MarketError;

/// Market name, open time, close time.
const MARKET_TABLE: [(&str, &str, &str); 9] = [
    ("SRIDEVI", "11:35 AM", "12:35 PM"),
    ("TIME BAZAR", "01:10 PM", "02:10 PM"),
    ("MADHUR DAY", "01:30 PM", "02:30 PM"),
    ("RAJDHANI DAY", "03:00 PM", "05:00 PM"),
    ("MILAN DAY", "03:10 PM", "05:10 PM"),
    ("KALYAN", "03:45 PM", "05:45 PM"),
    ("SRIDEVI NIGHT", "07:15 PM", "08:15 PM"),
    ("MADHUR NIGHT", "08:30 PM", "10:30 PM"),
    ("MILAN NIGHT", "09:10 PM", "11:10 PM"),
];

fn parse_table(table: &[(&'static str, &str, &str)]) -> Result<Vec<Market>, MarketError> {
    table
        .iter()
        .map(|&(name, open, close)| {
            Ok(Market {
                name,
                open_time: parse_time_of_day(open)?,
                close_time: parse_time_of_day(close)?,
            })
        })
        .collect()
}

// Startup runs `check_table` first, so this never sees a bad literal.
static MARKETS: Lazy<Vec<Market>> =
    Lazy::new(|| parse_table(&MARKET_TABLE).expect("market table checked at startup"));

/// Parse the built-in table, returning the number of markets.
pub fn check_table() -> Result<usize, MarketError> {
    parse_table(&MARKET_TABLE).map(|markets| markets.len())
}

/// All known markets, in table order.
pub fn markets() -> &'static [Market] {
    &MARKETS
}

/// Look up a market by label, ignoring case.
pub fn find_market(label: &str) -> Option<&'static Market> {
    markets().iter().find(|market| market.matches(label))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use std::collections::HashSet;

    #[test]
    fn table_has_nine_unique_markets() {
        let names: HashSet<String> = markets().iter().map(|m| m.name.to_lowercase()).collect();
        assert_eq!(markets().len(), 9);
        assert_eq!(names.len(), 9);
    }

    #[test]
    fn every_market_closes_after_it_opens() {
        for market in markets() {
            assert!(market.open_time < market.close_time, "{}", market.name);
        }
    }

    #[test]
    fn built_in_table_checks_clean() {
        assert_eq!(check_table(), Ok(9));
    }

    #[test]
    fn malformed_time_literal_is_reported() {
        let err = parse_table(&[("KALYAN", "03:45 PM", "17:45")]).unwrap_err();
        assert_eq!(
            err,
            MarketError::InvalidTimeOfDay {
                value: "17:45".to_string()
            }
        );
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(find_market("kalyan"), find_market("KALYAN"));
        assert_eq!(find_market("Kalyan").map(|m| m.name), Some("KALYAN"));
        assert_eq!(find_market("milan night").map(|m| m.name), Some("MILAN NIGHT"));
    }

    #[test]
    fn lookup_misses_unknown_labels() {
        assert!(find_market("MAIN BAZAR").is_none());
        assert!(find_market("").is_none());
    }

    #[test]
    fn kalyan_times_are_parsed() {
        let kalyan = find_market("KALYAN").unwrap();
        assert_eq!(kalyan.open_time, NaiveTime::from_hms_opt(15, 45, 0).unwrap());
        assert_eq!(kalyan.close_time, NaiveTime::from_hms_opt(17, 45, 0).unwrap());
    }
}
