//! Wall-clock fixtures.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Build a local date from `YYYY-MM-DD`. Panics on bad input.
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap_or_else(|e| panic!("bad date {s}: {e}"))
}

/// Build a local time from `HH:MM` or `HH:MM:SS`. Panics on bad input.
pub fn time(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .unwrap_or_else(|e| panic!("bad time {s}: {e}"))
}

/// Build a local timestamp from `YYYY-MM-DD HH:MM[:SS]`. Panics on bad input.
pub fn at(s: &str) -> NaiveDateTime {
    let (d, t) = s
        .split_once(' ')
        .unwrap_or_else(|| panic!("bad timestamp {s}"));
    date(d).and_time(time(t))
}
