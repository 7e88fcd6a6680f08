//! Time utilities: parsing HH:MM, duration computations, formatting minutes.

use crate::errors::{AppError, AppResult};
use chrono::NaiveTime;

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

pub fn parse_required_time(t: &str) -> AppResult<NaiveTime> {
    parse_time(t).ok_or_else(|| AppError::InvalidTime(t.to_string()))
}

pub fn minutes_between(start: NaiveTime, end: NaiveTime) -> i64 {
    let duration = end - start;
    duration.num_minutes()
}

pub fn format_minutes(mins: i64) -> String {
    let sign = if mins < 0 { "-" } else { "" };
    let m = mins.abs();
    format!("{}{:02}:{:02}", sign, m / 60, m % 60)
}

/// Elapsed same-day time between `start` and `end` as zero-padded `HH:MM`.
///
/// Callers must guarantee `start < end`; ordering is validated upstream
/// by the event log before any record is built.
pub fn duration_hhmm(start: NaiveTime, end: NaiveTime) -> String {
    format_minutes(minutes_between(start, end))
}
