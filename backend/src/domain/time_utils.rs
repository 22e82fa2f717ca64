//! Pure date/time helpers shared by the slot generator and booking flow.
//!
//! All times are local wall-clock strings ("HH:MM"); dates are canonical
//! "YYYY-MM-DD" keys. Nothing here touches timezones.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

/// Canonical "YYYY-MM-DD" key for a calendar day, zero-padded.
///
/// Stable for the same day regardless of the time-of-day component,
/// which is why it takes a `NaiveDate` and not a datetime.
pub fn date_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// "HH:MM", 24-hour, zero-padded
pub fn format_time(time: NaiveTime) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

/// Advance an "HH:MM" string by `minutes`, wrapping within a 24-hour day.
///
/// Input with fewer than two colon-separated parts is returned unchanged;
/// malformed times are tolerated, not treated as errors.
pub fn add_minutes(time: &str, minutes: i64) -> String {
    let parts: Vec<&str> = time.split(':').collect();
    if parts.len() < 2 {
        return time.to_string();
    }
    let hours: i64 = parts[0].parse().unwrap_or(0);
    let mins: i64 = parts[1].parse().unwrap_or(0);

    let total = (hours * 60 + mins + minutes).rem_euclid(24 * 60);
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Parse "HH:MM" into minutes since midnight. Returns `None` for
/// anything that does not parse as two numeric parts.
pub fn time_to_minutes(time: &str) -> Option<u32> {
    let mut parts = time.split(':');
    let hours: u32 = parts.next()?.parse().ok()?;
    let mins: u32 = parts.next()?.parse().ok()?;
    Some(hours * 60 + mins)
}

/// True iff the date's weekday index is in `working_days`
/// (0 = Sunday convention).
pub fn is_working_day(date: NaiveDate, working_days: &[u32]) -> bool {
    working_days.contains(&date.weekday().num_days_from_sunday())
}

/// Deterministic "N people waiting" figure in [1, 4], derived from the
/// character codes of the time string.
///
/// Display heuristic only. It looks varied across slots but is pure, so
/// tests stay reproducible; nothing may treat it as real demand data.
pub fn waiting_count(time: &str) -> u32 {
    let sum: u32 = time.chars().map(|c| c as u32).sum();
    sum % 4 + 1
}
