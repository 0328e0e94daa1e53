use chrono::{Duration, NaiveDate};

/// Canonical key form for a calendar date: `YYYY-MM-DD` in the local calendar.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `YYYY-MM` partition key for a calendar date.
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// `YYYY-MM` prefix of an already-canonical date key.
pub fn month_of(key: &str) -> &str {
    key.get(..7).unwrap_or(key)
}

/// Only the current calendar day may be edited.
pub fn is_editable_day(key: &str, today: NaiveDate) -> bool {
    key == date_key(today)
}

/// The `n` most recent calendar days ending at and including `today`,
/// oldest first. Call again to restart.
pub fn trailing_window(n: u32, today: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    (0..i64::from(n))
        .rev()
        .map(move |offset| today - Duration::days(offset))
}
