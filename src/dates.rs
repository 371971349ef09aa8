//! Calendar date helpers
//!
//! Observation dates are stored as `YYYY-MM-DD` text and compared as strings,
//! so every bound handed to the store is rendered back into that form.

use chrono::{Datelike, Duration, NaiveDate};

/// Format used by stored observation dates and by request path segments
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of the temperature observation window, in days
pub const TOBS_WINDOW_DAYS: i64 = 365;

/// Parse a user-supplied date segment.
///
/// The year must be exactly four digits and at least 1. Month and day may
/// omit their leading zero.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    if !has_four_digit_year(input) {
        return None;
    }
    let date = NaiveDate::parse_from_str(input, DATE_FORMAT).ok()?;
    (date.year() >= 1).then_some(date)
}

fn has_four_digit_year(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() > 4 && bytes[..4].iter().all(u8::is_ascii_digit) && bytes[4] == b'-'
}

/// Render a date in the stored `YYYY-MM-DD` form
pub fn canonical(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse and re-render a date segment, `None` when it is not a valid date
pub fn normalize(input: &str) -> Option<String> {
    parse_date(input).map(canonical)
}

/// Bounds of the one-year window ending at `last`.
///
/// Returns `(after, until)`: rows qualify when `after < date <= until`,
/// which covers exactly [`TOBS_WINDOW_DAYS`] calendar days.
pub fn year_window(last: &str) -> Option<(String, String)> {
    let end = parse_date(last)?;
    let start = end.checked_sub_signed(Duration::days(TOBS_WINDOW_DAYS))?;
    Some((canonical(start), canonical(end)))
}
