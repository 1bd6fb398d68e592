use chrono::{Datelike, Duration, NaiveDate};

/// Canonical day key in zero-padded `YYYY-MM-DD` form.
///
/// Lexicographic order of day keys equals chronological order, so series
/// keyed by `NaiveDate` and series keyed by day key sort identically. All
/// dates are UTC calendar days; no timezone conversion happens anywhere in
/// the engine.
#[must_use]
pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// The Sunday on or before `date`.
///
/// Weekly aggregations use Sunday-aligned 7-day buckets (not ISO weeks).
/// Two dates fall into the same bucket iff they have the same week start;
/// a workout on a Sunday starts a new bucket from itself.
#[must_use]
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// The day key of the week start of `date`.
#[must_use]
pub fn week_key(date: NaiveDate) -> String {
    day_key(week_start(date))
}
