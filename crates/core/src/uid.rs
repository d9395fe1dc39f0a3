//! Canonical period keys (dateUIDs).
//!
//! A dateUID names one period of one granularity, e.g.
//! `month-2021-01-01T00:00:00-05:00`. It is built from the start of the
//! period in a fixed ISO 8601 layout, so it does not change when the user
//! edits their note format.

use chrono::DateTime;
use chrono_tz::Tz;

use crate::calendar::Calendar;
use crate::granularity::Granularity;

const UID_TIMESTAMP: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// The dateUID of the `granularity` period containing `point`.
///
/// Weeks start on the calendar's configured week start.
#[must_use]
pub fn date_uid(point: DateTime<Tz>, granularity: Granularity, calendar: &Calendar) -> String {
    let start = calendar.start_of(point, granularity);
    format!("{granularity}-{}", start.format(UID_TIMESTAMP))
}
