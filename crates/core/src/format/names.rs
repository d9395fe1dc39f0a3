//! English month and weekday names.

use chrono::Weekday;

pub(crate) const MONTHS_LONG: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub(crate) const MONTHS_SHORT: [&str; 12] =
    ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];

// Indexed from Sunday, like the `d` token.
pub(crate) const WEEKDAYS_LONG: [&str; 7] =
    ["Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"];

pub(crate) const WEEKDAYS_SHORT: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub(crate) const WEEKDAYS_MIN: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

pub(crate) const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Month number (1-12) for a long or short month name, any case.
pub(crate) fn month_from_name(name: &str) -> Option<u32> {
    MONTHS_LONG
        .iter()
        .zip(MONTHS_SHORT.iter())
        .position(|(long, short)| {
            long.eq_ignore_ascii_case(name) || short.eq_ignore_ascii_case(name)
        })
        .and_then(|i| u32::try_from(i + 1).ok())
}

/// Weekday for a long, short or two-letter weekday name, any case.
pub(crate) fn weekday_from_name(name: &str) -> Option<Weekday> {
    let index = (0..7).find(|&i| {
        WEEKDAYS_LONG[i].eq_ignore_ascii_case(name)
            || WEEKDAYS_SHORT[i].eq_ignore_ascii_case(name)
            || WEEKDAYS_MIN[i].eq_ignore_ascii_case(name)
    })?;
    Some(WEEKDAYS[index])
}

/// English ordinal suffix for a day of the month.
pub(crate) fn ordinal_suffix(n: u32) -> &'static str {
    match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}
