pub mod doctor;
pub mod list;
pub mod parse;
pub mod path;
pub mod uid;

use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;
use periodic_notes_core::Calendar;
use periodic_notes_core::config::loader::ConfigLoader;
use periodic_notes_core::config::types::ResolvedConfig;

const LOCAL_DATETIME_FORMATS: [&str; 4] =
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

/// Load the config and install logging, or exit.
pub fn load(config: Option<&Path>, profile: Option<&str>) -> ResolvedConfig {
    match ConfigLoader::load(config, profile) {
        Ok(rc) => {
            crate::logging::init(&rc);
            rc
        }
        Err(e) => {
            eprintln!("Error loading config: {e}");
            std::process::exit(1);
        }
    }
}

/// Read a user-supplied point in time.
///
/// RFC 3339 timestamps keep their instant; bare dates and date-times are
/// taken as wall-clock time in the calendar's zone.
pub fn parse_point(input: &str, calendar: &Calendar) -> Option<DateTime<Tz>> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("now") || input.eq_ignore_ascii_case("today") {
        return Some(calendar.now());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&calendar.tz()));
    }
    for fmt in LOCAL_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, fmt) {
            return calendar.from_local(naive);
        }
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d").ok().and_then(|d| calendar.start_of_date(d))
}
