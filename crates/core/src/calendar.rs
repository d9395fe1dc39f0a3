//! Calendar context: time zone, week-numbering convention and clock.
//!
//! Everything that depends on "where" and "when" the user is lives here, so
//! the parsing and canonicalization code stays pure. A [`Calendar`] is cheap
//! to clone and safe to share across threads.

use std::fmt;
use std::sync::Arc;

use chrono::{
    DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone,
    Utc, Weekday,
};
use chrono_tz::Tz;
use thiserror::Error;

use crate::granularity::Granularity;

/// Error type for calendar configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalendarError {
    #[error("unknown time zone: {0}")]
    UnknownTimezone(String),

    #[error("invalid weekday: {0}")]
    InvalidWeekday(String),

    #[error("first week must contain a day between Jan 1 and Jan 7, got {0}")]
    InvalidFirstWeek(u32),
}

/// Source of the current instant.
///
/// Parsing needs "now" to fill in fields a format leaves out (a format
/// without a year resolves to the current year).
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Locale week rules: which day starts the week and which January day is
/// always part of week one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekConvention {
    pub start: Weekday,
    /// Day of January (1-7) that always falls in week one.
    pub first_week_contains: u32,
}

impl WeekConvention {
    /// Weeks start on Sunday and week one contains Jan 1 (US).
    pub const SUNDAY: Self = Self { start: Weekday::Sun, first_week_contains: 1 };

    /// ISO 8601: weeks start on Monday and week one contains Jan 4.
    pub const ISO: Self = Self { start: Weekday::Mon, first_week_contains: 4 };

    pub fn new(start: Weekday, first_week_contains: u32) -> Result<Self, CalendarError> {
        if !(1..=7).contains(&first_week_contains) {
            return Err(CalendarError::InvalidFirstWeek(first_week_contains));
        }
        Ok(Self { start, first_week_contains })
    }

    /// Position of `weekday` within the week (0 = first day of the week).
    #[must_use]
    pub fn weekday_offset(&self, weekday: Weekday) -> u32 {
        (7 + weekday.num_days_from_monday() - self.start.num_days_from_monday()) % 7
    }

    /// The first day of the week containing `date`.
    #[must_use]
    pub fn start_of_week(&self, date: NaiveDate) -> NaiveDate {
        date - Duration::days(i64::from(self.weekday_offset(date.weekday())))
    }

    /// The first day of week one of `week_year`.
    #[must_use]
    pub fn week_one_start(&self, week_year: i32) -> Option<NaiveDate> {
        let anchor = NaiveDate::from_ymd_opt(week_year, 1, self.first_week_contains)?;
        Some(self.start_of_week(anchor))
    }

    /// Week-year and week number of `date`.
    #[must_use]
    pub fn week_of(&self, date: NaiveDate) -> (i32, u32) {
        let start = self.start_of_week(date);
        // The week belongs to the year its (8 - first_week_contains)th day falls in.
        let week_year =
            (start + Duration::days(i64::from(7 - self.first_week_contains))).year();
        let week = self
            .week_one_start(week_year)
            .map_or(1, |first| (start - first).num_days() / 7 + 1);
        (week_year, u32::try_from(week).unwrap_or(1))
    }

    /// Number of weeks in `week_year` (52 or 53).
    #[must_use]
    pub fn weeks_in_year(&self, week_year: i32) -> u32 {
        match (self.week_one_start(week_year), self.week_one_start(week_year + 1)) {
            (Some(first), Some(next)) => {
                u32::try_from((next - first).num_days() / 7).unwrap_or(52)
            }
            _ => 52,
        }
    }
}

impl Default for WeekConvention {
    fn default() -> Self {
        Self::SUNDAY
    }
}

/// Time zone, week convention and clock used to interpret note dates.
#[derive(Clone)]
pub struct Calendar {
    tz: Tz,
    week: WeekConvention,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Calendar").field("tz", &self.tz).field("week", &self.week).finish()
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self::new(Tz::UTC, WeekConvention::default())
    }
}

impl Calendar {
    /// Create a calendar reading the system clock.
    #[must_use]
    pub fn new(tz: Tz, week: WeekConvention) -> Self {
        Self { tz, week, clock: Arc::new(SystemClock) }
    }

    /// Replace the clock (tests pin "now" with [`FixedClock`]).
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    #[must_use]
    pub fn tz(&self) -> Tz {
        self.tz
    }

    #[must_use]
    pub fn week(&self) -> WeekConvention {
        self.week
    }

    /// The current instant in this calendar's time zone.
    #[must_use]
    pub fn now(&self) -> DateTime<Tz> {
        self.clock.now().with_timezone(&self.tz)
    }

    /// Interpret a wall-clock date-time in this calendar's time zone.
    #[must_use]
    pub fn from_local(&self, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
        resolve_local(self.tz, naive)
    }

    /// Midnight at the start of `date` in this calendar's time zone.
    #[must_use]
    pub fn start_of_date(&self, date: NaiveDate) -> Option<DateTime<Tz>> {
        self.from_local(date.and_time(NaiveTime::MIN))
    }

    /// Truncate `point` to the start of its `granularity` period.
    ///
    /// Truncation happens in the point's own time zone; weeks follow this
    /// calendar's week convention.
    #[must_use]
    pub fn start_of(&self, point: DateTime<Tz>, granularity: Granularity) -> DateTime<Tz> {
        let date = period_start(point.date_naive(), granularity, self.week);
        resolve_local(point.timezone(), date.and_time(NaiveTime::MIN)).unwrap_or(point)
    }

    /// Position of a weekday name (`"monday"`, `"Sun"`) within the week, or
    /// `None` for an unknown name.
    #[must_use]
    pub fn weekday_index(&self, name: &str) -> Option<u32> {
        name.trim().parse::<Weekday>().ok().map(|d| self.week.weekday_offset(d))
    }
}

/// Parse an IANA time zone name.
pub fn parse_timezone(name: &str) -> Result<Tz, CalendarError> {
    name.trim().parse::<Tz>().map_err(|_| CalendarError::UnknownTimezone(name.to_string()))
}

/// Parse a weekday name (`"sunday"`, `"Mon"`).
pub fn parse_weekday(name: &str) -> Result<Weekday, CalendarError> {
    name.trim().parse::<Weekday>().map_err(|_| CalendarError::InvalidWeekday(name.to_string()))
}

/// First day of the period containing `date`.
pub(crate) fn period_start(
    date: NaiveDate,
    granularity: Granularity,
    week: WeekConvention,
) -> NaiveDate {
    let first_of = |month: u32| NaiveDate::from_ymd_opt(date.year(), month, 1).unwrap_or(date);
    match granularity {
        Granularity::Day => date,
        Granularity::Week => week.start_of_week(date),
        Granularity::Month => first_of(date.month()),
        Granularity::Quarter => first_of((date.month() - 1) / 3 * 3 + 1),
        Granularity::Year => first_of(1),
    }
}

/// Map a wall-clock time onto an instant in `tz`.
///
/// Ambiguous times (DST fall-back) resolve to the earlier instant; times
/// inside a DST gap move forward to the first valid half hour.
pub(crate) fn resolve_local(tz: Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    (0..=48).find_map(|step| {
        match tz.from_local_datetime(&(naive + Duration::minutes(30 * step))) {
            LocalResult::Single(dt) => Some(dt),
            LocalResult::Ambiguous(earliest, _) => Some(earliest),
            LocalResult::None => None,
        }
    })
}
