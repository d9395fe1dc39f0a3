//! Render a point in time with a format.

use chrono::{DateTime, Datelike, Timelike};
use chrono_tz::Tz;

use super::DateFormat;
use super::names::{
    MONTHS_LONG, MONTHS_SHORT, WEEKDAYS_LONG, WEEKDAYS_MIN, WEEKDAYS_SHORT, ordinal_suffix,
};
use super::token::{Segment, Token};
use crate::calendar::{Calendar, WeekConvention};

/// Render `point` with `format`.
///
/// Week tokens (`gggg`, `ww`, `e`) follow the calendar's week convention;
/// `GGGG`, `WW` and `E` are always ISO.
#[must_use]
pub fn format_date(point: DateTime<Tz>, format: &DateFormat, calendar: &Calendar) -> String {
    let date = point.date_naive();
    let (week_year, week) = calendar.week().week_of(date);
    let (iso_week_year, iso_week) = WeekConvention::ISO.week_of(date);
    let month0 = date.month0() as usize;
    let weekday0 = date.weekday().num_days_from_sunday() as usize;

    let mut out = String::new();
    for segment in format.segments() {
        let token = match segment {
            Segment::Literal(text) => {
                out.push_str(text);
                continue;
            }
            Segment::Token(token) => *token,
        };
        let piece = match token {
            Token::Year => format!("{:04}", date.year()),
            Token::YearTwoDigit => format!("{:02}", date.year().rem_euclid(100)),
            Token::WeekYear => format!("{week_year:04}"),
            Token::WeekYearTwoDigit => format!("{:02}", week_year.rem_euclid(100)),
            Token::IsoWeekYear => format!("{iso_week_year:04}"),
            Token::IsoWeekYearTwoDigit => format!("{:02}", iso_week_year.rem_euclid(100)),
            Token::Quarter => (date.month0() / 3 + 1).to_string(),
            Token::Month => date.month().to_string(),
            Token::MonthPadded => format!("{:02}", date.month()),
            Token::MonthShort => MONTHS_SHORT[month0].to_string(),
            Token::MonthLong => MONTHS_LONG[month0].to_string(),
            Token::Day => date.day().to_string(),
            Token::DayPadded => format!("{:02}", date.day()),
            Token::DayOrdinal => format!("{}{}", date.day(), ordinal_suffix(date.day())),
            Token::DayOfYear => date.ordinal().to_string(),
            Token::DayOfYearPadded => format!("{:03}", date.ordinal()),
            Token::Week => week.to_string(),
            Token::WeekPadded => format!("{week:02}"),
            Token::IsoWeek => iso_week.to_string(),
            Token::IsoWeekPadded => format!("{iso_week:02}"),
            Token::Weekday => weekday0.to_string(),
            Token::WeekdayMin => WEEKDAYS_MIN[weekday0].to_string(),
            Token::WeekdayShort => WEEKDAYS_SHORT[weekday0].to_string(),
            Token::WeekdayLong => WEEKDAYS_LONG[weekday0].to_string(),
            Token::LocaleWeekday => calendar.week().weekday_offset(date.weekday()).to_string(),
            Token::IsoWeekday => date.weekday().number_from_monday().to_string(),
            Token::Hour => point.hour().to_string(),
            Token::HourPadded => format!("{:02}", point.hour()),
            Token::Hour12 => twelve_hour(point.hour()).to_string(),
            Token::Hour12Padded => format!("{:02}", twelve_hour(point.hour())),
            Token::Minute => point.minute().to_string(),
            Token::MinutePadded => format!("{:02}", point.minute()),
            Token::Second => point.second().to_string(),
            Token::SecondPadded => format!("{:02}", point.second()),
            Token::MeridiemUpper => (if point.hour() < 12 { "AM" } else { "PM" }).to_string(),
            Token::MeridiemLower => (if point.hour() < 12 { "am" } else { "pm" }).to_string(),
        };
        out.push_str(&piece);
    }
    out
}

fn twelve_hour(hour: u32) -> u32 {
    match hour % 12 {
        0 => 12,
        h => h,
    }
}
