//! Turn parsed fields into a point in time.
//!
//! Missing fields are filled the way the host's date library does it: a
//! format without month or day but with week information is read as a week
//! date, anything else as a calendar date with January / the 1st as
//! defaults. Out-of-range values make the whole result invalid.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime};
use chrono_tz::Tz;

use super::parse::{Fields, Meridiem};
use crate::calendar::{Calendar, WeekConvention};

pub(crate) fn resolve(fields: &Fields, calendar: &Calendar) -> Option<DateTime<Tz>> {
    let date = resolve_date(fields, calendar)?;
    let (time, next_day) = resolve_time(fields)?;
    let naive = date.and_time(time);
    let naive = if next_day { naive + Duration::days(1) } else { naive };
    calendar.from_local(naive)
}

fn resolve_date(fields: &Fields, calendar: &Calendar) -> Option<NaiveDate> {
    if let Some(quarter) = fields.quarter
        && !(1..=4).contains(&quarter)
    {
        return None;
    }
    let month = fields.month.or_else(|| fields.quarter.map(|q| (q - 1) * 3 + 1));

    let has_calendar_date =
        month.is_some() || fields.day.is_some() || fields.day_of_year.is_some();
    if !has_calendar_date && has_week_info(fields) {
        return resolve_week_date(fields, calendar);
    }

    let year = fields
        .year
        .or(fields.week_year)
        .or(fields.iso_week_year)
        .unwrap_or_else(|| calendar.now().year());

    let date = match fields.day_of_year {
        Some(ordinal) => NaiveDate::from_yo_opt(year, ordinal)?,
        None => NaiveDate::from_ymd_opt(year, month.unwrap_or(1), fields.day.unwrap_or(1))?,
    };

    // A weekday name that contradicts the date is a mismatch, not a hint.
    match fields.weekday {
        Some(weekday) if weekday != date.weekday() => None,
        _ => Some(date),
    }
}

fn has_week_info(fields: &Fields) -> bool {
    fields.week.is_some()
        || fields.iso_week.is_some()
        || fields.week_year.is_some()
        || fields.iso_week_year.is_some()
        || fields.weekday.is_some()
        || fields.locale_weekday.is_some()
        || fields.iso_weekday.is_some()
}

fn resolve_week_date(fields: &Fields, calendar: &Calendar) -> Option<NaiveDate> {
    let today = calendar.now().date_naive();
    let iso = fields.iso_week.is_some()
        || fields.iso_week_year.is_some()
        || fields.iso_weekday.is_some();

    let (convention, week_year, week, offset) = if iso {
        let convention = WeekConvention::ISO;
        let week_year = fields
            .iso_week_year
            .or(fields.year)
            .unwrap_or_else(|| convention.week_of(today).0);
        let offset = match fields.iso_weekday {
            Some(n @ 1..=7) => n - 1,
            Some(_) => return None,
            None => 0,
        };
        (convention, week_year, fields.iso_week.unwrap_or(1), offset)
    } else {
        let convention = calendar.week();
        let week_year = fields
            .week_year
            .or(fields.year)
            .unwrap_or_else(|| convention.week_of(today).0);
        let offset = match (fields.weekday, fields.locale_weekday) {
            (Some(weekday), _) => convention.weekday_offset(weekday),
            (None, Some(n @ 0..=6)) => n,
            (None, Some(_)) => return None,
            (None, None) => 0,
        };
        (convention, week_year, fields.week.unwrap_or(1), offset)
    };

    if week == 0 || week > convention.weeks_in_year(week_year) {
        return None;
    }

    let first = convention.week_one_start(week_year)?;
    let days = i64::from((week - 1) * 7 + offset);
    let date = first + Duration::days(days);

    // An ISO week date ignores `d` for placement, so it can still disagree.
    match fields.weekday {
        Some(weekday) if iso && weekday != date.weekday() => None,
        _ => Some(date),
    }
}

fn resolve_time(fields: &Fields) -> Option<(NaiveTime, bool)> {
    let mut hour = fields.hour.unwrap_or(0);
    let minute = fields.minute.unwrap_or(0);
    let second = fields.second.unwrap_or(0);

    if fields.twelve_hour && !(1..=12).contains(&hour) {
        return None;
    }
    match fields.meridiem {
        Some(Meridiem::Pm) if hour < 12 => hour += 12,
        Some(Meridiem::Am) if hour == 12 => hour = 0,
        _ => {}
    }

    // 24:00:00 is the end of the day, i.e. midnight of the next one.
    if hour == 24 && minute == 0 && second == 0 {
        return Some((NaiveTime::MIN, true));
    }
    NaiveTime::from_hms_opt(hour, minute, second).map(|time| (time, false))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::calendar::FixedClock;

    fn calendar() -> Calendar {
        Calendar::new(chrono_tz::America::New_York, WeekConvention::SUNDAY)
            .with_clock(FixedClock(Utc.with_ymd_and_hms(2022, 6, 15, 12, 0, 0).unwrap()))
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn date_of(fields: &Fields) -> Option<NaiveDate> {
        resolve(fields, &calendar()).map(|dt| dt.date_naive())
    }

    #[test]
    fn test_calendar_date() {
        let fields =
            Fields { year: Some(2020), month: Some(12), day: Some(1), ..Default::default() };
        assert_eq!(date_of(&fields), Some(ymd(2020, 12, 1)));
    }

    #[test]
    fn test_invalid_calendar_date() {
        let fields =
            Fields { year: Some(2021), month: Some(2), day: Some(30), ..Default::default() };
        assert_eq!(date_of(&fields), None);
        let fields = Fields { year: Some(2021), month: Some(13), ..Default::default() };
        assert_eq!(date_of(&fields), None);
    }

    #[test]
    fn test_quarter_sets_month() {
        let fields = Fields { year: Some(2020), quarter: Some(4), ..Default::default() };
        assert_eq!(date_of(&fields), Some(ymd(2020, 10, 1)));
        let fields = Fields { year: Some(2020), quarter: Some(5), ..Default::default() };
        assert_eq!(date_of(&fields), None);
    }

    #[test]
    fn test_missing_year_uses_clock() {
        let fields = Fields { month: Some(3), day: Some(4), ..Default::default() };
        assert_eq!(date_of(&fields), Some(ymd(2022, 3, 4)));
    }

    #[test]
    fn test_week_year_stands_in_for_year() {
        let fields =
            Fields { week_year: Some(2021), month: Some(7), day: Some(11), ..Default::default() };
        assert_eq!(date_of(&fields), Some(ymd(2021, 7, 11)));
    }

    #[test]
    fn test_locale_week_date() {
        let fields = Fields { week_year: Some(2021), week: Some(2), ..Default::default() };
        assert_eq!(date_of(&fields), Some(ymd(2021, 1, 3)));
        let fields = Fields { week_year: Some(2021), week: Some(7), ..Default::default() };
        assert_eq!(date_of(&fields), Some(ymd(2021, 2, 7)));
    }

    #[test]
    fn test_locale_week_with_weekday() {
        let fields = Fields {
            week_year: Some(2021),
            week: Some(2),
            weekday: Some(chrono::Weekday::Wed),
            ..Default::default()
        };
        assert_eq!(date_of(&fields), Some(ymd(2021, 1, 6)));
    }

    #[test]
    fn test_iso_week_date() {
        let fields = Fields { iso_week_year: Some(2020), iso_week: Some(53), ..Default::default() };
        assert_eq!(date_of(&fields), Some(ymd(2020, 12, 28)));
        let fields = Fields {
            iso_week_year: Some(2021),
            iso_week: Some(1),
            iso_weekday: Some(7),
            ..Default::default()
        };
        assert_eq!(date_of(&fields), Some(ymd(2021, 1, 10)));
    }

    #[test]
    fn test_week_overflow() {
        let fields = Fields { iso_week_year: Some(2021), iso_week: Some(53), ..Default::default() };
        assert_eq!(date_of(&fields), None);
        let fields = Fields { week_year: Some(2021), week: Some(0), ..Default::default() };
        assert_eq!(date_of(&fields), None);
    }

    #[test]
    fn test_weekday_mismatch() {
        // 2021-02-03 was a Wednesday.
        let mut fields = Fields {
            year: Some(2021),
            month: Some(2),
            day: Some(3),
            weekday: Some(chrono::Weekday::Thu),
            ..Default::default()
        };
        assert_eq!(date_of(&fields), None);
        fields.weekday = Some(chrono::Weekday::Wed);
        assert_eq!(date_of(&fields), Some(ymd(2021, 2, 3)));
    }

    #[test]
    fn test_time_resolution() {
        let fields = Fields {
            year: Some(2020),
            month: Some(12),
            day: Some(1),
            hour: Some(4),
            twelve_hour: true,
            minute: Some(8),
            meridiem: Some(Meridiem::Pm),
            ..Default::default()
        };
        let dt = resolve(&fields, &calendar()).unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M%:z").to_string(), "2020-12-01 16:08-05:00");
    }

    #[test]
    fn test_time_overflow() {
        let base = Fields { year: Some(2020), month: Some(1), day: Some(1), ..Default::default() };
        assert!(resolve(&Fields { minute: Some(60), ..base.clone() }, &calendar()).is_none());
        assert!(resolve(&Fields { hour: Some(25), ..base.clone() }, &calendar()).is_none());
        assert!(
            resolve(&Fields { hour: Some(13), twelve_hour: true, ..base.clone() }, &calendar())
                .is_none()
        );
        let midnight = resolve(&Fields { hour: Some(24), ..base }, &calendar()).unwrap();
        assert_eq!(midnight.date_naive(), ymd(2020, 1, 2));
    }
}
