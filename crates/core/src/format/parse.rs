//! Extract date fields from text according to a tokenized format.

use chrono::Weekday;
use regex::Regex;

use super::names::{
    MONTHS_LONG, MONTHS_SHORT, WEEKDAYS, WEEKDAYS_LONG, WEEKDAYS_MIN, WEEKDAYS_SHORT,
    month_from_name, weekday_from_name,
};
use super::token::{Segment, Token};

/// How closely the input has to follow the format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// The whole input must match the format exactly: literal separators,
    /// fixed-width fields, no leftover text.
    #[default]
    Strict,
    /// Each token is searched for in the remaining input. Unmatched text is
    /// skipped and leftover input is ignored.
    Forgiving,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Meridiem {
    Am,
    Pm,
}

/// Raw field values read from the input, before calendar resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Fields {
    pub year: Option<i32>,
    pub week_year: Option<i32>,
    pub iso_week_year: Option<i32>,
    pub quarter: Option<u32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub day_of_year: Option<u32>,
    pub week: Option<u32>,
    pub iso_week: Option<u32>,
    /// Absolute weekday from `d`/`dd`/`ddd`/`dddd`.
    pub weekday: Option<Weekday>,
    /// Weekday relative to the locale week start, from `e`.
    pub locale_weekday: Option<u32>,
    /// ISO weekday (1 = Monday), from `E`.
    pub iso_weekday: Option<u32>,
    pub hour: Option<u32>,
    pub twelve_hour: bool,
    pub minute: Option<u32>,
    pub second: Option<u32>,
    pub meridiem: Option<Meridiem>,
}

const ORDINAL_SUFFIX: &str = "(?:st|nd|rd|th)";
const MERIDIEM: &str = r"(?i:[ap]\.?m\.?)";

/// Regex for one token. Every pattern holds exactly one capture group.
fn token_pattern(token: Token, mode: ParseMode) -> String {
    let strict = mode == ParseMode::Strict;
    let digits = |exact: &str, loose: &str| {
        format!("({})", if strict { exact } else { loose })
    };
    match token {
        Token::Year | Token::WeekYear | Token::IsoWeekYear => digits(r"\d{4}", r"\d{1,4}"),
        Token::YearTwoDigit | Token::WeekYearTwoDigit | Token::IsoWeekYearTwoDigit => {
            digits(r"\d{2}", r"\d{1,2}")
        }
        Token::Quarter
        | Token::Weekday
        | Token::LocaleWeekday
        | Token::IsoWeekday => r"(\d)".to_string(),
        Token::Month
        | Token::Day
        | Token::Week
        | Token::IsoWeek
        | Token::Hour
        | Token::Hour12
        | Token::Minute
        | Token::Second => r"(\d{1,2})".to_string(),
        Token::MonthPadded
        | Token::DayPadded
        | Token::WeekPadded
        | Token::IsoWeekPadded
        | Token::HourPadded
        | Token::Hour12Padded
        | Token::MinutePadded
        | Token::SecondPadded => digits(r"\d{2}", r"\d{1,2}"),
        Token::DayOfYear => r"(\d{1,3})".to_string(),
        Token::DayOfYearPadded => digits(r"\d{3}", r"\d{1,3}"),
        Token::DayOrdinal => {
            if strict {
                format!(r"(\d{{1,2}}){ORDINAL_SUFFIX}")
            } else {
                format!(r"(\d{{1,2}})(?i:{ORDINAL_SUFFIX})?")
            }
        }
        // Strict names accept only the token's own spelling; forgiving
        // accepts any, longest first.
        Token::MonthShort if strict => names_pattern(&[&MONTHS_SHORT]),
        Token::MonthLong if strict => names_pattern(&[&MONTHS_LONG]),
        Token::MonthShort | Token::MonthLong => names_pattern(&[&MONTHS_LONG, &MONTHS_SHORT]),
        Token::WeekdayMin if strict => names_pattern(&[&WEEKDAYS_MIN]),
        Token::WeekdayShort if strict => names_pattern(&[&WEEKDAYS_SHORT]),
        Token::WeekdayLong if strict => names_pattern(&[&WEEKDAYS_LONG]),
        Token::WeekdayMin | Token::WeekdayShort | Token::WeekdayLong => {
            names_pattern(&[&WEEKDAYS_LONG, &WEEKDAYS_SHORT, &WEEKDAYS_MIN])
        }
        Token::MeridiemUpper | Token::MeridiemLower => format!("({MERIDIEM})"),
    }
}

/// Case-insensitive alternation over `lists`, as one capture group.
fn names_pattern(lists: &[&[&str]]) -> String {
    let names: Vec<&str> = lists.iter().flat_map(|list| list.iter().copied()).collect();
    format!("((?i:{}))", names.join("|"))
}

/// Read `segments` out of `input`.
///
/// Returns `None` when the input does not fit the format or a field value is
/// not a number/name of the expected kind. Range checks happen later, during
/// resolution.
pub(crate) fn parse_fields(segments: &[Segment], input: &str, mode: ParseMode) -> Option<Fields> {
    match mode {
        ParseMode::Strict => parse_strict(segments, input),
        ParseMode::Forgiving => parse_forgiving(segments, input),
    }
}

fn parse_strict(segments: &[Segment], input: &str) -> Option<Fields> {
    let mut pattern = String::from("^");
    let mut tokens = Vec::new();
    for segment in segments {
        match segment {
            Segment::Literal(text) => pattern.push_str(&regex::escape(text)),
            Segment::Token(token) => {
                pattern.push_str(&token_pattern(*token, ParseMode::Strict));
                tokens.push(*token);
            }
        }
    }
    pattern.push('$');

    let re = Regex::new(&pattern).ok()?;
    let caps = re.captures(input)?;

    let mut fields = Fields::default();
    for (i, token) in tokens.iter().enumerate() {
        let text = caps.get(i + 1)?.as_str();
        assign(&mut fields, *token, text, ParseMode::Strict)?;
    }
    Some(fields)
}

fn parse_forgiving(segments: &[Segment], input: &str) -> Option<Fields> {
    let mut fields = Fields::default();
    let mut rest = input;
    let mut matched_any = false;

    for segment in segments {
        match segment {
            Segment::Literal(text) => {
                // One character at a time: a separator that is missing from
                // the input must not stall the ones after it.
                for ch in text.chars() {
                    if let Some(idx) = rest.find(ch) {
                        rest = &rest[idx + ch.len_utf8()..];
                    }
                }
            }
            Segment::Token(token) => {
                let re = Regex::new(&token_pattern(*token, ParseMode::Forgiving)).ok()?;
                let Some(caps) = re.captures(rest) else {
                    continue;
                };
                let (Some(whole), Some(value)) = (caps.get(0), caps.get(1)) else {
                    continue;
                };
                assign(&mut fields, *token, value.as_str(), ParseMode::Forgiving)?;
                rest = &rest[whole.end()..];
                matched_any = true;
            }
        }
    }

    matched_any.then_some(fields)
}

fn assign(fields: &mut Fields, token: Token, text: &str, mode: ParseMode) -> Option<()> {
    let number = || text.parse::<u32>().ok();
    match token {
        Token::Year => fields.year = Some(parse_year(text, mode)?),
        Token::YearTwoDigit => fields.year = Some(two_digit_year(text)?),
        Token::WeekYear => fields.week_year = Some(parse_year(text, mode)?),
        Token::WeekYearTwoDigit => fields.week_year = Some(two_digit_year(text)?),
        Token::IsoWeekYear => fields.iso_week_year = Some(parse_year(text, mode)?),
        Token::IsoWeekYearTwoDigit => fields.iso_week_year = Some(two_digit_year(text)?),
        Token::Quarter => fields.quarter = Some(number()?),
        Token::Month | Token::MonthPadded => fields.month = Some(number()?),
        Token::MonthShort | Token::MonthLong => fields.month = Some(month_from_name(text)?),
        Token::Day | Token::DayPadded | Token::DayOrdinal => fields.day = Some(number()?),
        Token::DayOfYear | Token::DayOfYearPadded => fields.day_of_year = Some(number()?),
        Token::Week | Token::WeekPadded => fields.week = Some(number()?),
        Token::IsoWeek | Token::IsoWeekPadded => fields.iso_week = Some(number()?),
        Token::Weekday => fields.weekday = Some(weekday_from_sunday(number()?)?),
        Token::WeekdayMin | Token::WeekdayShort | Token::WeekdayLong => {
            fields.weekday = Some(weekday_from_name(text)?);
        }
        Token::LocaleWeekday => fields.locale_weekday = Some(number()?),
        Token::IsoWeekday => fields.iso_weekday = Some(number()?),
        Token::Hour | Token::HourPadded => fields.hour = Some(number()?),
        Token::Hour12 | Token::Hour12Padded => {
            fields.hour = Some(number()?);
            fields.twelve_hour = true;
        }
        Token::Minute | Token::MinutePadded => fields.minute = Some(number()?),
        Token::Second | Token::SecondPadded => fields.second = Some(number()?),
        Token::MeridiemUpper | Token::MeridiemLower => {
            let pm = text.to_ascii_lowercase().starts_with('p');
            fields.meridiem = Some(if pm { Meridiem::Pm } else { Meridiem::Am });
        }
    }
    Some(())
}

fn parse_year(text: &str, mode: ParseMode) -> Option<i32> {
    if mode == ParseMode::Forgiving && text.len() == 2 {
        return two_digit_year(text);
    }
    text.parse().ok()
}

/// Two-digit years pivot at 68: `69` is 1969, `68` is 2068.
fn two_digit_year(text: &str) -> Option<i32> {
    let yy: i32 = text.parse().ok()?;
    Some(yy + if yy > 68 { 1900 } else { 2000 })
}

fn weekday_from_sunday(n: u32) -> Option<Weekday> {
    WEEKDAYS.get(usize::try_from(n).ok()?).copied()
}

#[cfg(test)]
mod tests {
    use super::super::token::tokenize;
    use super::*;

    fn strict(format: &str, input: &str) -> Option<Fields> {
        parse_fields(&tokenize(format), input, ParseMode::Strict)
    }

    fn forgiving(format: &str, input: &str) -> Option<Fields> {
        parse_fields(&tokenize(format), input, ParseMode::Forgiving)
    }

    #[test]
    fn test_strict_reads_fields() {
        let fields = strict("YYYY-MM-DD", "2020-12-01").unwrap();
        assert_eq!(fields.year, Some(2020));
        assert_eq!(fields.month, Some(12));
        assert_eq!(fields.day, Some(1));
    }

    #[test]
    fn test_strict_rejects_trailing_text() {
        assert!(strict("YYYY-MM-DD", "2020-12-01 standup").is_none());
        assert!(strict("YYYY-MM-DD", "x2020-12-01").is_none());
    }

    #[test]
    fn test_strict_requires_exact_separators() {
        assert!(strict("YYYY-MM-DD", "2020 12 01").is_none());
        assert!(strict("YYYY-MM-DD", "2020/12/01").is_none());
    }

    #[test]
    fn test_strict_requires_padded_width() {
        assert!(strict("YYYY-MM-DD", "2020-1-01").is_none());
        assert!(strict("YYYY-M-D", "2020-1-1").is_some());
        assert!(strict("YYYY-M-D", "2020-11-21").is_some());
    }

    #[test]
    fn test_strict_escaped_literal_must_match() {
        let fields = strict("gggg-[W]ww", "2021-W02").unwrap();
        assert_eq!(fields.week_year, Some(2021));
        assert_eq!(fields.week, Some(2));
        assert!(strict("gggg-[W]ww", "2021-02").is_none());
    }

    #[test]
    fn test_strict_literal_is_not_a_regex() {
        assert!(strict("YYYY.MM", "2021.03").is_some());
        assert!(strict("YYYY.MM", "2021x03").is_none());
    }

    #[test]
    fn test_names_and_ordinals() {
        let fields = strict("MMMM Do, YYYY", "February 3rd, 2021").unwrap();
        assert_eq!(fields.month, Some(2));
        assert_eq!(fields.day, Some(3));
        assert_eq!(fields.year, Some(2021));

        let fields = strict("ddd MMM D YYYY", "wed feb 3 2021").unwrap();
        assert_eq!(fields.weekday, Some(Weekday::Wed));
        assert_eq!(fields.month, Some(2));
    }

    #[test]
    fn test_strict_names_follow_token_width() {
        assert!(strict("MMM YYYY", "February 2021").is_none());
        assert_eq!(strict("MMM YYYY", "feb 2021").unwrap().month, Some(2));
        assert!(strict("MMMM YYYY", "Feb 2021").is_none());
        assert_eq!(strict("MMMM YYYY", "May 2021").unwrap().month, Some(5));

        assert!(strict("dddd YYYY-MM-DD", "We 2021-02-03").is_none());
        assert!(strict("dddd YYYY-MM-DD", "wed 2021-02-03").is_none());
        assert!(strict("ddd YYYY-MM-DD", "Wednesday 2021-02-03").is_none());
        assert!(strict("dd YYYY-MM-DD", "Wed 2021-02-03").is_none());
        assert_eq!(strict("dd YYYY-MM-DD", "we 2021-02-03").unwrap().weekday, Some(Weekday::Wed));
    }

    #[test]
    fn test_forgiving_names_accept_any_width() {
        assert_eq!(forgiving("MMM YYYY", "February 2021").unwrap().month, Some(2));
        assert_eq!(forgiving("dddd", "wed").unwrap().weekday, Some(Weekday::Wed));
    }

    #[test]
    fn test_two_digit_year_pivot() {
        assert_eq!(strict("YY", "69").unwrap().year, Some(1969));
        assert_eq!(strict("YY", "68").unwrap().year, Some(2068));
        assert_eq!(strict("YY", "21").unwrap().year, Some(2021));
    }

    #[test]
    fn test_time_fields() {
        let fields = strict("YYYY-MM-DD-hhmm a", "2020-12-01-0408 pm").unwrap();
        assert_eq!(fields.hour, Some(4));
        assert_eq!(fields.minute, Some(8));
        assert!(fields.twelve_hour);
        assert_eq!(fields.meridiem, Some(Meridiem::Pm));
    }

    #[test]
    fn test_forgiving_skips_unmatched_text() {
        // Month token removed: the "02" between the separators is skipped.
        let fields = forgiving("gggg--[W]ww", "2021-02-W07").unwrap();
        assert_eq!(fields.week_year, Some(2021));
        assert_eq!(fields.week, Some(7));
        assert_eq!(fields.month, None);
    }

    #[test]
    fn test_forgiving_allows_loose_widths_and_leftovers() {
        let fields = forgiving("YYYY-MM-DD", "2020-1-5 extra").unwrap();
        assert_eq!(fields.month, Some(1));
        assert_eq!(fields.day, Some(5));
    }

    #[test]
    fn test_forgiving_needs_at_least_one_field() {
        assert!(forgiving("YYYY", "no digits here").is_none());
    }

    #[test]
    fn test_weekday_number() {
        assert_eq!(strict("d", "0").unwrap().weekday, Some(Weekday::Sun));
        assert_eq!(strict("d", "3").unwrap().weekday, Some(Weekday::Wed));
        assert!(strict("d", "7").is_none());
    }
}
