//! Format tokens and the tokenizer.
//!
//! Tokens follow the moment.js conventions used by note-taking hosts
//! (`YYYY-MM-DD`, `gggg-[W]ww`). Text inside `[...]` is a literal run and is
//! never read as tokens.

/// A single format token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// `YYYY`
    Year,
    /// `YY`
    YearTwoDigit,
    /// `gggg`
    WeekYear,
    /// `gg`
    WeekYearTwoDigit,
    /// `GGGG`
    IsoWeekYear,
    /// `GG`
    IsoWeekYearTwoDigit,
    /// `Q`
    Quarter,
    /// `M`
    Month,
    /// `MM`
    MonthPadded,
    /// `MMM`
    MonthShort,
    /// `MMMM`
    MonthLong,
    /// `D`
    Day,
    /// `DD`
    DayPadded,
    /// `Do`
    DayOrdinal,
    /// `DDD`
    DayOfYear,
    /// `DDDD`
    DayOfYearPadded,
    /// `w`
    Week,
    /// `ww`
    WeekPadded,
    /// `W`
    IsoWeek,
    /// `WW`
    IsoWeekPadded,
    /// `d`
    Weekday,
    /// `dd`
    WeekdayMin,
    /// `ddd`
    WeekdayShort,
    /// `dddd`
    WeekdayLong,
    /// `e`
    LocaleWeekday,
    /// `E`
    IsoWeekday,
    /// `H`
    Hour,
    /// `HH`
    HourPadded,
    /// `h`
    Hour12,
    /// `hh`
    Hour12Padded,
    /// `m`
    Minute,
    /// `mm`
    MinutePadded,
    /// `s`
    Second,
    /// `ss`
    SecondPadded,
    /// `A`
    MeridiemUpper,
    /// `a`
    MeridiemLower,
}

/// Broad category of a token, used for ambiguity analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    Year,
    WeekYear,
    IsoWeekYear,
    Quarter,
    Month,
    DayOfMonth,
    DayOfYear,
    Week,
    IsoWeek,
    Weekday,
    Hour,
    Minute,
    Second,
    Meridiem,
}

// Longest spellings first so `MMMM` is never read as `MM` + `MM`.
const TOKENS: &[(&str, Token)] = &[
    ("YYYY", Token::Year),
    ("gggg", Token::WeekYear),
    ("GGGG", Token::IsoWeekYear),
    ("MMMM", Token::MonthLong),
    ("DDDD", Token::DayOfYearPadded),
    ("dddd", Token::WeekdayLong),
    ("MMM", Token::MonthShort),
    ("DDD", Token::DayOfYear),
    ("ddd", Token::WeekdayShort),
    ("YY", Token::YearTwoDigit),
    ("gg", Token::WeekYearTwoDigit),
    ("GG", Token::IsoWeekYearTwoDigit),
    ("MM", Token::MonthPadded),
    ("DD", Token::DayPadded),
    ("Do", Token::DayOrdinal),
    ("ww", Token::WeekPadded),
    ("WW", Token::IsoWeekPadded),
    ("dd", Token::WeekdayMin),
    ("HH", Token::HourPadded),
    ("hh", Token::Hour12Padded),
    ("mm", Token::MinutePadded),
    ("ss", Token::SecondPadded),
    ("M", Token::Month),
    ("D", Token::Day),
    ("w", Token::Week),
    ("W", Token::IsoWeek),
    ("d", Token::Weekday),
    ("e", Token::LocaleWeekday),
    ("E", Token::IsoWeekday),
    ("Q", Token::Quarter),
    ("H", Token::Hour),
    ("h", Token::Hour12),
    ("m", Token::Minute),
    ("s", Token::Second),
    ("A", Token::MeridiemUpper),
    ("a", Token::MeridiemLower),
];

impl Token {
    /// The token's spelling in a format string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        TOKENS.iter().find(|(_, t)| *t == self).map_or("", |(s, _)| s)
    }

    #[must_use]
    pub fn class(self) -> TokenClass {
        match self {
            Token::Year | Token::YearTwoDigit => TokenClass::Year,
            Token::WeekYear | Token::WeekYearTwoDigit => TokenClass::WeekYear,
            Token::IsoWeekYear | Token::IsoWeekYearTwoDigit => TokenClass::IsoWeekYear,
            Token::Quarter => TokenClass::Quarter,
            Token::Month | Token::MonthPadded | Token::MonthShort | Token::MonthLong => {
                TokenClass::Month
            }
            Token::Day | Token::DayPadded | Token::DayOrdinal => TokenClass::DayOfMonth,
            Token::DayOfYear | Token::DayOfYearPadded => TokenClass::DayOfYear,
            Token::Week | Token::WeekPadded => TokenClass::Week,
            Token::IsoWeek | Token::IsoWeekPadded => TokenClass::IsoWeek,
            Token::Weekday
            | Token::WeekdayMin
            | Token::WeekdayShort
            | Token::WeekdayLong
            | Token::LocaleWeekday
            | Token::IsoWeekday => TokenClass::Weekday,
            Token::Hour | Token::HourPadded | Token::Hour12 | Token::Hour12Padded => {
                TokenClass::Hour
            }
            Token::Minute | Token::MinutePadded => TokenClass::Minute,
            Token::Second | Token::SecondPadded => TokenClass::Second,
            Token::MeridiemUpper | Token::MeridiemLower => TokenClass::Meridiem,
        }
    }
}

/// A piece of a tokenized format string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Token(Token),
    Literal(String),
}

/// Split a format string into tokens and literal runs.
///
/// Never fails: anything that is not a token is literal text, and an
/// unterminated `[` is a literal bracket.
#[must_use]
pub fn tokenize(format: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut rest = format;

    while let Some(ch) = rest.chars().next() {
        if ch == '['
            && let Some(end) = rest[1..].find(']')
        {
            literal.push_str(&rest[1..=end]);
            rest = &rest[end + 2..];
            continue;
        }

        if let Some((text, token)) = TOKENS.iter().find(|(text, _)| rest.starts_with(text)) {
            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Token(*token));
            rest = &rest[text.len()..];
            continue;
        }

        literal.push(ch);
        rest = &rest[ch.len_utf8()..];
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    segments
}
