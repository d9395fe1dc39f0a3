//! Date formats: tokenizing, parsing and rendering.
//!
//! A [`DateFormat`] is the tokenized form of a user format string such as
//! `gggg-[W]ww`. Parsing never errors: input that does not fit the format is
//! simply `None`, because most files in a notes folder are not dated notes.

mod display;
mod names;
mod parse;
mod resolve;
mod token;

use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono_tz::Tz;
use thiserror::Error;

use crate::calendar::Calendar;
use crate::granularity::Granularity;

pub use display::format_date;
pub use parse::ParseMode;
pub use token::{Segment, Token, TokenClass, tokenize};

/// Error type for validating a user-supplied format.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("format is empty")]
    Empty,

    #[error("format '{0}' contains no date tokens")]
    NoDateTokens(String),
}

/// A tokenized date format.
///
/// Displays as the text it was built from. Two formats are equal when they
/// tokenize the same, so `gggg-[W]ww` equals `gggg[-W]ww`.
#[derive(Debug, Clone)]
pub struct DateFormat {
    source: String,
    segments: Vec<Segment>,
}

impl DateFormat {
    /// Tokenize `format`. Any string is accepted; text that is not a token
    /// becomes a literal.
    #[must_use]
    pub fn new(format: &str) -> Self {
        Self { source: format.to_string(), segments: tokenize(format) }
    }

    /// The format as stored in host settings.
    ///
    /// Settings sometimes hold a path (`Journal/YYYY/YYYY-MM-DD`); only the
    /// part after the last `/` names the file. A blank format falls back to
    /// the granularity's default.
    #[must_use]
    pub fn from_setting(raw: &str, granularity: Granularity) -> Self {
        let last = raw.rsplit('/').next().unwrap_or(raw).trim();
        if last.is_empty() {
            Self::new(granularity.default_format())
        } else {
            Self::new(last)
        }
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether any token of `class` appears outside escaped literals.
    #[must_use]
    pub fn has_class(&self, class: TokenClass) -> bool {
        self.tokens().any(|t| t.class() == class)
    }

    pub fn tokens(&self) -> impl Iterator<Item = Token> + '_ {
        self.segments.iter().filter_map(|s| match s {
            Segment::Token(t) => Some(*t),
            Segment::Literal(_) => None,
        })
    }

    /// A copy of this format with every token of the given classes removed.
    /// Literal runs left next to each other are merged.
    #[must_use]
    pub fn without_classes(&self, classes: &[TokenClass]) -> Self {
        let mut segments: Vec<Segment> = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            match segment {
                Segment::Token(t) if classes.contains(&t.class()) => {}
                Segment::Literal(text) => {
                    if let Some(Segment::Literal(prev)) = segments.last_mut() {
                        prev.push_str(text);
                    } else {
                        segments.push(segment.clone());
                    }
                }
                Segment::Token(_) => segments.push(segment.clone()),
            }
        }
        Self { source: render_segments(&segments), segments }
    }

    /// Read `input` as a point in `calendar`'s time zone.
    ///
    /// The result is not truncated to any period; fields missing from the
    /// format take their defaults (see the module docs of `resolve`).
    #[must_use]
    pub fn parse_with(
        &self,
        input: &str,
        mode: ParseMode,
        calendar: &Calendar,
    ) -> Option<DateTime<Tz>> {
        let fields = parse::parse_fields(&self.segments, input, mode)?;
        resolve::resolve(&fields, calendar)
    }

    /// Render `point` with this format.
    #[must_use]
    pub fn format(&self, point: DateTime<Tz>, calendar: &Calendar) -> String {
        format_date(point, self, calendar)
    }
}

impl FromStr for DateFormat {
    type Err = FormatError;

    /// Validating constructor for user input: rejects blank formats and
    /// formats that would match no date at all.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(FormatError::Empty);
        }
        let format = Self::new(s);
        if format.tokens().next().is_none() {
            return Err(FormatError::NoDateTokens(s.to_string()));
        }
        Ok(format)
    }
}

impl PartialEq for DateFormat {
    fn eq(&self, other: &Self) -> bool {
        self.segments == other.segments
    }
}

impl Eq for DateFormat {}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Format text that tokenizes back to `segments`.
///
/// `]` cannot appear inside an escape, so literals are split on it and the
/// bracket is written bare; pieces holding letters or `[` are escaped.
fn render_segments(segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Token(t) => out.push_str(t.as_str()),
            Segment::Literal(text) => {
                for (i, piece) in text.split(']').enumerate() {
                    if i > 0 {
                        out.push(']');
                    }
                    if piece.chars().any(|c| c.is_alphabetic() || c == '[') {
                        out.push('[');
                        out.push_str(piece);
                        out.push(']');
                    } else {
                        out.push_str(piece);
                    }
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_setting_keeps_last_segment() {
        let format = DateFormat::from_setting("Journal/YYYY/YYYY-MM-DD", Granularity::Day);
        assert_eq!(format, DateFormat::new("YYYY-MM-DD"));
    }

    #[test]
    fn test_from_setting_blank_uses_default() {
        assert_eq!(DateFormat::from_setting("", Granularity::Week), DateFormat::new("gggg-[W]ww"));
        assert_eq!(
            DateFormat::from_setting("Notes/", Granularity::Quarter),
            DateFormat::new("YYYY-[Q]Q")
        );
    }

    #[test]
    fn test_has_class_ignores_escaped_text() {
        let format = DateFormat::new("[Week of] YYYY-MM");
        assert!(format.has_class(TokenClass::Month));
        assert!(!format.has_class(TokenClass::Week));
        assert!(!format.has_class(TokenClass::Weekday));
    }

    #[test]
    fn test_without_classes_merges_literals() {
        let format = DateFormat::new("gggg-MM-[W]ww");
        let reduced = format.without_classes(&[TokenClass::Month, TokenClass::DayOfMonth]);
        assert_eq!(
            reduced.segments(),
            &[
                Segment::Token(Token::WeekYear),
                Segment::Literal("--W".to_string()),
                Segment::Token(Token::WeekPadded),
            ]
        );
    }

    #[test]
    fn test_display_shows_configured_text() {
        for text in ["gggg-[W]ww", "YYYY-[Q]Q", "[Week] ww, gggg", "[[]YYYY[]]"] {
            let format = DateFormat::new(text);
            assert_eq!(format.to_string(), text);
            assert_eq!(DateFormat::new(&format.to_string()), format);
        }
    }

    #[test]
    fn test_equality_follows_tokens() {
        assert_eq!(DateFormat::new("gggg-[W]ww"), DateFormat::new("gggg[-W]ww"));
        assert_ne!(DateFormat::new("[[]YYYY[]]"), DateFormat::new("[YYYY]"));
    }

    #[test]
    fn test_reduced_format_text_round_trips() {
        let reduced = DateFormat::new("[[]gggg[]]-MM-[W]ww").without_classes(&[TokenClass::Month]);
        insta::assert_snapshot!(reduced.to_string(), @"[[]gggg][--W]ww");
        assert_eq!(DateFormat::new(&reduced.to_string()), reduced);

        let words = DateFormat::new("[Week of] MMMM").without_classes(&[TokenClass::Month]);
        assert_eq!(words.to_string(), "[Week of ]");
        assert_eq!(DateFormat::new(&words.to_string()), words);
    }

    #[test]
    fn test_from_str_validation() {
        assert_eq!("".parse::<DateFormat>(), Err(FormatError::Empty));
        assert_eq!(
            "[notes]".parse::<DateFormat>(),
            Err(FormatError::NoDateTokens("[notes]".to_string()))
        );
        assert!("YYYY".parse::<DateFormat>().is_ok());
    }

    #[test]
    fn test_parse_with_modes() {
        let cal = Calendar::default();
        let format = DateFormat::new("YYYY-MM-DD");
        let strict = format.parse_with("2020-12-01", ParseMode::Strict, &cal).unwrap();
        assert_eq!(strict.to_rfc3339(), "2020-12-01T00:00:00+00:00");
        assert!(format.parse_with("2020-12-01 notes", ParseMode::Strict, &cal).is_none());
        assert!(format.parse_with("2020-12-01 notes", ParseMode::Forgiving, &cal).is_some());
    }
}
