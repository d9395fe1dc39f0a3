//! Note granularity: the size of the period a periodic note covers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default filename format for daily notes.
pub const DEFAULT_DAILY_NOTE_FORMAT: &str = "YYYY-MM-DD";
/// Default filename format for weekly notes.
pub const DEFAULT_WEEKLY_NOTE_FORMAT: &str = "gggg-[W]ww";
/// Default filename format for monthly notes.
pub const DEFAULT_MONTHLY_NOTE_FORMAT: &str = "YYYY-MM";
/// Default filename format for quarterly notes.
pub const DEFAULT_QUARTERLY_NOTE_FORMAT: &str = "YYYY-[Q]Q";
/// Default filename format for yearly notes.
pub const DEFAULT_YEARLY_NOTE_FORMAT: &str = "YYYY";

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown granularity: {0} (expected day, week, month, quarter or year)")]
pub struct UnknownGranularity(pub String);

/// The period a note represents.
///
/// Serialized as the lowercase period name (`day`, `week`, ...). The
/// periodicity adjectives used by host settings (`daily`, `weekly`, ...) are
/// accepted as aliases.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    #[serde(alias = "daily")]
    Day,
    #[serde(alias = "weekly")]
    Week,
    #[serde(alias = "monthly")]
    Month,
    #[serde(alias = "quarterly")]
    Quarter,
    #[serde(alias = "yearly")]
    Year,
}

impl Granularity {
    /// Every granularity, shortest period first.
    pub const ALL: [Granularity; 5] = [
        Granularity::Day,
        Granularity::Week,
        Granularity::Month,
        Granularity::Quarter,
        Granularity::Year,
    ];

    /// Name used as the dateUID prefix.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
            Granularity::Quarter => "quarter",
            Granularity::Year => "year",
        }
    }

    /// Adjective form used by host settings (`daily`, `weekly`, ...).
    #[must_use]
    pub fn periodicity(self) -> &'static str {
        match self {
            Granularity::Day => "daily",
            Granularity::Week => "weekly",
            Granularity::Month => "monthly",
            Granularity::Quarter => "quarterly",
            Granularity::Year => "yearly",
        }
    }

    /// Format used when no setting is configured.
    #[must_use]
    pub fn default_format(self) -> &'static str {
        match self {
            Granularity::Day => DEFAULT_DAILY_NOTE_FORMAT,
            Granularity::Week => DEFAULT_WEEKLY_NOTE_FORMAT,
            Granularity::Month => DEFAULT_MONTHLY_NOTE_FORMAT,
            Granularity::Quarter => DEFAULT_QUARTERLY_NOTE_FORMAT,
            Granularity::Year => DEFAULT_YEARLY_NOTE_FORMAT,
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = UnknownGranularity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" | "daily" => Ok(Granularity::Day),
            "week" | "weekly" => Ok(Granularity::Week),
            "month" | "monthly" => Ok(Granularity::Month),
            "quarter" | "quarterly" => Ok(Granularity::Quarter),
            "year" | "yearly" => Ok(Granularity::Year),
            _ => Err(UnknownGranularity(s.to_string())),
        }
    }
}
