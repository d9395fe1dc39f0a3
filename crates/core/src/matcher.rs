//! Match note filenames against the configured formats.
//!
//! The matcher asks its [`SettingsProvider`] for the format on every call and
//! answers with the start of the period a filename names, or `None`.
//!
//! Week formats that mix a week number with only one of month or day are
//! ambiguous: `gggg-MM-[W]ww` would otherwise resolve to the first of the
//! month and ignore the week. For those, the filename must still have the
//! exact shape of the full format, but the date is read from the week fields
//! alone.

use std::path::{Path, PathBuf};

use chrono::DateTime;
use chrono_tz::Tz;

use crate::calendar::Calendar;
use crate::format::{DateFormat, ParseMode, TokenClass};
use crate::granularity::Granularity;
use crate::settings::SettingsProvider;
use crate::uid::date_uid;

const NOTE_EXTENSION: &str = "md";

/// Whether `format` mixes week numbers with a partial month/day signal.
#[must_use]
pub fn is_ambiguous(format: &DateFormat, granularity: Granularity) -> bool {
    if granularity != Granularity::Week {
        return false;
    }
    let has_week = format.has_class(TokenClass::Week) || format.has_class(TokenClass::IsoWeek);
    let has_month = format.has_class(TokenClass::Month);
    let has_day =
        format.has_class(TokenClass::DayOfMonth) || format.has_class(TokenClass::DayOfYear);
    has_week && (has_month ^ has_day)
}

/// Read `basename` with `format` and return the start of its period.
#[must_use]
pub fn match_date(
    basename: &str,
    format: &DateFormat,
    granularity: Granularity,
    calendar: &Calendar,
) -> Option<DateTime<Tz>> {
    let point = if is_ambiguous(format, granularity) {
        // Shape check first: separators, widths and trailing text must fit.
        format.parse_with(basename, ParseMode::Strict, calendar)?;
        format
            .without_classes(&[TokenClass::Month, TokenClass::DayOfMonth, TokenClass::DayOfYear])
            .parse_with(basename, ParseMode::Forgiving, calendar)?
    } else {
        format.parse_with(basename, ParseMode::Strict, calendar)?
    };
    Some(calendar.start_of(point, granularity))
}

/// Filename matching and naming for periodic notes.
pub struct DateMatcher {
    settings: Box<dyn SettingsProvider>,
    calendar: Calendar,
}

impl std::fmt::Debug for DateMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DateMatcher").field("calendar", &self.calendar).finish_non_exhaustive()
    }
}

impl DateMatcher {
    #[must_use]
    pub fn new(settings: impl SettingsProvider + 'static, calendar: Calendar) -> Self {
        Self { settings: Box::new(settings), calendar }
    }

    #[must_use]
    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    #[must_use]
    pub fn settings(&self) -> &dyn SettingsProvider {
        self.settings.as_ref()
    }

    /// The effective filename format for `granularity`.
    #[must_use]
    pub fn format(&self, granularity: Granularity) -> DateFormat {
        self.settings.format(granularity)
    }

    #[must_use]
    pub fn date_uid(&self, point: DateTime<Tz>, granularity: Granularity) -> String {
        date_uid(point, granularity, &self.calendar)
    }

    /// The period a note basename (no folder, no extension) names, if any.
    #[must_use]
    pub fn date_from_filename(
        &self,
        basename: &str,
        granularity: Granularity,
    ) -> Option<DateTime<Tz>> {
        match_date(basename, &self.format(granularity), granularity, &self.calendar)
    }

    /// Like [`Self::date_from_filename`], taking a file path.
    #[must_use]
    pub fn date_from_path(&self, path: &Path, granularity: Granularity) -> Option<DateTime<Tz>> {
        let basename = path.file_stem()?.to_str()?;
        self.date_from_filename(basename, granularity)
    }

    /// The dateUID of the period a basename names, if any.
    #[must_use]
    pub fn uid_from_filename(&self, basename: &str, granularity: Granularity) -> Option<String> {
        self.date_from_filename(basename, granularity)
            .map(|point| self.date_uid(point, granularity))
    }

    /// Basename of the note for the period containing `point`.
    #[must_use]
    pub fn filename(&self, point: DateTime<Tz>, granularity: Granularity) -> String {
        self.format(granularity).format(point, &self.calendar)
    }

    /// Vault-relative path of the note for the period containing `point`.
    ///
    /// Only builds the path; nothing is created.
    #[must_use]
    pub fn note_path(&self, point: DateTime<Tz>, granularity: Granularity) -> PathBuf {
        let folder = self.settings.folder(granularity);
        let mut path = PathBuf::from(folder.trim_matches('/'));
        path.push(format!("{}.{NOTE_EXTENSION}", self.filename(point, granularity)));
        path
    }
}
