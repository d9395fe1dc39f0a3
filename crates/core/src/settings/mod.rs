//! Per-granularity note settings and the providers that supply them.
//!
//! A [`SettingsProvider`] answers "where do weekly notes live and how are they
//! named". Each host integration (the daily-notes core plugin, the calendar
//! plugin, the periodic-notes plugin, or a static table from our own config)
//! is one implementation, picked once at startup through [`SettingsSource`].

mod host;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::format::DateFormat;
use crate::granularity::Granularity;

pub use host::{
    CalendarPluginSettings, DailyNotesSettings, HostSettingsFile, PeriodicNotesPluginSettings,
    PeriodicityConfig, SettingsSource, load_settings_provider,
};

/// Settings for one granularity, with blanks already replaced by defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodicNoteSettings {
    pub folder: String,
    pub format: String,
    pub template: String,
}

impl PeriodicNoteSettings {
    #[must_use]
    pub fn default_for(granularity: Granularity) -> Self {
        Self {
            folder: String::new(),
            format: granularity.default_format().to_string(),
            template: String::new(),
        }
    }
}

/// Settings as stored by a host: every field optional, whitespace allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawNoteSettings {
    #[serde(default)]
    pub folder: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub template: Option<String>,
}

impl RawNoteSettings {
    /// Trim folder and template; a missing or blank format becomes the
    /// granularity's default.
    #[must_use]
    pub fn cleanse(&self, granularity: Granularity) -> PeriodicNoteSettings {
        let trimmed =
            |s: &Option<String>| s.as_deref().map(str::trim).unwrap_or_default().to_string();
        let format = match self.format.as_deref() {
            Some(f) if !f.trim().is_empty() => f.to_string(),
            _ => granularity.default_format().to_string(),
        };
        PeriodicNoteSettings {
            folder: trimmed(&self.folder),
            format,
            template: trimmed(&self.template),
        }
    }
}

/// Source of per-granularity note settings.
///
/// Implementations are queried on every operation; nothing downstream caches
/// the answer.
pub trait SettingsProvider: Send + Sync {
    fn note_settings(&self, granularity: Granularity) -> PeriodicNoteSettings;

    fn format(&self, granularity: Granularity) -> DateFormat {
        DateFormat::from_setting(&self.note_settings(granularity).format, granularity)
    }

    fn folder(&self, granularity: Granularity) -> String {
        self.note_settings(granularity).folder
    }

    fn template(&self, granularity: Granularity) -> String {
        self.note_settings(granularity).template
    }
}

impl<P: SettingsProvider + ?Sized> SettingsProvider for Box<P> {
    fn note_settings(&self, granularity: Granularity) -> PeriodicNoteSettings {
        (**self).note_settings(granularity)
    }
}

/// Fixed settings, typically from the `[profiles.<name>.notes]` tables of the
/// config file. Granularities without an entry use defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticSettings {
    notes: HashMap<Granularity, RawNoteSettings>,
}

impl StaticSettings {
    #[must_use]
    pub fn new(notes: HashMap<Granularity, RawNoteSettings>) -> Self {
        Self { notes }
    }

    /// Set the format for one granularity, keeping other settings.
    #[must_use]
    pub fn with_format(mut self, granularity: Granularity, format: &str) -> Self {
        self.notes.entry(granularity).or_default().format = Some(format.to_string());
        self
    }

    #[must_use]
    pub fn with_folder(mut self, granularity: Granularity, folder: &str) -> Self {
        self.notes.entry(granularity).or_default().folder = Some(folder.to_string());
        self
    }
}

impl SettingsProvider for StaticSettings {
    fn note_settings(&self, granularity: Granularity) -> PeriodicNoteSettings {
        match self.notes.get(&granularity) {
            Some(raw) => raw.cleanse(granularity),
            None => PeriodicNoteSettings::default_for(granularity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleanse_trims_and_defaults() {
        let raw = RawNoteSettings {
            folder: Some("  Journal/Daily ".into()),
            format: Some("   ".into()),
            template: Some(" Templates/day.md\n".into()),
        };
        let settings = raw.cleanse(Granularity::Day);
        assert_eq!(settings.folder, "Journal/Daily");
        assert_eq!(settings.format, "YYYY-MM-DD");
        assert_eq!(settings.template, "Templates/day.md");
    }

    #[test]
    fn test_cleanse_keeps_format_verbatim() {
        let raw = RawNoteSettings { format: Some("gggg [week] ww".into()), ..Default::default() };
        assert_eq!(raw.cleanse(Granularity::Week).format, "gggg [week] ww");
    }

    #[test]
    fn test_static_defaults() {
        let settings = StaticSettings::default();
        for g in Granularity::ALL {
            assert_eq!(settings.note_settings(g), PeriodicNoteSettings::default_for(g));
        }
        assert_eq!(settings.format(Granularity::Quarter), DateFormat::new("YYYY-[Q]Q"));
    }

    #[test]
    fn test_format_drops_folder_prefix() {
        let settings =
            StaticSettings::default().with_format(Granularity::Month, "Archive/YYYY/YYYY-MM");
        assert_eq!(settings.format(Granularity::Month), DateFormat::new("YYYY-MM"));
    }

    #[test]
    fn test_boxed_provider_delegates() {
        let boxed: Box<dyn SettingsProvider> =
            Box::new(StaticSettings::default().with_folder(Granularity::Year, "Years"));
        assert_eq!(boxed.folder(Granularity::Year), "Years");
    }
}
