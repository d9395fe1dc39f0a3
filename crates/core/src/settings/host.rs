//! Settings read from the host application's plugin data files.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{PeriodicNoteSettings, RawNoteSettings, SettingsProvider, StaticSettings};
use crate::granularity::Granularity;

const HOST_CONFIG_DIR: &str = ".obsidian";
const DAILY_NOTES_FILE: &str = "daily-notes.json";
const CALENDAR_PLUGIN_FILE: &str = "plugins/calendar/data.json";
const PERIODIC_NOTES_PLUGIN_FILE: &str = "plugins/periodic-notes/data.json";

/// Where note settings come from. Chosen once, from the config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SettingsSource {
    /// The `notes` tables of the active profile.
    #[default]
    Static,
    /// The host's core daily-notes plugin (daily notes only).
    DailyNotes,
    /// The calendar community plugin (weekly notes only).
    Calendar,
    /// The periodic-notes community plugin, falling back to the daily-notes
    /// and calendar plugins for periodicities it has disabled.
    PeriodicNotes,
}

impl SettingsSource {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SettingsSource::Static => "static",
            SettingsSource::DailyNotes => "daily-notes",
            SettingsSource::Calendar => "calendar",
            SettingsSource::PeriodicNotes => "periodic-notes",
        }
    }
}

impl fmt::Display for SettingsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options of the core daily-notes plugin (`daily-notes.json`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct DailyNotesSettings {
    pub options: RawNoteSettings,
}

impl SettingsProvider for DailyNotesSettings {
    fn note_settings(&self, granularity: Granularity) -> PeriodicNoteSettings {
        match granularity {
            Granularity::Day => self.options.cleanse(granularity),
            _ => PeriodicNoteSettings::default_for(granularity),
        }
    }
}

/// Options of the calendar plugin. Only weekly notes are configurable there.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarPluginSettings {
    #[serde(default)]
    pub weekly_note_format: Option<String>,
    #[serde(default)]
    pub weekly_note_folder: Option<String>,
    #[serde(default)]
    pub weekly_note_template: Option<String>,
}

impl SettingsProvider for CalendarPluginSettings {
    fn note_settings(&self, granularity: Granularity) -> PeriodicNoteSettings {
        if granularity != Granularity::Week {
            return PeriodicNoteSettings::default_for(granularity);
        }
        RawNoteSettings {
            folder: self.weekly_note_folder.clone(),
            format: self.weekly_note_format.clone(),
            template: self.weekly_note_template.clone(),
        }
        .cleanse(granularity)
    }
}

/// One periodicity of the periodic-notes plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PeriodicityConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(flatten)]
    pub settings: RawNoteSettings,
}

/// Options of the periodic-notes plugin, one block per periodicity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PeriodicNotesPluginSettings {
    #[serde(default)]
    pub daily: Option<PeriodicityConfig>,
    #[serde(default)]
    pub weekly: Option<PeriodicityConfig>,
    #[serde(default)]
    pub monthly: Option<PeriodicityConfig>,
    #[serde(default)]
    pub quarterly: Option<PeriodicityConfig>,
    #[serde(default)]
    pub yearly: Option<PeriodicityConfig>,
}

impl PeriodicNotesPluginSettings {
    /// The block for `granularity`, if present and enabled.
    #[must_use]
    pub fn enabled(&self, granularity: Granularity) -> Option<&PeriodicityConfig> {
        let block = match granularity {
            Granularity::Day => &self.daily,
            Granularity::Week => &self.weekly,
            Granularity::Month => &self.monthly,
            Granularity::Quarter => &self.quarterly,
            Granularity::Year => &self.yearly,
        };
        block.as_ref().filter(|b| b.enabled)
    }
}

impl SettingsProvider for PeriodicNotesPluginSettings {
    fn note_settings(&self, granularity: Granularity) -> PeriodicNoteSettings {
        match self.enabled(granularity) {
            Some(block) => block.settings.cleanse(granularity),
            None => PeriodicNoteSettings::default_for(granularity),
        }
    }
}

/// Provider backed by the host's plugin files under `<vault>/.obsidian`.
///
/// Files are read on every query, so edits made in the host while we run
/// are picked up. A missing or malformed file reads as empty settings.
#[derive(Debug, Clone)]
pub struct HostSettingsFile {
    config_dir: PathBuf,
    source: SettingsSource,
}

impl HostSettingsFile {
    #[must_use]
    pub fn new(vault_root: &Path, source: SettingsSource) -> Self {
        Self { config_dir: vault_root.join(HOST_CONFIG_DIR), source }
    }

    #[must_use]
    pub fn source(&self) -> SettingsSource {
        self.source
    }

    fn daily_notes(&self) -> DailyNotesSettings {
        read_json(&self.config_dir.join(DAILY_NOTES_FILE))
    }

    fn calendar(&self) -> CalendarPluginSettings {
        read_json(&self.config_dir.join(CALENDAR_PLUGIN_FILE))
    }

    fn periodic_notes(&self) -> PeriodicNotesPluginSettings {
        read_json(&self.config_dir.join(PERIODIC_NOTES_PLUGIN_FILE))
    }
}

impl SettingsProvider for HostSettingsFile {
    fn note_settings(&self, granularity: Granularity) -> PeriodicNoteSettings {
        match self.source {
            SettingsSource::Static => PeriodicNoteSettings::default_for(granularity),
            SettingsSource::DailyNotes => self.daily_notes().note_settings(granularity),
            SettingsSource::Calendar => self.calendar().note_settings(granularity),
            SettingsSource::PeriodicNotes => {
                let plugin = self.periodic_notes();
                if let Some(block) = plugin.enabled(granularity) {
                    return block.settings.cleanse(granularity);
                }
                match granularity {
                    Granularity::Day => self.daily_notes().note_settings(granularity),
                    Granularity::Week => self.calendar().note_settings(granularity),
                    _ => PeriodicNoteSettings::default_for(granularity),
                }
            }
        }
    }
}

/// Build the provider for `source`.
///
/// `notes` is only used by [`SettingsSource::Static`]; host sources read the
/// plugin files under `vault_root`.
#[must_use]
pub fn load_settings_provider(
    source: SettingsSource,
    vault_root: &Path,
    notes: StaticSettings,
) -> Box<dyn SettingsProvider> {
    tracing::debug!(%source, vault = %vault_root.display(), "settings provider selected");
    match source {
        SettingsSource::Static => Box::new(notes),
        _ => Box::new(HostSettingsFile::new(vault_root, source)),
    }
}

fn read_json<T: DeserializeOwned + Default>(path: &Path) -> T {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            tracing::debug!(
                path = %path.display(),
                error = %e,
                "no host settings, using defaults"
            );
            return T::default();
        }
    };
    serde_json::from_str(&contents).unwrap_or_else(|e| {
        tracing::debug!(
            path = %path.display(),
            error = %e,
            "malformed host settings, using defaults"
        );
        T::default()
    })
}
