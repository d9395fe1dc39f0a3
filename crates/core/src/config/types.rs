use std::collections::HashMap;
use std::path::PathBuf;

use chrono_tz::Tz;
use serde::Deserialize;

use crate::calendar::{Calendar, WeekConvention};
use crate::granularity::Granularity;
use crate::matcher::DateMatcher;
use crate::notes::FsFileStore;
use crate::settings::{
    RawNoteSettings, SettingsProvider, SettingsSource, StaticSettings, load_settings_provider,
};

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub version: u32,
    pub profile: Option<String>,
    pub profiles: HashMap<String, Profile>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct Profile {
    pub vault_root: String,
    /// Where per-granularity folder/format/template settings come from.
    #[serde(default)]
    pub settings: SettingsSource,
    /// IANA time zone name; note dates are interpreted in this zone.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// First day of the week (defaults to Sunday).
    #[serde(default)]
    pub week_start: Option<String>,
    /// January day that always falls in week one. Defaults to 4 for
    /// Monday-start weeks (ISO) and 1 otherwise.
    #[serde(default)]
    pub first_week_contains: Option<u32>,
    /// Static note settings, used when `settings = "static"`.
    #[serde(default)]
    pub notes: HashMap<Granularity, RawNoteSettings>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_timezone() -> String {
    "UTC".to_string()
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub active_profile: String,
    pub vault_root: PathBuf,
    pub settings_source: SettingsSource,
    pub timezone: Tz,
    pub week: WeekConvention,
    pub notes: StaticSettings,
    pub logging: LoggingConfig,
}

impl ResolvedConfig {
    /// Calendar for this profile, reading the system clock.
    #[must_use]
    pub fn calendar(&self) -> Calendar {
        Calendar::new(self.timezone, self.week)
    }

    #[must_use]
    pub fn settings_provider(&self) -> Box<dyn SettingsProvider> {
        load_settings_provider(self.settings_source, &self.vault_root, self.notes.clone())
    }

    #[must_use]
    pub fn matcher(&self) -> DateMatcher {
        DateMatcher::new(self.settings_provider(), self.calendar())
    }

    #[must_use]
    pub fn file_store(&self) -> FsFileStore {
        FsFileStore::new(&self.vault_root)
    }
}
