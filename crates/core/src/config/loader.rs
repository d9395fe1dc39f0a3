use std::path::{Path, PathBuf};
use std::{env, fs};

use chrono::Weekday;
use dirs::home_dir;
use shellexpand::full;
use thiserror::Error;

use crate::calendar::{CalendarError, WeekConvention, parse_timezone, parse_weekday};
use crate::config::types::{ConfigFile, LoggingConfig, Profile, ResolvedConfig};
use crate::settings::StaticSettings;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found at {0}")]
    NotFound(String),

    #[error("failed to read config file {0}: {1}")]
    ReadError(String, #[source] std::io::Error),

    #[error("failed to parse TOML in {0}: {1}")]
    ParseError(String, #[source] toml::de::Error),

    #[error("profile '{0}' not found")]
    ProfileNotFound(String),

    #[error("no profiles defined in config")]
    NoProfiles,

    #[error("version {0} is unsupported (expected 1)")]
    BadVersion(u32),

    #[error("home directory not available to expand '~'")]
    NoHome,

    #[error("invalid calendar settings in profile '{0}': {1}")]
    InvalidCalendar(String, #[source] CalendarError),
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(
        config_path: Option<&Path>,
        profile_override: Option<&str>,
    ) -> Result<ResolvedConfig, ConfigError> {
        let path = match config_path {
            Some(p) => p.to_path_buf(),
            None => default_config_path(),
        };

        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let s = fs::read_to_string(&path)
            .map_err(|e| ConfigError::ReadError(path.display().to_string(), e))?;

        let cf: ConfigFile = toml::from_str(&s)
            .map_err(|e| ConfigError::ParseError(path.display().to_string(), e))?;

        if cf.version != 1 {
            return Err(ConfigError::BadVersion(cf.version));
        }
        if cf.profiles.is_empty() {
            return Err(ConfigError::NoProfiles);
        }

        let active = profile_override
            .map(ToOwned::to_owned)
            .or(cf.profile.clone())
            .unwrap_or_else(|| "default".to_string());

        let prof = cf
            .profiles
            .get(&active)
            .ok_or_else(|| ConfigError::ProfileNotFound(active.clone()))?;

        Self::resolve_profile(&active, prof, &cf.logging)
    }

    fn resolve_profile(
        active: &str,
        prof: &Profile,
        log_cfg: &LoggingConfig,
    ) -> Result<ResolvedConfig, ConfigError> {
        let vault_root = expand_path(&prof.vault_root)?;
        let calendar_err = |e| ConfigError::InvalidCalendar(active.to_string(), e);

        let timezone = parse_timezone(&prof.timezone).map_err(calendar_err)?;
        let week = week_convention(prof).map_err(calendar_err)?;

        let logging = match &log_cfg.file {
            Some(file) => {
                let sub = file
                    .to_string_lossy()
                    .replace("{{vault_root}}", &vault_root.to_string_lossy());
                LoggingConfig { file: Some(expand_path(&sub)?), ..log_cfg.clone() }
            }
            None => log_cfg.clone(),
        };

        Ok(ResolvedConfig {
            active_profile: active.to_string(),
            vault_root,
            settings_source: prof.settings,
            timezone,
            week,
            notes: StaticSettings::new(prof.notes.clone()),
            logging,
        })
    }
}

fn week_convention(prof: &Profile) -> Result<WeekConvention, CalendarError> {
    let start = match prof.week_start.as_deref() {
        Some(name) => parse_weekday(name)?,
        None => Weekday::Sun,
    };
    let first_week_contains =
        prof.first_week_contains.unwrap_or(if start == Weekday::Mon { 4 } else { 1 });
    WeekConvention::new(start, first_week_contains)
}

pub fn default_config_path() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&xdg).join("periodic-notes").join("config.toml");
    }
    let home = home_dir().unwrap_or_else(|| PathBuf::from("~"));
    home.join(".config").join("periodic-notes").join("config.toml")
}

fn expand_path(input: &str) -> Result<PathBuf, ConfigError> {
    let expanded = full(input).map_err(|_| ConfigError::NoHome)?;
    Ok(PathBuf::from(expanded.to_string()))
}
