use chrono::Weekday;
use periodic_notes_core::config::loader::ConfigLoader;
use periodic_notes_core::{Granularity, SettingsProvider, SettingsSource, WeekConvention};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn write_file(path: &PathBuf, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn load_default_profile_ok() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.toml");
    let toml = r#"
version = 1
profile = "default"

[profiles.default]
vault_root = "/tmp/vault"
timezone = "America/New_York"

[profiles.default.notes.week]
folder = "Journal/Weekly"
format = "gggg-[W]ww"

[profiles.default.notes.quarter]
format = "YYYY [Q]Q"
"#;

    write_file(&cfg_path, toml);

    let rc = ConfigLoader::load(Some(&cfg_path), None).expect("should load");
    assert_eq!(rc.active_profile, "default");
    assert_eq!(rc.vault_root.display().to_string(), "/tmp/vault");
    assert_eq!(rc.timezone, chrono_tz::America::New_York);
    assert_eq!(rc.settings_source, SettingsSource::Static);
    assert_eq!(rc.week, WeekConvention::SUNDAY);

    let provider = rc.settings_provider();
    assert_eq!(provider.folder(Granularity::Week), "Journal/Weekly");
    assert_eq!(provider.note_settings(Granularity::Quarter).format, "YYYY [Q]Q");
    assert_eq!(provider.note_settings(Granularity::Day).format, "YYYY-MM-DD");
}

#[test]
fn load_with_profile_override_ok() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("periodic-notes/config.toml");
    let toml = r#"
version = 1
profile = "default"

[profiles.default]
vault_root = "/tmp/def"

[profiles.work]
vault_root = "/tmp/work"
settings = "periodic-notes"
week_start = "monday"
"#;
    write_file(&cfg_path, toml);

    let rc = ConfigLoader::load(Some(&cfg_path), Some("work")).expect("should load");
    assert_eq!(rc.active_profile, "work");
    assert_eq!(rc.vault_root.display().to_string(), "/tmp/work");
    assert_eq!(rc.settings_source, SettingsSource::PeriodicNotes);
    assert_eq!(rc.week, WeekConvention::ISO);
    assert_eq!(rc.timezone, chrono_tz::Tz::UTC);
}

#[test]
fn explicit_first_week_rule_ok() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.toml");
    let toml = r#"
version = 1
[profiles.default]
vault_root = "/tmp/vault"
week_start = "Saturday"
first_week_contains = 1
"#;
    write_file(&cfg_path, toml);

    let rc = ConfigLoader::load(Some(&cfg_path), None).expect("should load");
    assert_eq!(rc.week.start, Weekday::Sat);
    assert_eq!(rc.week.first_week_contains, 1);
    assert_eq!(rc.calendar().week(), rc.week);
}

#[test]
fn log_file_expands_vault_root() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.toml");
    let toml = r#"
version = 1
[profiles.default]
vault_root = "/tmp/vault"

[logging]
level = "debug"
file = "{{vault_root}}/.periodic-notes/pnotes.log"
"#;
    write_file(&cfg_path, toml);

    let rc = ConfigLoader::load(Some(&cfg_path), None).expect("should load");
    assert_eq!(rc.logging.level, "debug");
    assert_eq!(
        rc.logging.file,
        Some(PathBuf::from("/tmp/vault/.periodic-notes/pnotes.log"))
    );
}
