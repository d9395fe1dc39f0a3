use periodic_notes_core::config::loader::{ConfigLoader, default_config_path};
use periodic_notes_core::{Granularity, SettingsProvider};
use std::path::Path;

pub fn run(config: Option<&Path>, profile: Option<&str>) {
    let rc = match ConfigLoader::load(config, profile) {
        Ok(rc) => rc,
        Err(e) => {
            println!("FAIL pnotes doctor");
            println!("{e}");
            if config.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    };
    crate::logging::init(&rc);

    println!("OK   pnotes doctor");
    println!(
        "path: {}",
        config.map_or_else(
            || default_config_path().display().to_string(),
            |p| p.display().to_string()
        )
    );
    println!("profile: {}", rc.active_profile);
    println!("vault_root: {}", rc.vault_root.display());
    println!("settings: {}", rc.settings_source);
    println!("timezone: {}", rc.timezone);
    println!(
        "week_start: {} (week one contains Jan {})",
        rc.week.start, rc.week.first_week_contains
    );

    let settings = rc.settings_provider();
    for granularity in Granularity::ALL {
        let folder = settings.folder(granularity);
        let folder_state =
            if rc.vault_root.join(folder.trim_matches('/')).is_dir() { "" } else { " (missing)" };
        println!(
            "{granularity}: format={} folder={}{folder_state}",
            settings.format(granularity),
            if folder.is_empty() { "/" } else { folder.as_str() },
        );
    }
}
