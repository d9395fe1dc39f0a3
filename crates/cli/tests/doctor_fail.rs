use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn doctor_fails_when_config_missing() {
    let tmp = tempdir().unwrap();
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("pnotes"));
    cmd.env("XDG_CONFIG_HOME", tmp.path());
    cmd.arg("doctor");
    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("FAIL pnotes doctor"))
        .stdout(predicate::str::contains("looked for:"));
}

#[test]
fn doctor_fails_on_unknown_timezone() {
    let tmp = tempdir().unwrap();
    let cfg = tmp.path().join("config.toml");
    fs::write(
        &cfg,
        r#"
version = 1
[profiles.default]
vault_root = "/tmp/v"
timezone = "Mars/Olympus_Mons"
"#,
    )
    .unwrap();

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("pnotes"));
    cmd.arg("--config").arg(&cfg).arg("doctor");
    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("FAIL pnotes doctor"))
        .stdout(predicate::str::contains("Mars/Olympus_Mons"))
        .stdout(predicate::str::contains("looked for:").not());
}
