//! Integration tests for `cradle config` command.
//!
//! All filesystem-touching tests set `CRADLE_CONFIG` to a temp path so they
//! never read or write `~/.cradle/config.yaml`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cradle() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("cradle"));
    cmd.env("NO_COLOR", "1").env_remove("CRADLE_API_URL");
    cmd
}

/// Returns a `TempDir` and the path string for a config file inside it.
fn temp_config_path() -> (TempDir, String) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir
        .path()
        .join("config.yaml")
        .to_string_lossy()
        .into_owned();
    (dir, path)
}

#[test]
fn test_config_help_shows_show_and_set_subcommands() {
    cradle()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("set"));
}

#[test]
fn test_config_show_without_file_uses_defaults() {
    let (_dir, path) = temp_config_path();
    cradle()
        .args(["config", "show"])
        .env("CRADLE_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("http://localhost:8080"))
        .stdout(predicate::str::contains("600s"))
        .stdout(predicate::str::contains("proceed"));
}

#[test]
fn test_config_set_persists_value() {
    let (_dir, path) = temp_config_path();
    cradle()
        .args(["config", "set", "provisioning.on_creation_failure", "abort"])
        .env("CRADLE_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Set provisioning.on_creation_failure = abort",
        ));

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("on_creation_failure: abort"), "got: {content}");
}

#[test]
fn test_config_set_zero_timeout_shows_unbounded() {
    let (_dir, path) = temp_config_path();
    cradle()
        .args(["config", "set", "provisioning.running_timeout_secs", "0"])
        .env("CRADLE_CONFIG", &path)
        .assert()
        .success();
    cradle()
        .args(["config", "show"])
        .env("CRADLE_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("unbounded"));
}

#[test]
fn test_config_set_unknown_key_fails() {
    let (_dir, path) = temp_config_path();
    cradle()
        .args(["config", "set", "api.colour", "red"])
        .env("CRADLE_CONFIG", &path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown setting: api.colour"));
    assert!(!std::path::Path::new(&path).exists());
}

#[test]
fn test_config_set_invalid_policy_fails() {
    let (_dir, path) = temp_config_path();
    cradle()
        .args(["config", "set", "provisioning.on_creation_failure", "maybe"])
        .env("CRADLE_CONFIG", &path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("proceed, abort"));
}

#[test]
fn test_config_token_is_masked() {
    let (_dir, path) = temp_config_path();
    cradle()
        .args(["config", "set", "api.token", "s3cret"])
        .env("CRADLE_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("s3cret").not());
    cradle()
        .args(["config", "show", "--json"])
        .env("CRADLE_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("s3cret").not())
        .stdout(predicate::str::contains("********"));
}

#[cfg(unix)]
#[test]
fn test_config_file_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let (_dir, path) = temp_config_path();
    cradle()
        .args(["config", "set", "api.url", "https://che.example.com"])
        .env("CRADLE_CONFIG", &path)
        .assert()
        .success();
    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn test_config_show_json_is_valid() {
    let (_dir, path) = temp_config_path();
    let output = cradle()
        .args(["config", "show", "--json"])
        .env("CRADLE_CONFIG", &path)
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["config"]["api"]["url"], "http://localhost:8080");
    assert_eq!(value["path"], path);
}
