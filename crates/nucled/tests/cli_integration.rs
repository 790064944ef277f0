//! Integration tests for the `nucled` binary.
//!
//! These tests exercise the CLI via `assert_cmd`. Commands that need the
//! firmware are pointed at a config without an ACPI method, so they fail
//! with a deterministic configuration error instead of touching hardware.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

fn cli() -> assert_cmd::Command {
    cargo_bin_cmd!("nucled")
}

/// Path to a config file that does not exist, forcing defaults.
fn empty_config(dir: &tempfile::TempDir) -> String {
    dir.path().join("nonexistent.toml").display().to_string()
}

#[test]
fn cli_help_succeeds() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("nucled"));
}

#[test]
fn cli_version_prints_version() {
    cli()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// ── config ──

#[test]
fn cli_config_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    cli()
        .args(["--config", &empty_config(&dir), "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("acpi_method:"));
}

#[test]
fn cli_config_json_produces_valid_json() {
    let dir = tempfile::tempdir().unwrap();
    let output = cli()
        .args(["--json", "--config", &empty_config(&dir), "config"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value =
        serde_json::from_slice(&output).expect("config --json should produce valid JSON");
    assert_eq!(json["settings"]["acpi_call_path"], "/proc/acpi/call");
    assert_eq!(json["config_file_exists"], false);
}

#[test]
fn cli_config_reads_custom_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "acpi_method = \"\\\\_SB.WMTF\"\n").unwrap();

    cli()
        .args(["--config", path.to_str().unwrap(), "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("WMTF"))
        .stdout(predicate::str::contains("(loaded)"));
}

// ── --verbose flag ──

#[test]
fn cli_verbose_flag_accepted() {
    let dir = tempfile::tempdir().unwrap();
    cli()
        .args(["-v", "--config", &empty_config(&dir), "config"])
        .assert()
        .success();
}

#[test]
fn cli_verbose_long_flag_accepted() {
    let dir = tempfile::tempdir().unwrap();
    cli()
        .args(["--verbose", "--config", &empty_config(&dir), "config"])
        .assert()
        .success();
}

// ── firmware-requiring commands without a configured method ──

#[test]
fn cli_status_fails_without_acpi_method() {
    let dir = tempfile::tempdir().unwrap();
    cli()
        .args(["--config", &empty_config(&dir), "status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("acpi_method"));
}

#[test]
fn cli_set_indicator_fails_without_acpi_method() {
    let dir = tempfile::tempdir().unwrap();
    cli()
        .args(["--config", &empty_config(&dir), "set-indicator", "0", "6"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("acpi_method"));
}

// ── apply ──

#[test]
fn cli_apply_rejects_unknown_action() {
    let dir = tempfile::tempdir().unwrap();
    cli()
        .args(["--config", &empty_config(&dir), "apply", "make_coffee,0,1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid action"));
}

#[test]
fn cli_apply_rejects_wrong_arity() {
    let dir = tempfile::tempdir().unwrap();
    cli()
        .args(["--config", &empty_config(&dir), "apply", "set_indicator,0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Too few arguments"));
}

// ── argument validation ──

#[test]
fn cli_set_indicator_rejects_non_numeric() {
    cli()
        .args(["set-indicator", "zero", "6"])
        .assert()
        .failure();
}

#[test]
fn cli_set_value_help_names_all_args() {
    cli()
        .args(["set-value", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("LED"))
        .stdout(predicate::str::contains("item"))
        .stdout(predicate::str::contains("value"));
}
