//! E2E tests for error scenarios.
//!
//! Covers exit codes, error codes, JSON error rendering, and config
//! failures. None of these should panic.

use predicates::prelude::*;

mod common;

use common::fixtures::{Workspace, csv_without_valid_rows, stderr_json};

#[test]
fn invalid_command_is_rejected() {
    let ws = Workspace::new();
    ws.cmd()
        .arg("notacommand")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized").or(predicate::str::contains("error")));
}

#[test]
fn missing_csv_is_an_import_error() {
    let ws = Workspace::new();
    let missing = ws.dir.path().join("nope.csv");

    let output = ws
        .cmd()
        .args(["simulate", "--json"])
        .arg(&missing)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
    let err = stderr_json(&output);
    assert_eq!(err["errorCode"], "PSIM-I002");
    assert_eq!(err["category"], "Import error");
    assert!(output.stdout.is_empty());
}

#[test]
fn no_valid_rows_has_hint() {
    let ws = Workspace::new();
    let csv = ws.csv("bad.csv", &csv_without_valid_rows());

    ws.cmd()
        .arg("simulate")
        .arg(&csv)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Error [PSIM-I001]"))
        .stderr(predicate::str::contains("2 row(s) skipped"))
        .stderr(predicate::str::contains("Hint: Header row must be:"));
}

#[test]
fn unknown_model_fails_fast() {
    let ws = Workspace::new();
    let csv = ws.sample();

    ws.cmd()
        .args(["simulate", "--model", "tiered"])
        .arg(&csv)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("PSIM-C010"))
        .stderr(predicate::str::contains("Fix: pricesim models"));
}

#[test]
fn malformed_param_is_usage_error() {
    let ws = Workspace::new();
    let output = ws
        .cmd()
        .args(["quote", "--words", "100", "--model", "PW", "--param", "rate", "--json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let err = stderr_json(&output);
    assert_eq!(err["errorCode"], "PSIM-U001");
    assert_eq!(err["exitCode"], 2);
}

#[test]
fn negative_bonus_is_rejected() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["quote", "--words", "100", "--bonus=-5"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("PSIM-C003"));
}

#[test]
fn unknown_strategy_is_config_error() {
    let ws = Workspace::new();
    let csv = ws.sample();
    ws.cmd()
        .args(["simulate", "--strategy", "cheapest"])
        .arg(&csv)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Unknown strategy"));
}

#[test]
fn corrupted_config_reports_parse_error() {
    let ws = Workspace::with_config("[output\nformat = ");
    let output = ws.cmd().arg("models").output().unwrap();
    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("PSIM-C002"));
}

#[test]
fn unknown_model_in_config_fails_before_running() {
    let ws = Workspace::with_config("[pricing.simulation]\nmodel = \"tiered\"\n");
    ws.cmd()
        .arg("models")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("PSIM-C010"));
}

#[test]
fn explicit_missing_config_is_not_found() {
    let ws = Workspace::new();
    let missing = ws.dir.path().join("missing.toml");
    ws.cmd()
        .arg("--config")
        .arg(&missing)
        .arg("models")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("PSIM-C001"));
}

#[test]
fn invalid_format_env_is_rejected() {
    let ws = Workspace::new();
    ws.cmd()
        .env("PRICESIM_FORMAT", "yaml")
        .arg("models")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("PRICESIM_FORMAT"));
}

#[test]
fn markdown_errors_are_pretty_json() {
    let ws = Workspace::new();
    let missing = ws.dir.path().join("nope.csv");
    let output = ws
        .cmd()
        .args(["simulate", "--format", "md"])
        .arg(&missing)
        .output()
        .unwrap();
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.trim_start().starts_with('{'));
    assert!(stderr.lines().count() > 1);
    let _ = stderr_json(&output);
}
