//! End-to-end tests for the license-inventory CLI
//!
//! These tests verify:
//! - Help and version output
//! - Exit codes for configuration errors and empty runs
//! - JSON output schema on an empty source tree
//!
//! No test reaches the network: every run either fails validation or finds
//! no dependency.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_license-inventory"))
}

/// Create an empty source tree and a separate output location
fn create_test_dirs() -> (TempDir, TempDir) {
    (
        tempfile::tempdir().expect("Failed to create temp directory"),
        tempfile::tempdir().expect("Failed to create temp directory"),
    )
}

#[test]
fn test_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--max-errors"))
        .stdout(predicate::str::contains("--mode"));
}

#[test]
fn test_version() {
    cli()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_source_dir_exits_with_error() {
    let (_, output) = create_test_dirs();
    cli()
        .arg(output.path().join("does-not-exist"))
        .arg("-o")
        .arg(output.path().join("licenses"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_empty_tree_succeeds() {
    let (source, output) = create_test_dirs();
    cli()
        .arg(source.path())
        .arg("-o")
        .arg(output.path().join("licenses"))
        .arg("--quiet")
        .assert()
        .code(0);

    cli()
        .arg(source.path())
        .arg("-o")
        .arg(output.path().join("licenses"))
        .assert()
        .code(0)
        .stdout(predicate::str::contains("No dependencies found."));

    assert!(!output.path().join("licenses").join("licenses_npm.txt").exists());
}

#[test]
fn test_json_output_on_empty_tree() {
    let (source, output) = create_test_dirs();
    let assert = cli()
        .arg(source.path())
        .arg("-o")
        .arg(output.path().join("licenses"))
        .arg("--json")
        .assert()
        .code(0);

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON output");
    assert_eq!(json["summary"]["dependencies"], 0);
    assert!(json["platforms"].as_array().unwrap().is_empty());
}

#[test]
fn test_invalid_max_errors_rejected() {
    let (source, output) = create_test_dirs();
    cli()
        .arg(source.path())
        .arg("-o")
        .arg(output.path().join("licenses"))
        .args(["--max-errors", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_unsupported_filename_rejected() {
    let (source, output) = create_test_dirs();
    cli()
        .arg(source.path())
        .arg("-o")
        .arg(output.path().join("licenses"))
        .args(["--file", "setup.py"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("setup.py"));
}

#[test]
fn test_config_file_values_are_validated() {
    let (source, output) = create_test_dirs();
    let config = output.path().join("inventory.toml");
    fs::write(&config, "max_errors = 0\n").unwrap();

    cli()
        .arg(source.path())
        .arg("-o")
        .arg(output.path().join("licenses"))
        .arg("--config")
        .arg(&config)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}
