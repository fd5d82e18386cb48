//! Shared test helpers for integration tests
//!
//! This module provides common utilities used across all test files.

#![allow(dead_code)]

use assert_cmd::cargo;
use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to get a fabyield command
pub fn fabyield() -> Command {
    Command::new(cargo::cargo_bin!("fabyield"))
}

/// Helper to get a fabyield command isolated in `tmp`
///
/// The user config directory points into the temp dir so a real
/// `~/.config/fabyield/config.yaml` never leaks into tests.
pub fn fabyield_in(tmp: &TempDir) -> Command {
    let mut cmd = fabyield();
    cmd.current_dir(tmp.path())
        .env("HOME", tmp.path())
        .env("XDG_CONFIG_HOME", tmp.path().join(".config"))
        .env_remove("FABYIELD_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

/// Helper to create an empty working directory
pub fn setup_workspace() -> TempDir {
    TempDir::new().unwrap()
}

/// Helper to write a fabyield.yaml into the working directory
pub fn write_config(tmp: &TempDir, yaml: &str) -> PathBuf {
    let path = tmp.path().join("fabyield.yaml");
    fs::write(&path, yaml).unwrap();
    path
}

/// Run a command with `--format json` and parse its stdout
pub fn run_json(tmp: &TempDir, args: &[&str]) -> serde_json::Value {
    let output = fabyield_in(tmp)
        .args(args)
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}
