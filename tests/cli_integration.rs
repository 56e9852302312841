//! CLI integration tests for menagerie.
//!
//! These cover the catalog-backed subcommands that work without a mirror;
//! anything that needs the network stays in unit tests against the stub
//! source.

use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the menagerie binary command.
fn menagerie() -> Command {
    Command::cargo_bin("menagerie").unwrap()
}

/// Create a temporary installation root.
fn temp_root() -> TempDir {
    TempDir::new().unwrap()
}

// ============================================================================
// menagerie list
// ============================================================================

#[test]
fn test_list_on_empty_root_succeeds() {
    let root = temp_root();

    menagerie()
        .args(["--root"])
        .arg(root.path())
        .arg("list")
        .assert()
        .success()
        .stderr(predicate::str::contains("no installations"));
}

#[test]
fn test_list_creates_no_catalog_file() {
    let root = temp_root();

    menagerie()
        .args(["--root"])
        .arg(root.path())
        .arg("list")
        .assert()
        .success();

    // Read-only access must not materialize a catalog.
    assert!(!root.path().join("catalog.toml").exists());
}

// ============================================================================
// missing-name errors
// ============================================================================

#[test]
fn test_status_unknown_name_fails() {
    let root = temp_root();

    menagerie()
        .args(["--root"])
        .arg(root.path())
        .args(["status", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no installation named `ghost`"));
}

#[test]
fn test_uninstall_unknown_name_fails() {
    let root = temp_root();

    menagerie()
        .args(["--root"])
        .arg(root.path())
        .args(["uninstall", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no installation named `ghost`"));
}

#[test]
fn test_start_unknown_name_fails() {
    let root = temp_root();

    menagerie()
        .args(["--root"])
        .arg(root.path())
        .args(["start", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no installation named `ghost`"));
}

// ============================================================================
// malformed state
// ============================================================================

#[test]
fn test_malformed_catalog_is_reported() {
    let root = temp_root();
    std::fs::write(root.path().join("catalog.toml"), "not toml [").unwrap();

    menagerie()
        .args(["--root"])
        .arg(root.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse"));
}

#[test]
fn test_install_rejects_malformed_config_pairs() {
    let root = temp_root();

    menagerie()
        .args(["--root"])
        .arg(root.path())
        .args(["install", "alpha", "3.9.2", "--config", "tickTime"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected KEY=VALUE"));
}

// ============================================================================
// misc
// ============================================================================

#[test]
fn test_help_lists_subcommands() {
    menagerie()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("install"))
        .stdout(predicate::str::contains("uninstall"))
        .stdout(predicate::str::contains("classpath"));
}

#[test]
fn test_completions_emit_something() {
    menagerie()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}
