//! # ToDD CLI Main Integration Tests
//!
//! File: cli/tests/main_tests.rs
//!
//! Top-level behavior of the `todd` binary: standard flags, configuration
//! errors and the exit status contract.
//!

mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_help_lists_commands() {
    todd_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("agents").and(predicate::str::contains("groups")));
}

#[test]
fn test_version_flag() {
    todd_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_invalid_config_fails_with_message() {
    let sandbox = Sandbox::with_config("[output]\nid_width = 0\n");
    let input = sandbox.fixture("agents.json", "[]");
    sandbox
        .todd_cmd()
        .args(["agents", "--input"])
        .arg(&input)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("id_width"));
}

#[test]
fn test_malformed_template_fails_before_output() {
    let sandbox = Sandbox::with_config("[templates]\nagent_detail = \"{{ uuid\"\n");
    let input = sandbox.fixture("agents.json", "[]");
    sandbox
        .todd_cmd()
        .args(["agents", "--input"])
        .arg(&input)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("agent_detail"));
}

#[test]
fn test_unreachable_server_is_an_error() {
    let sandbox = Sandbox::new();
    sandbox
        .todd_cmd()
        .args(["--host", "127.0.0.1", "--port", "1", "agents"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Error:"));
}
