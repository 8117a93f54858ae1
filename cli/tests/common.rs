//! # ToDD CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Every command is
//! run with `TODD_CONFIG` pointing at a file inside a temporary directory, so
//! the developer's own configuration never leaks into a test.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A temporary directory holding a config file and JSON fixtures.
pub struct Sandbox {
    pub dir: TempDir,
}

impl Sandbox {
    /// Creates a sandbox with an empty (all defaults) configuration.
    pub fn new() -> Self {
        Self::with_config("")
    }

    /// Creates a sandbox whose configuration file contains `toml`.
    pub fn with_config(toml: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        fs::write(dir.path().join("config.toml"), toml).expect("Failed to write config");
        Self { dir }
    }

    /// Writes `content` to `name` inside the sandbox and returns its path.
    pub fn fixture(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).expect("Failed to write fixture");
        path
    }

    /// A `todd` command bound to this sandbox's configuration.
    pub fn todd_cmd(&self) -> Command {
        let mut cmd = todd_cmd();
        cmd.env("TODD_CONFIG", self.dir.path().join("config.toml"))
            .env_remove("TODD_HOST")
            .env_remove("TODD_PORT")
            .env_remove("RUST_LOG")
            .current_dir(self.dir.path());
        cmd
    }
}

/// # Get ToDD Command (`todd_cmd`)
///
/// Creates an `assert_cmd::Command` for the compiled `todd` binary.
///
/// ## Panics
/// Panics if the `todd` binary cannot be found via `Command::cargo_bin`.
pub fn todd_cmd() -> Command {
    Command::cargo_bin("todd").expect("Failed to find todd binary for testing")
}

/// Two agents as the server would return them from `GET /v1/agent`.
pub const AGENT_LIST_JSON: &str = r#"[
  {
    "Uuid": "7cb8a4d2f1e04c7aa2f1c0b8e3d6a915",
    "Expires": 30000000000,
    "DefaultAddr": "10.0.0.5",
    "LocalTime": "2016-04-12T10:00:00Z",
    "Facts": {"Hostname": ["todd-agent-1"], "Addresses": ["10.0.0.5"]},
    "Collectors": {"get_hostname": "9a0b"}
  },
  {
    "Uuid": "e9f2c3b4a5d6478899aabbccddeeff00",
    "Expires": 30000000000,
    "DefaultAddr": "10.0.0.6",
    "Facts": null,
    "Collectors": null
  }
]"#;
