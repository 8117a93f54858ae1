//! # ToDD Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the top-level commands of the `todd` CLI. Each
//! command defines its own clap arguments struct and an async handler that
//! receives the loaded configuration and the compiled templates from `main`.
//!
//! ## Commands
//!
//! - `agents`: list registered agents, or show one in detail
//! - `groups`: list agent group assignments
//!
use crate::core::error::Result;
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// `todd agents [UUID]`.
pub mod agents;
/// `todd groups`.
pub mod groups;

/// Reads a saved response body given with `--input` (`~` is expanded).
pub(crate) fn load_input(path: &Path) -> Result<Vec<u8>> {
    let expanded = PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned());
    debug!("Reading saved response from {}", expanded.display());
    fs::read(&expanded)
        .with_context(|| format!("Failed to read input file: {}", expanded.display()))
}
