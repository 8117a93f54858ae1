//! # ToDD Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads, merges and validates the client configuration: where the
//! ToDD server lives, how identifiers are shortened in tables, and the
//! versioned template used for the agent detail view.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. The file named by the `TODD_CONFIG` environment variable. When set, it is
//!    the only file read.
//! 2. Project-specific `.todd.toml` in the current directory or an ancestor
//!    (the search stops at a directory containing `.git`).
//! 3. User-specific `config.toml` in the platform config directory
//!    (e.g. `~/.config/todd/config.toml`).
//! 4. Default values defined in the code.
//!
//! The project and user files are merged key by key before defaults are
//! applied: any key the project file sets wins, even when it restates the
//! default. The `[templates]` section is replaced as a whole.
//!
//! Command-line flags (`--host`, `--port`) are applied on top of the loaded
//! configuration by `main`.
//!
//! ## Examples
//!
//! ```toml
//! [server]
//! host = "todd.example.net"
//! port = 8080
//!
//! [output]
//! id_width = 8
//!
//! [templates]
//! version = 1
//! agent_detail = """
//! Agent {{ uuid }} ({{ default_addr }})
//! {{ pp_facts }}
//! """
//! ```
//!
//! The configuration is loaded once per invocation and never mutated after
//! validation.
//!
use crate::core::error::{Result, ToddError};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use toml::{Table, Value};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub templates: TemplatesConfig,
}

/// Location of the ToDD server API.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Hostname or IP address of the ToDD server.
    #[serde(default = "default_host")]
    pub host: String,
    /// TCP port of the ToDD server API.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Options that shape table output.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Number of identifier characters shown in table mode.
    #[serde(default = "default_id_width")]
    pub id_width: usize,
}

/// Versioned presentation templates.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TemplatesConfig {
    /// Template format version. Only [`TEMPLATE_VERSION`] is understood.
    #[serde(default = "default_template_version")]
    pub version: u32,
    /// Tera template for `todd agents <UUID>`.
    #[serde(default = "default_agent_detail_template")]
    pub agent_detail: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            id_width: default_id_width(),
        }
    }
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            version: default_template_version(),
            agent_detail: default_agent_detail_template(),
        }
    }
}

/// The template format version this build understands.
pub const TEMPLATE_VERSION: u32 = 1;

/// Built-in agent detail template.
pub const DEFAULT_AGENT_DETAIL_TEMPLATE: &str = "Agent UUID:  {{ uuid }}
Expires:  {{ expires }}
Collector Summary: {{ collector_summary }}
Facts:
{{ pp_facts }}
";

fn default_host() -> String {
    "localhost".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_id_width() -> usize {
    12
}
fn default_template_version() -> u32 {
    TEMPLATE_VERSION
}
fn default_agent_detail_template() -> String {
    DEFAULT_AGENT_DETAIL_TEMPLATE.to_string()
}

const PROJECT_CONFIG_FILENAME: &str = ".todd.toml";
const CONFIG_ENV_VAR: &str = "TODD_CONFIG";

/// Loads the merged and validated configuration.
pub fn load_config() -> Result<Config> {
    let config = match explicit_config_path() {
        Some(path) => {
            info!("Loading configuration from {}: {}", CONFIG_ENV_VAR, path.display());
            load_config_from_path(&path)?
        }
        None => {
            let user_table = load_user_config()?;
            let project_table = load_project_config()?;
            let merged = merge_configs(user_table.unwrap_or_default(), project_table);
            config_from_table(merged).context("Failed to apply merged configuration")?
        }
    };
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn explicit_config_path() -> Option<PathBuf> {
    let raw = std::env::var(CONFIG_ENV_VAR).ok()?;
    if raw.trim().is_empty() {
        return None;
    }
    Some(PathBuf::from(shellexpand::tilde(&raw).into_owned()))
}

fn load_user_config() -> Result<Option<Table>> {
    if let Some(proj_dirs) = ProjectDirs::from("io", "ToDD", "todd") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            read_config_table(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Table>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(path) = find_project_config_path(&current_dir) {
        info!("Loading project configuration from: {}", path.display());
        read_config_table(&path).map(Some)
    } else {
        debug!("No project configuration file ({}) found.", PROJECT_CONFIG_FILENAME);
        Ok(None)
    }
}

fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let table = read_config_table(path)?;
    config_from_table(table)
        .with_context(|| format!("Invalid configuration in file: {}", path.display()))
}

fn read_config_table(path: &Path) -> Result<Table> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn config_from_table(table: Table) -> Result<Config> {
    Ok(Value::Table(table).try_into()?)
}

/// Overlays every key the project file sets onto the user file.
///
/// Merging happens before defaults are filled in, so a project value equal to
/// the built-in default still overrides the user's value.
fn merge_configs(mut user: Table, project: Option<Table>) -> Table {
    let Some(project) = project else {
        return user;
    };
    for (section, value) in project {
        match (user.get_mut(&section), value) {
            // Templates travel as a unit; a version bump without its template is meaningless.
            (Some(Value::Table(base)), Value::Table(overlay)) if section != "templates" => {
                base.extend(overlay);
            }
            (_, value) => {
                user.insert(section, value);
            }
        }
    }
    user
}

fn validate_config(config: &Config) -> Result<()> {
    info!("Validating final configuration...");
    if config.server.host.trim().is_empty() {
        return Err(anyhow!(ToddError::Config(
            "server.host cannot be empty.".to_string()
        )));
    }
    if config.server.port == 0 {
        return Err(anyhow!(ToddError::Config(
            "server.port must be between 1 and 65535.".to_string()
        )));
    }
    if config.server.timeout_secs == 0 {
        return Err(anyhow!(ToddError::Config(
            "server.timeout_secs must be at least 1.".to_string()
        )));
    }
    if config.output.id_width == 0 {
        return Err(anyhow!(ToddError::Config(
            "output.id_width must be at least 1.".to_string()
        )));
    }
    if config.templates.version != TEMPLATE_VERSION {
        return Err(anyhow!(ToddError::Config(format!(
            "Unsupported templates.version {} (expected {}).",
            config.templates.version, TEMPLATE_VERSION
        ))));
    }
    info!("Configuration validation successful.");
    Ok(())
}
