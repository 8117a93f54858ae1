//! # ToDD Agents Command
//!
//! File: cli/src/commands/agents.rs
//!
//! ## Overview
//!
//! This module implements `todd agents`, which shows the agents currently
//! registered with the ToDD server.
//!
//! - Without arguments it lists every agent as a table.
//! - With a UUID it asks the server for that agent and prints the detail view.
//! - With `--input <FILE>` it reads a saved `/v1/agent` response body instead
//!   of contacting the server. The file is shown exactly as if the server had
//!   returned it for the same invocation.
//!
//! ## Usage
//!
//! ```bash
//! # Table of all agents
//! todd agents
//!
//! # One agent in detail
//! todd agents 7cb8a4d2f1e04c7aa2f1c0b8e3d6a915
//!
//! # Offline, from a saved response
//! todd agents --input agents.json
//! ```
//!
//! Example table output:
//!
//! ```text
//! UUID            EXPIRES ADDR            FACT SUMMARY    COLLECTOR SUMMARY
//! 7cb8a4d2f1e0    30s     10.0.0.5        Hostname,os     ping
//! ```
//!
//! When nothing matches, `No agents found` is printed and the command
//! succeeds.
//!
use crate::commands::load_input;
use crate::common::api::{self, ApiClient};
use crate::common::ui::present::{Intent, Presentation, ResourcePresenter};
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::templating::TemplateSet;
use crate::resource::DisplayOptions;
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};

/// Message printed when no agent matches.
pub const NO_AGENTS_FOUND: &str = "No agents found";

/// # Agents Arguments (`AgentsArgs`)
///
/// Command-line arguments accepted by `todd agents`.
#[derive(Parser, Debug)]
#[command(
    about = "List registered agents, or show one agent in detail",
    long_about = "Without a UUID, lists every agent registered with the ToDD server.\n\
                  With a UUID, shows that agent's expiry, collectors and facts."
)]
pub struct AgentsArgs {
    /// UUID of the agent to show in detail.
    uuid: Option<String>,

    /// Read the agent list from a saved JSON response instead of the server.
    #[arg(long, short, value_name = "FILE")]
    input: Option<PathBuf>,
}

/// # Handle Agents Command (`handle_agents`)
///
/// Fetches (or loads) the agent records and hands them to the presenter.
///
/// ## Returns
///
/// * `Ok(Presentation)`: What was shown, including the not-found case.
/// * `Err`: Fetching, decoding or rendering failed; nothing was printed.
pub async fn handle_agents(
    args: AgentsArgs,
    config: &Config,
    templates: &TemplateSet,
) -> Result<Presentation> {
    info!(
        "Handling agents command (uuid: {:?}, input: {:?})",
        args.uuid, args.input
    );

    let records = match &args.input {
        Some(path) => api::decode_agents(&load_input(path)?)
            .with_context(|| format!("Failed to load agents from '{}'", path.display()))?,
        None => {
            let client = ApiClient::new(&config.server)?;
            client
                .agents(args.uuid.as_deref())
                .await
                .context("Failed to retrieve agents from the ToDD server")?
        }
    };
    debug!("Decoded {} agent records", records.len());

    let intent = Intent::from_identifier(args.uuid);
    let options = DisplayOptions {
        id_width: config.output.id_width,
    };
    let presenter = ResourcePresenter::new(templates, options, NO_AGENTS_FOUND);
    presenter.present(&intent, records, &mut std::io::stdout().lock())
}
