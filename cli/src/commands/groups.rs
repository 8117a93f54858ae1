//! # ToDD Groups Command
//!
//! File: cli/src/commands/groups.rs
//!
//! Implements `todd groups`: a table of which group each agent was placed in.
//!
//! ```bash
//! todd groups
//! todd groups --input groups.json
//! ```
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
use tracing::info;

/// Message printed when no agent belongs to a group.
pub const NO_GROUPS_FOUND: &str = "No groups found";

/// Command-line arguments accepted by `todd groups`.
#[derive(Parser, Debug)]
#[command(about = "List the group each agent belongs to")]
pub struct GroupsArgs {
    /// Read the group map from a saved JSON response instead of the server.
    #[arg(long, short, value_name = "FILE")]
    input: Option<PathBuf>,
}

pub async fn handle_groups(
    args: GroupsArgs,
    config: &Config,
    templates: &TemplateSet,
) -> Result<Presentation> {
    info!("Handling groups command (input: {:?})", args.input);

    let records = match &args.input {
        Some(path) => api::decode_groups(&load_input(path)?)
            .with_context(|| format!("Failed to load groups from '{}'", path.display()))?,
        None => ApiClient::new(&config.server)?
            .groups()
            .await
            .context("Failed to retrieve groups from the ToDD server")?,
    };

    let options = DisplayOptions {
        id_width: config.output.id_width,
    };
    ResourcePresenter::new(templates, options, NO_GROUPS_FOUND).present(
        &Intent::List,
        records,
        &mut std::io::stdout().lock(),
    )
}
