//! # ToDD Client Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the `todd` CLI. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Loading the configuration and compiling the presentation templates once
//! - Routing execution to the appropriate command handler
//!
//! ## Architecture
//!
//! - Each top-level command (`agents`, `groups`) is a variant of `Commands`
//! - Handlers return a `Result`; none of them exits the process
//! - This is the only place that decides the exit status: a handled "nothing
//!   found" is success (0), any error is reported on stderr and exits with 1
//!
//! ## Examples
//!
//! ```bash
//! # List agents on a specific server
//! todd --host todd.example.net --port 8080 agents
//!
//! # Show one agent with debug logging
//! todd -vv agents 7cb8a4d2f1e04c7aa2f1c0b8e3d6a915
//! ```
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Command handlers (agents, groups)
mod common; // API client and terminal rendering
mod core; // Errors, configuration, templates
mod resource; // Decoded API records

use crate::core::{config, templating::TemplateSet};

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "todd",
    about = "ToDD: command-line client for the distributed testing platform",
    long_about = "Query a ToDD server for registered agents and their group assignments.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// ToDD server host (overrides the configuration file).
    #[arg(long, global = true, env = "TODD_HOST")]
    host: Option<String>,

    /// ToDD server API port (overrides the configuration file).
    #[arg(long, global = true, env = "TODD_PORT")]
    port: Option<u16>,

    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// Enum defining all available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    #[command(alias = "a")]
    Agents(commands::agents::AgentsArgs),
    #[command(alias = "g")]
    Groups(commands::groups::GroupsArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    if let Err(e) = run(cli).await {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut cfg = config::load_config()?;
    if let Some(host) = cli.host {
        cfg.server.host = host;
    }
    if let Some(port) = cli.port {
        cfg.server.port = port;
    }
    let templates = TemplateSet::from_config(&cfg.templates)?;
    tracing::debug!("Using templates version {}", templates.version());

    let outcome = match cli.command {
        Commands::Agents(args) => commands::agents::handle_agents(args, &cfg, &templates).await?,
        Commands::Groups(args) => commands::groups::handle_groups(args, &cfg, &templates).await?,
    };
    tracing::info!("Presentation finished: {:?}", outcome);
    Ok(())
}
