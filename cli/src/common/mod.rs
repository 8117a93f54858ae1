//! # ToDD Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared building blocks used by the command handlers, kept apart from the
//! command-specific logic in `commands::` and the infrastructure in `core::`.
//!
//! - **`api`**: HTTP client for the ToDD server and JSON decoding of its responses.
//! - **`ui`**: Table and detail rendering, and the presenter that chooses between them.
//!
//! ```rust
//! use crate::common::{api, ui};
//!
//! let records = api::ApiClient::new(&cfg.server)?.agents(None).await?;
//! ui::table::render_table(&records, &options, &mut std::io::stdout())?;
//! ```
//!

/// Client for the ToDD server API.
pub mod api;
/// Terminal output: tables, detail views, presentation.
pub mod ui;
