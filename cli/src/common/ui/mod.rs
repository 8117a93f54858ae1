//! # ToDD UI Module (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//!
//! ## Overview
//!
//! Everything that turns decoded resources into text for the terminal.
//!
//! - **`table`**: tab-aligned tables for list output (`todd agents`, `todd groups`).
//! - **`detail`**: the template-driven single-agent view (`todd agents <UUID>`).
//! - **`present`**: picks one of the two based on the caller's intent and
//!   handles the "nothing found" case.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::ui::present::{Intent, ResourcePresenter};
//!
//! let presenter = ResourcePresenter::new(&templates, options, "No agents found");
//! let intent = Intent::from_identifier(args.uuid);
//! presenter.present(&intent, records, &mut std::io::stdout().lock())?;
//! ```
//!
//! Renderers write to any `std::io::Write`, which keeps them testable against
//! an in-memory buffer.

pub mod detail;
pub mod present;
pub mod table;
