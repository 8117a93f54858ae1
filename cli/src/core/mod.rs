//! # ToDD Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the core infrastructure components shared by every
//! command of the ToDD client.
//!
//! ## Architecture
//!
//! - `config`: Configuration loading, merging, and validation
//! - `error`: Error types and the crate-wide `Result` alias
//! - `templating`: The compiled, versioned presentation templates
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{ToddError, Result}; // For error handling
//! use crate::core::templating::TemplateSet; // For the detail view template
//! ```
//!
pub mod config;
pub mod error;
pub mod templating;
