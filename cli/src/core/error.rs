//! # ToDD Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout the ToDD client. Every
//! fallible function returns `Result<T>` (an alias for `anyhow::Result<T>`);
//! the specific failure kinds below are wrapped with `anyhow!` so callers can
//! add context while tests and the entry point can still `downcast_ref` to the
//! concrete `ToddError`.
//!
//! ## Architecture
//!
//! The error kinds cover:
//! - Presentation failures (introspection, template evaluation, render preconditions)
//! - Configuration loading and validation
//! - Talking to the ToDD server and decoding its responses
//!
//! None of the renderers terminate the process. They return an error and the
//! single top-level caller (`main`) decides the exit status and the message
//! shown to the user.
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error kind
//! if resources.is_empty() {
//!     return Err(anyhow!(ToddError::RenderPrecondition(
//!         "table requires at least one resource".into()
//!     )));
//! }
//!
//! // Inspect the kind behind an anyhow::Error
//! let is_template = err
//!     .downcast_ref::<ToddError>()
//!     .is_some_and(|e| matches!(e, ToddError::Template { .. }));
//! ```
//!
use thiserror::Error;

/// Custom error type for the ToDD client.
#[derive(Error, Debug)]
pub enum ToddError {
    /// A resource could not be described as an ordered list of fields.
    #[error("Cannot introspect {variant} resource: {reason}")]
    Introspection {
        variant: &'static str,
        reason: String,
    },

    /// A template failed to parse or referenced a slot that does not resolve.
    #[error("Template rendering error: {source}")]
    Template {
        #[from]
        source: tera::Error,
    },

    /// A renderer was called with input the caller must have ruled out.
    #[error("Render precondition violated: {0}")]
    RenderPrecondition(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("ToDD API error: {0}")]
    Api(String),

    #[error("Failed to decode API response: {0}")]
    Decode(String),
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_error_display() {
        let introspection = ToddError::Introspection {
            variant: "null",
            reason: "no fields".to_string(),
        };
        assert_eq!(
            introspection.to_string(),
            "Cannot introspect null resource: no fields"
        );

        let precondition = ToddError::RenderPrecondition("empty table".into());
        assert_eq!(
            precondition.to_string(),
            "Render precondition violated: empty table"
        );

        let api = ToddError::Api("server returned 500".into());
        assert_eq!(api.to_string(), "ToDD API error: server returned 500");
    }

    #[test]
    fn test_downcast_through_context() {
        let err = anyhow!(ToddError::Config("bad port".into())).context("Loading configuration");
        assert_eq!(err.to_string(), "Loading configuration");
        assert!(matches!(
            err.downcast_ref::<ToddError>(),
            Some(ToddError::Config(msg)) if msg == "bad port"
        ));
    }
}
