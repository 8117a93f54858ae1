//! # ToDD Template System
//!
//! File: cli/src/core/templating.rs
//!
//! ## Overview
//!
//! This module owns the presentation templates. The templates come from the
//! `[templates]` section of the configuration and are compiled exactly once at
//! startup into an immutable [`TemplateSet`], which is then handed to the
//! renderers by reference. Changing what a detail view looks like is therefore
//! a configuration change, not a code change.
//!
//! ## Architecture
//!
//! - Templates are Tera templates registered under fixed names
//!   (see [`AGENT_DETAIL`]).
//! - Parsing happens in [`TemplateSet::from_config`]; a malformed template
//!   fails the invocation before any resource is fetched.
//! - Rendering uses Tera's strict variable lookup, so a template that names a
//!   slot the context does not provide fails with a template error instead of
//!   printing a blank.
//! - Autoescaping is disabled: output goes to a terminal, not a browser.
//!
//! ## Examples
//!
//! ```rust
//! let templates = TemplateSet::from_config(&cfg.templates)?;
//! let mut context = tera::Context::new();
//! context.insert("uuid", "abc123");
//! let text = templates.render(templating::AGENT_DETAIL, &context)?;
//! ```
//!
use crate::core::config::TemplatesConfig;
use crate::core::error::{Result, ToddError};
use anyhow::anyhow;
use tera::Tera;
use tracing::debug;

/// Name under which the agent detail template is registered.
pub const AGENT_DETAIL: &str = "agent_detail";

/// The compiled, read-only set of presentation templates.
#[derive(Debug)]
pub struct TemplateSet {
    tera: Tera,
    version: u32,
}

impl TemplateSet {
    /// Compiles every configured template.
    ///
    /// ## Returns
    ///
    /// * `Err` wrapping [`ToddError::Template`] if any template fails to parse.
    pub fn from_config(config: &TemplatesConfig) -> Result<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.add_raw_template(AGENT_DETAIL, &config.agent_detail)
            .map_err(|e| {
                anyhow!(ToddError::Template { source: e }).context(format!(
                    "Failed to compile '{}' template (templates.version {})",
                    AGENT_DETAIL, config.version
                ))
            })?;
        debug!(
            "Compiled presentation templates (version {}): {:?}",
            config.version,
            tera.get_template_names().collect::<Vec<_>>()
        );
        Ok(Self {
            tera,
            version: config.version,
        })
    }

    /// The `templates.version` these templates were loaded with.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Renders the named template against `context`.
    pub fn render(&self, name: &str, context: &tera::Context) -> Result<String> {
        self.tera
            .render(name, context)
            .map_err(|e| anyhow!(ToddError::Template { source: e }))
    }
}
