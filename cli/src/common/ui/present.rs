//! # Resource Presenter
//!
//! File: cli/src/common/ui/present.rs
//!
//! ## Overview
//!
//! Chooses how a decoded result set is shown. The choice depends only on the
//! caller's intent:
//!
//! - [`Intent::List`] (no identifier given): everything as one table.
//! - [`Intent::Detail`] (an identifier given): each returned record through
//!   the detail template. The server is expected to return at most one match,
//!   but every returned record is rendered.
//!
//! ## Not found
//!
//! Both intents first check for "nothing to show", which is either of:
//!
//! 1. the result set is empty, or
//! 2. the *first* record has an empty identifier.
//!
//! The second case guards against a server that answers a failed lookup with
//! a single zero-valued record instead of an empty list. The two signals are
//! treated as the same outcome on purpose: the not-found message is written,
//! [`Presentation::NotFound`] is returned, and neither renderer runs. The
//! caller treats this as success.
//!
//! ## Atomicity
//!
//! Either a complete table / complete set of detail blocks is written, or
//! nothing is and an error is returned.
//!
use crate::common::ui::{detail, table};
use crate::core::error::{Result, ToddError};
use crate::core::templating::TemplateSet;
use crate::resource::{DisplayOptions, Resource};
use anyhow::{anyhow, Context};
use std::io::Write;
use tracing::{debug, info};

/// What the caller asked to see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Every record, as a table.
    List,
    /// The record(s) matching `uuid`, in detail.
    Detail { uuid: String },
}

impl Intent {
    /// `Detail` when an identifier was supplied, `List` otherwise.
    pub fn from_identifier(uuid: Option<String>) -> Self {
        match uuid {
            Some(uuid) if !uuid.is_empty() => Intent::Detail { uuid },
            _ => Intent::List,
        }
    }
}

/// How a result set ended up being shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    /// The not-found message was written.
    NotFound,
    /// A table with this many value rows was written.
    Table { rows: usize },
    /// This many detail blocks were written.
    Detail { records: usize },
}

/// Dispatches result sets to the table or detail renderer.
pub struct ResourcePresenter<'a> {
    templates: &'a TemplateSet,
    options: DisplayOptions,
    not_found_message: &'a str,
}

impl<'a> ResourcePresenter<'a> {
    pub fn new(
        templates: &'a TemplateSet,
        options: DisplayOptions,
        not_found_message: &'a str,
    ) -> Self {
        Self {
            templates,
            options,
            not_found_message,
        }
    }

    /// Presents `resources` according to `intent`, writing to `out`.
    pub fn present<W: Write>(
        &self,
        intent: &Intent,
        resources: Vec<Resource>,
        out: &mut W,
    ) -> Result<Presentation> {
        if resources.first().map_or(true, Resource::is_absent) {
            info!(
                "Empty result ({} records, first absent) for {:?}",
                resources.len(),
                intent
            );
            writeln!(out, "{}", self.not_found_message)
                .and_then(|_| out.flush())
                .context("Failed to write not-found message")?;
            return Ok(Presentation::NotFound);
        }

        let total = resources.len();
        let resources: Vec<Resource> = resources.into_iter().filter(|r| !r.is_absent()).collect();
        if resources.len() != total {
            debug!(
                "Dropped {} absent records after the first",
                total - resources.len()
            );
        }

        match intent {
            Intent::List => {
                let rows = table::render_table(&resources, &self.options, out)?;
                Ok(Presentation::Table { rows })
            }
            Intent::Detail { uuid } => {
                let records = self.render_details(uuid, &resources, out)?;
                Ok(Presentation::Detail { records })
            }
        }
    }

    fn render_details<W: Write>(
        &self,
        uuid: &str,
        resources: &[Resource],
        out: &mut W,
    ) -> Result<usize> {
        let mut text = String::new();
        for resource in resources {
            let Resource::Agent(agent) = resource else {
                return Err(anyhow!(ToddError::Introspection {
                    variant: resource.variant_name(),
                    reason: "no detail view exists for this resource".to_string(),
                }));
            };
            if agent.uuid != uuid {
                debug!("Lookup for '{}' returned agent '{}'", uuid, agent.uuid);
            }
            text.push_str(&detail::render_agent_detail(self.templates, agent)?);
        }
        out.write_all(text.as_bytes())
            .context("Failed to write detail output")?;
        out.flush().context("Failed to flush detail output")?;
        Ok(resources.len())
    }
}
