//! # Resource Introspection
//!
//! File: cli/src/resource/introspect.rs
//!
//! ## Overview
//!
//! Derives the header names and the cell values the table renderer needs from
//! any [`Resource`]. Dispatch is a `match` on the variant (via
//! [`Resource::describable`]); nothing is discovered by walking the value at
//! run time, so the column order of a variant never changes.
//!
//! - Names are upper-cased for display (`fact summary` → `FACT SUMMARY`).
//! - Composite fields arrive already summarized as one string each.
//! - A variant without fields (`Null`) or a value list that does not line up
//!   with the name list is an introspection error.
//!
use super::{DisplayOptions, Resource};
use crate::core::error::{Result, ToddError};
use anyhow::anyhow;

/// A named, stringified field of a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub value: String,
}

/// Upper-cased field names of `resource`, in declared order.
pub fn field_names(resource: &Resource) -> Result<Vec<String>> {
    let names = declared_names(resource)?;
    Ok(names.iter().map(|name| name.to_uppercase()).collect())
}

/// Stringified field values of `resource`, in declared order.
pub fn field_values(resource: &Resource, options: &DisplayOptions) -> Result<Vec<String>> {
    let names = declared_names(resource)?;
    let values = resource
        .describable()
        .map(|d| d.field_values(options))
        .unwrap_or_default();
    if values.len() != names.len() {
        return Err(anyhow!(ToddError::Introspection {
            variant: resource.variant_name(),
            reason: format!(
                "{} field values for {} field names",
                values.len(),
                names.len()
            ),
        }));
    }
    Ok(values)
}

/// Name/value pairs of `resource`, in declared order.
pub fn describe(resource: &Resource, options: &DisplayOptions) -> Result<Vec<FieldDescriptor>> {
    let names = field_names(resource)?;
    let values = field_values(resource, options)?;
    Ok(names
        .into_iter()
        .zip(values)
        .map(|(name, value)| FieldDescriptor { name, value })
        .collect())
}

fn declared_names(resource: &Resource) -> Result<&'static [&'static str]> {
    let names = resource
        .describable()
        .map(|d| d.field_names())
        .unwrap_or_default();
    if names.is_empty() {
        return Err(anyhow!(ToddError::Introspection {
            variant: resource.variant_name(),
            reason: "resource exposes no fields".to_string(),
        }));
    }
    Ok(names)
}
