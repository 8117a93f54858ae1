//! # Tab-Aligned Tables
//!
//! File: cli/src/common/ui/table.rs
//!
//! ## Overview
//!
//! Renders a list of same-shaped resources as a plain-text table: a header
//! row of upper-cased field names followed by one row per resource, with
//! columns lined up on tab stops of width 8.
//!
//! ## Layout
//!
//! Each column is as wide as the smallest multiple of [`TAB_WIDTH`] that is
//! strictly greater than its widest cell, and cells are padded with `\t`
//! characters up to that width. A terminal expanding tabs every 8 columns
//! therefore shows aligned columns, and splitting any line on `\t+` yields
//! exactly the header's number of fields. An empty cell is shown as
//! [`EMPTY_CELL`] so it cannot vanish into the surrounding tabs. The last
//! column is not padded.
//!
//! ```text
//! UUID            EXPIRES ADDR            FACT SUMMARY    COLLECTOR SUMMARY
//! 7cb8a4d2f1e0    30s     10.0.0.5        Hostname,os     ping
//!
//! ```
//!
//! ## Atomic output
//!
//! The header, every row and the trailing blank line are assembled in memory
//! first and then written with a single `write_all` followed by `flush`. If
//! any row fails to introspect, nothing reaches the writer.
//!
use crate::core::error::{Result, ToddError};
use crate::resource::{introspect, DisplayOptions, Resource};
use anyhow::{anyhow, Context};
use std::io::Write;
use tracing::debug;

/// Width of one tab stop.
pub const TAB_WIDTH: usize = 8;

/// Stand-in for a cell with no text.
pub const EMPTY_CELL: &str = "-";

/// Renders `resources` as a table and writes it to `out`.
///
/// ## Arguments
///
/// * `resources`: Non-empty, absent entries already removed, all of one variant.
/// * `options`: Display settings (identifier width).
/// * `out`: Destination; receives the whole table in one write.
///
/// ## Returns
///
/// * `Ok(n)`: The number of value rows written.
/// * `Err`: [`ToddError::RenderPrecondition`] for an empty slice,
///   [`ToddError::Introspection`] for a resource that cannot be described or
///   differs in variant from the first one, or an I/O error from `out`.
pub fn render_table<W: Write>(
    resources: &[Resource],
    options: &DisplayOptions,
    out: &mut W,
) -> Result<usize> {
    let first = resources.first().ok_or_else(|| {
        anyhow!(ToddError::RenderPrecondition(
            "a table needs at least one resource".to_string()
        ))
    })?;

    let header = introspect::field_names(first)?;
    let mut rows = Vec::with_capacity(resources.len() + 1);
    for (index, resource) in resources.iter().enumerate() {
        let fields = introspect::describe(resource, options)?;
        if fields
            .iter()
            .map(|f| f.name.as_str())
            .ne(header.iter().map(String::as_str))
        {
            return Err(anyhow!(ToddError::Introspection {
                variant: resource.variant_name(),
                reason: format!(
                    "row {} does not have the columns of the {} header",
                    index,
                    first.variant_name()
                ),
            }));
        }
        rows.push(fields.into_iter().map(|f| f.value).collect::<Vec<_>>());
    }
    rows.insert(0, header);

    let text = layout(&rows);
    debug!(
        "Writing {} row table ({} bytes) for {} resources",
        resources.len(),
        text.len(),
        first.variant_name()
    );
    out.write_all(text.as_bytes())
        .context("Failed to write table output")?;
    out.flush().context("Failed to flush table output")?;
    Ok(resources.len())
}

/// Lays out rows of cells on tab stops, adding the trailing blank line.
fn layout(rows: &[Vec<String>]) -> String {
    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|cell| sanitize(cell)).collect())
        .collect();

    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut stops = vec![0usize; columns];
    for row in &rows {
        // The last cell of a row is never padded, so it does not widen its column.
        for (col, cell) in row.iter().enumerate().take(row.len().saturating_sub(1)) {
            stops[col] = stops[col].max(display_width(cell));
        }
    }
    for stop in &mut stops {
        *stop = (*stop / TAB_WIDTH + 1) * TAB_WIDTH;
    }

    let mut text = String::new();
    for row in &rows {
        for (col, cell) in row.iter().enumerate() {
            text.push_str(cell);
            if col + 1 < row.len() {
                let pad = stops[col] - display_width(cell);
                let tabs = pad.div_ceil(TAB_WIDTH);
                text.extend(std::iter::repeat('\t').take(tabs));
            }
        }
        text.push('\n');
    }
    text.push('\n');
    text
}

/// Keeps a cell on one line and inside one column.
fn sanitize(cell: &str) -> String {
    let flat = cell.replace(['\t', '\n', '\r'], " ");
    if flat.trim().is_empty() {
        EMPTY_CELL.to_string()
    } else {
        flat
    }
}

fn display_width(cell: &str) -> usize {
    cell.chars().count()
}
