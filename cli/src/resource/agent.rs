//! # Agent Advertisements
//!
//! File: cli/src/resource/agent.rs
//!
//! ## Overview
//!
//! An agent advertisement is what a registered ToDD agent reports about
//! itself: its identifier, when the registration expires, the address it can
//! be reached on, its facts (capabilities and properties) and the collectors
//! it can run.
//!
//! The JSON field names are the server's (`Uuid`, `Expires`, `DefaultAddr`,
//! `LocalTime`, `Facts`, `Collectors`). Every field is optional on decode, and
//! `null` maps decode as empty maps.
//!
//! ## Computed fields
//!
//! - [`AgentAdvert::fact_summary`]: fact names on one line (table mode)
//! - [`AgentAdvert::pp_facts`]: one `name=value` line per fact (detail mode)
//! - [`AgentAdvert::collector_summary`]: collector names on one line
//!
//! All of them iterate in key order, so equal maps always produce equal text.
//!
use super::{truncate_id, Describable, DisplayOptions};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::fmt;

/// Text shown for an empty fact or collector map.
pub const NONE_SUMMARY: &str = "none";

/// A single agent as advertised to the ToDD server.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AgentAdvert {
    #[serde(rename = "Uuid", default)]
    pub uuid: String,
    #[serde(rename = "Expires", default)]
    pub expires: Expiry,
    #[serde(rename = "DefaultAddr", default)]
    pub default_addr: String,
    #[serde(rename = "LocalTime", default)]
    pub local_time: Option<DateTime<Utc>>,
    #[serde(rename = "Facts", default, deserialize_with = "null_as_default")]
    pub facts: BTreeMap<String, FactValue>,
    #[serde(rename = "Collectors", default, deserialize_with = "null_as_default")]
    pub collectors: BTreeMap<String, String>,
}

/// Field names in table column order.
const AGENT_FIELDS: &[&str] = &["uuid", "expires", "addr", "fact summary", "collector summary"];

impl AgentAdvert {
    /// Comma-separated fact names, or `none`.
    pub fn fact_summary(&self) -> String {
        summarize_keys(self.facts.keys())
    }

    /// One `name=value` line per fact, or `none`.
    pub fn pp_facts(&self) -> String {
        if self.facts.is_empty() {
            return NONE_SUMMARY.to_string();
        }
        self.facts
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Comma-separated collector names, or `none`.
    pub fn collector_summary(&self) -> String {
        summarize_keys(self.collectors.keys())
    }
}

impl Describable for AgentAdvert {
    fn field_names(&self) -> &'static [&'static str] {
        AGENT_FIELDS
    }

    fn field_values(&self, options: &DisplayOptions) -> Vec<String> {
        vec![
            truncate_id(&self.uuid, options.id_width),
            self.expires.to_string(),
            self.default_addr.clone(),
            self.fact_summary(),
            self.collector_summary(),
        ]
    }
}

fn summarize_keys<'a>(keys: impl Iterator<Item = &'a String>) -> String {
    let joined = keys.map(String::as_str).collect::<Vec<_>>().join(",");
    if joined.is_empty() {
        NONE_SUMMARY.to_string()
    } else {
        joined
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A fact value: either a single string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FactValue {
    One(String),
    Many(Vec<String>),
}

impl fmt::Display for FactValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactValue::One(value) => f.write_str(value),
            FactValue::Many(values) => f.write_str(&values.join(",")),
        }
    }
}

/// When an agent registration expires.
///
/// Servers send either preformatted text or a duration in nanoseconds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Expiry {
    Nanos(i64),
    Text(String),
}

impl Default for Expiry {
    fn default() -> Self {
        Expiry::Text(String::new())
    }
}

impl fmt::Display for Expiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expiry::Text(text) => f.write_str(text),
            Expiry::Nanos(nanos) => f.write_str(&format_duration(*nanos)),
        }
    }
}

const NANOS_PER_MICRO: u64 = 1_000;
const NANOS_PER_MILLI: u64 = 1_000_000;
const NANOS_PER_SEC: u64 = 1_000_000_000;

/// Formats nanoseconds as `1h2m3.5s`, `1m0s`, `250ms`, etc.
fn format_duration(nanos: i64) -> String {
    if nanos == 0 {
        return "0s".to_string();
    }
    let sign = if nanos < 0 { "-" } else { "" };
    let n = nanos.unsigned_abs();

    let body = if n < NANOS_PER_MICRO {
        format!("{}ns", n)
    } else if n < NANOS_PER_MILLI {
        format!("{}µs", decimal(n, 3))
    } else if n < NANOS_PER_SEC {
        format!("{}ms", decimal(n, 6))
    } else {
        let total_secs = n / NANOS_PER_SEC;
        let sub_nanos = n % NANOS_PER_SEC;
        let hours = total_secs / 3600;
        let minutes = (total_secs % 3600) / 60;
        let seconds = decimal((total_secs % 60) * NANOS_PER_SEC + sub_nanos, 9);
        if hours > 0 {
            format!("{}h{}m{}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m{}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    };
    format!("{}{}", sign, body)
}

/// Renders `value / 10^digits` without trailing fractional zeros.
fn decimal(value: u64, digits: u32) -> String {
    let scale = 10u64.pow(digits);
    let whole = value / scale;
    let frac = value % scale;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{:0width$}", frac, width = digits as usize);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}
