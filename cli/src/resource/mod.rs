//! # ToDD API Resources
//!
//! File: cli/src/resource/mod.rs
//!
//! ## Overview
//!
//! A resource is one record returned by the ToDD server API, already decoded
//! from JSON. The presentation code never inspects a resource's shape at run
//! time; instead every variant implements [`Describable`], which exposes its
//! fields in a fixed, declared order. [`Resource`] is the tagged union the
//! renderers dispatch on.
//!
//! ## Architecture
//!
//! - `agent`: `AgentAdvert`, a registered agent with its facts and collectors
//! - `group`: `GroupAssignment`, an agent's membership in a group
//! - `introspect`: turns any [`Resource`] into header names and cell values
//!
pub mod agent;
pub mod group;
pub mod introspect;

pub use agent::AgentAdvert;
pub use group::GroupAssignment;

/// Display settings that influence how field values are stringified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOptions {
    /// Number of identifier characters kept by [`truncate_id`].
    pub id_width: usize,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self { id_width: 12 }
    }
}

/// A record that can describe itself as an ordered list of named fields.
pub trait Describable {
    /// Field names in declared order. Must be the same on every call.
    fn field_names(&self) -> &'static [&'static str];

    /// Stringified field values, one per name, in the same order.
    fn field_values(&self, options: &DisplayOptions) -> Vec<String>;
}

/// Any record the client knows how to present.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    Agent(AgentAdvert),
    Group(GroupAssignment),
    /// A `null` entry in a decoded array. Exposes no fields.
    Null,
}

impl Resource {
    /// Short name of the variant, used in log lines and error messages.
    pub fn variant_name(&self) -> &'static str {
        match self {
            Resource::Agent(_) => "agent",
            Resource::Group(_) => "group",
            Resource::Null => "null",
        }
    }

    /// The record's identifier. Empty means "not present".
    pub fn identifier(&self) -> &str {
        match self {
            Resource::Agent(agent) => &agent.uuid,
            Resource::Group(group) => &group.uuid,
            Resource::Null => "",
        }
    }

    /// Whether this value is the "no real record" sentinel.
    pub fn is_absent(&self) -> bool {
        self.identifier().is_empty()
    }

    pub(crate) fn describable(&self) -> Option<&dyn Describable> {
        match self {
            Resource::Agent(agent) => Some(agent),
            Resource::Group(group) => Some(group),
            Resource::Null => None,
        }
    }
}

impl From<AgentAdvert> for Resource {
    fn from(agent: AgentAdvert) -> Self {
        Resource::Agent(agent)
    }
}

impl From<GroupAssignment> for Resource {
    fn from(group: GroupAssignment) -> Self {
        Resource::Group(group)
    }
}

/// Shortens an identifier to at most `width` characters.
///
/// Idempotent: a value that already fits is returned unchanged.
pub fn truncate_id(id: &str, width: usize) -> String {
    match id.char_indices().nth(width) {
        Some((cut, _)) => id[..cut].to_string(),
        None => id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_id_shortens_long_ids() {
        let id = "7cb8a4d2f1e04c7aa2f1c0b8e3d6a915";
        assert_eq!(truncate_id(id, 12), "7cb8a4d2f1e0");
    }

    #[test]
    fn test_truncate_id_keeps_short_ids() {
        assert_eq!(truncate_id("abc123", 12), "abc123");
        assert_eq!(truncate_id("", 12), "");
        assert_eq!(truncate_id("exactly12chr", 12), "exactly12chr");
    }

    #[test]
    fn test_truncate_id_is_idempotent_and_bounded() {
        for id in ["", "a", "abc123", "7cb8a4d2f1e04c7aa2f1c0b8e3d6a915", "ünïcödé-identifier"] {
            for width in [1, 5, 12, 40] {
                let once = truncate_id(id, width);
                assert_eq!(truncate_id(&once, width), once);
                assert!(once.chars().count() <= width);
            }
        }
    }

    #[test]
    fn test_absent_sentinels() {
        assert!(Resource::Null.is_absent());
        assert!(Resource::Agent(AgentAdvert::default()).is_absent());
        let group = GroupAssignment {
            uuid: "abc".into(),
            group: "dc1".into(),
        };
        assert!(!Resource::from(group).is_absent());
    }
}
