//! # Group Assignments
//!
//! File: cli/src/resource/group.rs
//!
//! The server reports group membership as a single JSON object mapping each
//! agent UUID to the name of the group it was placed in. Each entry becomes
//! one [`GroupAssignment`].
//!
use super::{truncate_id, Describable, DisplayOptions};
use std::collections::BTreeMap;

/// One agent's group membership.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupAssignment {
    pub uuid: String,
    pub group: String,
}

const GROUP_FIELDS: &[&str] = &["uuid", "group name"];

impl GroupAssignment {
    /// Expands the server's `{uuid: group}` object, in UUID order.
    pub fn from_map(map: BTreeMap<String, String>) -> Vec<GroupAssignment> {
        map.into_iter()
            .map(|(uuid, group)| GroupAssignment { uuid, group })
            .collect()
    }
}

impl Describable for GroupAssignment {
    fn field_names(&self) -> &'static [&'static str] {
        GROUP_FIELDS
    }

    fn field_values(&self, options: &DisplayOptions) -> Vec<String> {
        vec![truncate_id(&self.uuid, options.id_width), self.group.clone()]
    }
}
