//! Group (heat): a named pool of registrations playing round-robin.

use crate::models::registration::RegistrationId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a group.
pub type GroupId = Uuid;

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    /// Display name ("A", "B", ...). Groups are listed in lexicographic name order.
    pub name: String,
    pub completed: bool,
    #[serde(default)]
    pub registrations: Vec<RegistrationId>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            completed: false,
            registrations: Vec::new(),
        }
    }
}
