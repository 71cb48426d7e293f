//! Registration: a single player or a pair entered into an event.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a registration (used in matches and groups).
pub type RegistrationId = Uuid;

/// A participant entry in an event.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    pub id: RegistrationId,
    pub name: String,
    /// Second player for pair entries (doubles).
    #[serde(default)]
    pub partner: Option<String>,
    /// 1 is the top seed. Unseeded entries are drawn randomly behind the seeds.
    #[serde(default)]
    pub seed: Option<u32>,
}

impl Registration {
    /// Single-player entry.
    pub fn single(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            partner: None,
            seed: None,
        }
    }

    /// Pair entry.
    pub fn pair(name: impl Into<String>, partner: impl Into<String>) -> Self {
        Self {
            partner: Some(partner.into()),
            ..Self::single(name)
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// "Name" for singles, "Name / Partner" for pairs.
    pub fn display_name(&self) -> String {
        match &self.partner {
            Some(partner) => format!("{} / {}", self.name, partner),
            None => self.name.clone(),
        }
    }
}
