//! Match records, bracket sides and result slots.

use crate::models::group::GroupId;
use crate::models::registration::RegistrationId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Which side of a match won.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    #[default]
    One,
    Two,
}

/// Track of a double-elimination bracket. Winners sorts before losers.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketSide {
    Winners,
    Losers,
}

impl BracketSide {
    /// Parse a stored tag ("winners", "Losers", ...). Anything else is `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "winners" | "winner" => Some(BracketSide::Winners),
            "losers" | "loser" => Some(BracketSide::Losers),
            _ => None,
        }
    }
}

/// Unknown or malformed tags deserialize to `None` instead of failing the whole record.
fn lenient_bracket_side<'de, D>(deserializer: D) -> Result<Option<BracketSide>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(|v| v.as_str())
        .and_then(BracketSide::from_tag))
}

/// Group ids that are not valid uuids deserialize to `None` (the ungrouped bucket).
fn lenient_group_id<'de, D>(deserializer: D) -> Result<Option<GroupId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(|v| v.as_str())
        .and_then(|s| Uuid::parse_str(s.trim()).ok()))
}

/// A single match between two registrations. A missing registration is a bye
/// in round 1, or a slot still waiting for the previous round's winner.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    #[serde(default)]
    pub registration_1: Option<RegistrationId>,
    #[serde(default)]
    pub registration_2: Option<RegistrationId>,
    /// 1-based, increasing toward the final.
    pub round: u32,
    /// Set for group-stage matches.
    #[serde(default, deserialize_with = "lenient_group_id")]
    pub group_id: Option<GroupId>,
    /// Set for double-elimination matches.
    #[serde(default, deserialize_with = "lenient_bracket_side")]
    pub bracket: Option<BracketSide>,
    /// 1-based position within its round (and group or bracket side).
    #[serde(default)]
    pub match_number: u32,
    /// None if not yet played.
    #[serde(default)]
    pub winner: Option<Slot>,
    #[serde(default)]
    pub score: Option<String>,
    #[serde(default)]
    pub played_at: Option<DateTime<Utc>>,
}

impl Match {
    pub fn new(
        registration_1: Option<RegistrationId>,
        registration_2: Option<RegistrationId>,
        round: u32,
        match_number: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            registration_1,
            registration_2,
            round,
            group_id: None,
            bracket: None,
            match_number,
            winner: None,
            score: None,
            played_at: None,
        }
    }

    pub fn in_group(mut self, group_id: GroupId) -> Self {
        self.group_id = Some(group_id);
        self
    }

    pub fn on_side(mut self, side: BracketSide) -> Self {
        self.bracket = Some(side);
        self
    }

    pub fn is_played(&self) -> bool {
        self.winner.is_some()
    }

    /// Round-1 match with exactly one registration.
    pub fn is_bye(&self) -> bool {
        self.round == 1 && self.registration_1.is_some() != self.registration_2.is_some()
    }

    pub fn registration(&self, slot: Slot) -> Option<RegistrationId> {
        match slot {
            Slot::One => self.registration_1,
            Slot::Two => self.registration_2,
        }
    }

    pub fn winner_registration(&self) -> Option<RegistrationId> {
        self.winner.and_then(|slot| self.registration(slot))
    }

    /// Both registrations referenced by this match, skipping empty slots.
    pub fn registrations(&self) -> impl Iterator<Item = RegistrationId> + '_ {
        self.registration_1.iter().chain(self.registration_2.iter()).copied()
    }
}
