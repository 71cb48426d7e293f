//! Event, EventFormat and EventState.

use crate::models::group::{Group, GroupId};
use crate::models::match_record::{Match, MatchId};
use crate::models::registration::{Registration, RegistrationId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during event operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EventError {
    /// Event is not in a state that allows this action.
    InvalidState,
    /// Registration name is empty after trimming.
    EmptyName,
    /// A registration with this display name already exists (case-insensitive).
    DuplicateRegistration,
    RegistrationNotFound(RegistrationId),
    GroupNotFound(GroupId),
    MatchNotFound(MatchId),
    /// Not enough registrations to generate matches.
    NotEnoughRegistrations { required: usize },
    /// Group count is zero or leaves a group with fewer than 2 registrations.
    InvalidGroupCount { groups: usize, registrations: usize },
    /// Match still waits for a registration (previous round not decided).
    MatchNotReady,
    /// Round numbers start at 1.
    InvalidRound,
    /// Losers bracket must start at round 1 or later.
    InvalidLosersStart,
}

impl std::fmt::Display for EventError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventError::InvalidState => write!(f, "Invalid state for this action"),
            EventError::EmptyName => write!(f, "Registration name must not be empty"),
            EventError::DuplicateRegistration => {
                write!(f, "A registration with this name already exists")
            }
            EventError::RegistrationNotFound(_) => write!(f, "Registration not found"),
            EventError::GroupNotFound(_) => write!(f, "Group not found"),
            EventError::MatchNotFound(_) => write!(f, "Match not found"),
            EventError::NotEnoughRegistrations { required } => {
                write!(f, "Need at least {} registrations", required)
            }
            EventError::InvalidGroupCount { groups, registrations } => write!(
                f,
                "Cannot split {} registrations into {} groups of at least 2",
                registrations, groups
            ),
            EventError::MatchNotReady => write!(f, "Match is still waiting for a participant"),
            EventError::InvalidRound => write!(f, "Round numbers start at 1"),
            EventError::InvalidLosersStart => write!(f, "Losers bracket must start at round 1 or later"),
        }
    }
}

impl std::error::Error for EventError {}

/// Unique identifier for an event.
pub type EventId = Uuid;

/// How matches of the event are organized.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventFormat {
    #[default]
    SingleElimination,
    /// Winners and losers brackets; match records are supplied by the caller.
    DoubleElimination,
    /// Round-robin groups (heats).
    Groups,
}

/// Current phase of the event.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventState {
    /// Taking registrations; no matches yet.
    #[default]
    Setup,
    InProgress,
    Completed,
}

/// Round number that the first losers-bracket round carries in the match records.
/// Some generators continue numbering from the winners bracket, others restart at 1.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LosersStart {
    pub first_round: u32,
}

impl Default for LosersStart {
    fn default() -> Self {
        Self { first_round: 1 }
    }
}

impl LosersStart {
    pub fn new(first_round: u32) -> Result<Self, EventError> {
        if first_round == 0 {
            return Err(EventError::InvalidLosersStart);
        }
        Ok(Self { first_round })
    }

    /// 1-based losers round for a stored round number (0 if it lies before the start).
    pub fn normalize(&self, round: u32) -> u32 {
        match round.checked_sub(self.first_round) {
            Some(offset) => offset.saturating_add(1),
            None => 0,
        }
    }
}

/// Full event state: registrations, groups, matches and phase.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub format: EventFormat,
    pub state: EventState,
    #[serde(default)]
    pub losers_start: LosersStart,
    pub registrations: Vec<Registration>,
    pub groups: Vec<Group>,
    pub matches: Vec<Match>,
}

impl Event {
    /// Create a new event in Setup state with no registrations.
    pub fn new(name: impl Into<String>, format: EventFormat) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            format,
            state: EventState::Setup,
            losers_start: LosersStart::default(),
            registrations: Vec::new(),
            groups: Vec::new(),
            matches: Vec::new(),
        }
    }

    /// Create an event with initial registrations. Still in Setup.
    pub fn with_registrations(
        name: impl Into<String>,
        format: EventFormat,
        registrations: Vec<Registration>,
    ) -> Self {
        Self {
            registrations,
            ..Self::new(name, format)
        }
    }

    pub fn registration(&self, id: RegistrationId) -> Option<&Registration> {
        self.registrations.iter().find(|r| r.id == id)
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn get_match(&self, id: MatchId) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == id)
    }

    /// Add a registration (Setup only). Display names must be unique (case-insensitive).
    pub fn add_registration(
        &mut self,
        name: &str,
        partner: Option<&str>,
    ) -> Result<RegistrationId, EventError> {
        if self.state != EventState::Setup {
            return Err(EventError::InvalidState);
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(EventError::EmptyName);
        }
        let registration = match partner.map(str::trim).filter(|p| !p.is_empty()) {
            Some(partner) => Registration::pair(name, partner),
            None => Registration::single(name),
        };
        let display = registration.display_name();
        if self
            .registrations
            .iter()
            .any(|r| r.display_name().eq_ignore_ascii_case(&display))
        {
            return Err(EventError::DuplicateRegistration);
        }
        let id = registration.id;
        self.registrations.push(registration);
        Ok(id)
    }

    /// Remove a registration by id (Setup only).
    pub fn remove_registration(&mut self, id: RegistrationId) -> Result<(), EventError> {
        if self.state != EventState::Setup {
            return Err(EventError::InvalidState);
        }
        let idx = self
            .registrations
            .iter()
            .position(|r| r.id == id)
            .ok_or(EventError::RegistrationNotFound(id))?;
        self.registrations.remove(idx);
        Ok(())
    }

    /// Set (or clear) the seed of a registration (Setup only).
    pub fn set_seed(&mut self, id: RegistrationId, seed: Option<u32>) -> Result<(), EventError> {
        if self.state != EventState::Setup {
            return Err(EventError::InvalidState);
        }
        let registration = self
            .registrations
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(EventError::RegistrationNotFound(id))?;
        registration.seed = seed;
        Ok(())
    }

    /// Change the format (Setup only).
    pub fn set_format(&mut self, format: EventFormat) -> Result<(), EventError> {
        if self.state != EventState::Setup {
            return Err(EventError::InvalidState);
        }
        self.format = format;
        Ok(())
    }

    /// Configure where the losers bracket starts. Only affects labeling.
    pub fn set_losers_start(&mut self, first_round: u32) -> Result<(), EventError> {
        self.losers_start = LosersStart::new(first_round)?;
        Ok(())
    }

    /// Append a match record produced outside this crate (e.g. a double-elimination
    /// bracket). Referenced registrations and group must exist.
    pub fn add_match(&mut self, record: Match) -> Result<MatchId, EventError> {
        if self.state == EventState::Completed {
            return Err(EventError::InvalidState);
        }
        if record.round == 0 {
            return Err(EventError::InvalidRound);
        }
        for id in record.registrations() {
            if self.registration(id).is_none() {
                return Err(EventError::RegistrationNotFound(id));
            }
        }
        if let Some(group_id) = record.group_id {
            if self.group(group_id).is_none() {
                return Err(EventError::GroupNotFound(group_id));
            }
        }
        let id = record.id;
        self.matches.push(record);
        self.state = EventState::InProgress;
        Ok(id)
    }

    /// Back to Setup with the same registrations. Clears matches and groups.
    pub fn reset(&mut self) {
        self.matches.clear();
        self.groups.clear();
        self.state = EventState::Setup;
    }
}
