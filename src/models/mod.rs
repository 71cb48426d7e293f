//! Data structures for club events: registrations, groups, matches, event state.

mod event;
mod group;
mod match_record;
mod registration;

pub use event::{Event, EventError, EventFormat, EventId, EventState, LosersStart};
pub use group::{Group, GroupId};
pub use match_record::{BracketSide, Match, MatchId, Slot};
pub use registration::{Registration, RegistrationId};
