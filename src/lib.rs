//! Club tournament organizer: library with models and bracket/round logic.

pub mod logic;
pub mod models;

pub use logic::{
    bracket_size, bracket_view, distinct_registrations, generate_group_stage,
    generate_single_elimination, group_by_bracket_and_round, group_by_round,
    group_by_round_and_group, group_name, group_round_views, losers_round_label,
    match_round_label, record_result, round_label, round_robin_pairings, round_views, seed_order,
    sort_groups_by_name, total_rounds, BracketView, GroupBucketView, GroupedRoundView, RoundView,
};
pub use models::{
    BracketSide, Event, EventError, EventFormat, EventId, EventState, Group, GroupId, LosersStart,
    Match, MatchId, Registration, RegistrationId, Slot,
};
