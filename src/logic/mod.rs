//! Event business logic: round organization, labels, generation and views.

mod bracket;
mod group_stage;
mod grouping;
mod labels;
mod view;

pub use bracket::{generate_single_elimination, record_result, seed_order};
pub use group_stage::{generate_group_stage, group_name, round_robin_pairings};
pub use grouping::{
    group_by_bracket_and_round, group_by_round, group_by_round_and_group, sort_groups_by_name,
    BracketRoundBuckets, RoundBuckets, RoundGroupBuckets,
};
pub use labels::{
    bracket_size, distinct_registrations, losers_round_label, match_round_label, round_label,
    total_rounds,
};
pub use view::{
    bracket_view, group_round_views, round_views, BracketView, GroupBucketView, GroupedRoundView,
    RoundView,
};
