//! Round/group bucketing of flat match lists.
//!
//! All functions borrow the input and build fresh maps on every call. Inside a
//! bucket, matches keep the order they had in the input. Maps are `BTreeMap`s,
//! so rounds iterate ascending; group buckets iterate by id, and display order
//! by name is left to [`sort_groups_by_name`].

use crate::models::{BracketSide, Group, GroupId, Match};
use std::collections::BTreeMap;

/// round → matches in that round.
pub type RoundBuckets<'a> = BTreeMap<u32, Vec<&'a Match>>;

/// round → group (None = ungrouped) → matches.
pub type RoundGroupBuckets<'a> = BTreeMap<u32, BTreeMap<Option<GroupId>, Vec<&'a Match>>>;

/// bracket side → round → matches.
pub type BracketRoundBuckets<'a> = BTreeMap<BracketSide, RoundBuckets<'a>>;

/// Bucket every match by its round number.
pub fn group_by_round(matches: &[Match]) -> RoundBuckets<'_> {
    let mut rounds = RoundBuckets::new();
    for m in matches {
        rounds.entry(m.round).or_default().push(m);
    }
    rounds
}

/// Bucket by round, then by group id. Ungrouped matches land in the `None` bucket.
pub fn group_by_round_and_group(matches: &[Match]) -> RoundGroupBuckets<'_> {
    let mut rounds = RoundGroupBuckets::new();
    for m in matches {
        rounds
            .entry(m.round)
            .or_default()
            .entry(m.group_id)
            .or_default()
            .push(m);
    }
    rounds
}

/// Bucket by bracket side, then round. Matches without a side are skipped.
pub fn group_by_bracket_and_round(matches: &[Match]) -> BracketRoundBuckets<'_> {
    let mut sides = BracketRoundBuckets::new();
    for m in matches {
        if let Some(side) = m.bracket {
            sides
                .entry(side)
                .or_default()
                .entry(m.round)
                .or_default()
                .push(m);
        }
    }
    sides
}

/// Groups in display order: lexicographic by name, ties keep input order.
pub fn sort_groups_by_name(groups: &[Group]) -> Vec<&Group> {
    let mut sorted: Vec<&Group> = groups.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));
    sorted
}
