//! Display views: organizer buckets turned into ordered, labeled lists for the API.

use crate::logic::grouping::{
    group_by_bracket_and_round, group_by_round, group_by_round_and_group, sort_groups_by_name,
    RoundBuckets,
};
use crate::logic::labels::{bracket_size, distinct_registrations, losers_round_label, round_label};
use crate::models::{BracketSide, Event, EventFormat, Group, GroupId, Match};
use serde::Serialize;
use std::collections::BTreeMap;

/// One round with its display label. `bracket` is set for the winners/losers
/// sections of double-elimination events.
#[derive(Clone, Debug, Serialize)]
pub struct RoundView {
    pub round: u32,
    pub bracket: Option<BracketSide>,
    pub label: String,
    pub matches: Vec<Match>,
}

/// Matches of one group within a round. `group_id` None is the ungrouped bucket.
#[derive(Clone, Debug, Serialize)]
pub struct GroupBucketView {
    pub group_id: Option<GroupId>,
    pub group_name: Option<String>,
    pub completed: bool,
    pub matches: Vec<Match>,
}

#[derive(Clone, Debug, Serialize)]
pub struct GroupedRoundView {
    pub round: u32,
    pub label: String,
    /// Named groups by name, then unknown group ids, ungrouped bucket last.
    pub groups: Vec<GroupBucketView>,
}

#[derive(Clone, Debug, Serialize)]
pub struct BracketView {
    pub bracket_size: usize,
    pub winners: Vec<RoundView>,
    pub losers: Vec<RoundView>,
}

fn owned(matches: &[&Match]) -> Vec<Match> {
    matches.iter().map(|m| (*m).clone()).collect()
}

fn event_bracket_size(event: &Event) -> usize {
    bracket_size(distinct_registrations(&event.matches))
}

fn label_for(event: &Event, round: u32, side: Option<BracketSide>, size: usize) -> String {
    match (event.format, side) {
        (EventFormat::Groups, _) => format!("Round {}", round),
        (EventFormat::DoubleElimination, Some(BracketSide::Losers)) => {
            losers_round_label(round, size, event.losers_start)
        }
        _ => round_label(round, size),
    }
}

/// All matches by round, ascending, each round labeled. Double-elimination
/// rounds are split by bracket side (winners, then losers, then untagged).
pub fn round_views(event: &Event) -> Vec<RoundView> {
    let size = event_bracket_size(event);
    let mut views = Vec::new();
    for (round, matches) in group_by_round(&event.matches) {
        if event.format != EventFormat::DoubleElimination {
            views.push(RoundView {
                round,
                bracket: None,
                label: label_for(event, round, None, size),
                matches: owned(&matches),
            });
            continue;
        }
        let mut sides: BTreeMap<Option<BracketSide>, Vec<&Match>> = BTreeMap::new();
        for m in matches {
            sides.entry(m.bracket).or_default().push(m);
        }
        let untagged = sides.remove(&None);
        let tagged = sides.into_iter().chain(untagged.map(|m| (None, m)));
        views.extend(tagged.map(|(side, matches)| RoundView {
            round,
            bracket: side,
            label: label_for(event, round, side, size),
            matches: owned(&matches),
        }));
    }
    views
}

fn bucket_view(group_id: Option<GroupId>, group: Option<&Group>, matches: &[&Match]) -> GroupBucketView {
    GroupBucketView {
        group_id,
        group_name: group.map(|g| g.name.clone()),
        completed: group.map_or(false, |g| g.completed),
        matches: owned(matches),
    }
}

/// Matches by round, then by group in display order.
pub fn group_round_views(event: &Event) -> Vec<GroupedRoundView> {
    let size = event_bracket_size(event);
    let ordered = sort_groups_by_name(&event.groups);
    group_by_round_and_group(&event.matches)
        .into_iter()
        .map(|(round, mut buckets)| {
            let ungrouped = buckets.remove(&None);
            let mut groups: Vec<GroupBucketView> = ordered
                .iter()
                .filter_map(|&g| {
                    buckets
                        .remove(&Some(g.id))
                        .map(|matches| bucket_view(Some(g.id), Some(g), &matches))
                })
                .collect();
            // ids with no group record left in the map
            groups.extend(
                buckets
                    .into_iter()
                    .map(|(group_id, matches)| bucket_view(group_id, None, &matches)),
            );
            if let Some(matches) = ungrouped {
                groups.push(bucket_view(None, None, &matches));
            }
            GroupedRoundView {
                round,
                label: label_for(event, round, None, size),
                groups,
            }
        })
        .collect()
}

fn labeled_rounds(
    buckets: RoundBuckets<'_>,
    side: Option<BracketSide>,
    label: impl Fn(u32) -> String,
) -> Vec<RoundView> {
    buckets
        .into_iter()
        .map(|(round, matches)| RoundView {
            round,
            bracket: side,
            label: label(round),
            matches: owned(&matches),
        })
        .collect()
}

/// Winners and losers sections. Outside double elimination every ungrouped match
/// is shown as winners bracket.
pub fn bracket_view(event: &Event) -> BracketView {
    let size = event_bracket_size(event);
    let start = event.losers_start;

    let (winners, losers) = if event.format == EventFormat::DoubleElimination {
        let mut sides = group_by_bracket_and_round(&event.matches);
        let winners = sides.remove(&BracketSide::Winners).unwrap_or_default();
        let losers = sides.remove(&BracketSide::Losers).unwrap_or_default();
        (
            labeled_rounds(winners, Some(BracketSide::Winners), |r| round_label(r, size)),
            labeled_rounds(losers, Some(BracketSide::Losers), |r| losers_round_label(r, size, start)),
        )
    } else {
        let ungrouped: Vec<Match> = event
            .matches
            .iter()
            .filter(|m| m.group_id.is_none())
            .cloned()
            .collect();
        (
            labeled_rounds(group_by_round(&ungrouped), None, |r| round_label(r, size)),
            Vec::new(),
        )
    };

    BracketView {
        bracket_size: size,
        winners,
        losers,
    }
}
