//! Bracket size and round/stage names.
//!
//! Labels are always computed against the bracket size rounded up to a power of
//! two, so brackets padded with byes get the same names as full ones.

use crate::models::{BracketSide, LosersStart, Match};
use std::collections::HashSet;

/// Smallest power of two >= `participants`. 0 and 1 both give 1.
pub fn bracket_size(participants: usize) -> usize {
    participants
        .checked_next_power_of_two()
        .unwrap_or(usize::MAX / 2 + 1)
}

/// Number of single-elimination rounds for a bracket (log2 of its size).
pub fn total_rounds(bracket_size_or_count: usize) -> u32 {
    bracket_size(bracket_size_or_count).trailing_zeros()
}

/// Distinct registrations referenced by the matches. Byes and undecided slots do not count.
pub fn distinct_registrations(matches: &[Match]) -> usize {
    matches
        .iter()
        .flat_map(|m| m.registrations())
        .collect::<HashSet<_>>()
        .len()
}

/// Winners-bracket (or single-elimination) name for `round`.
///
/// Bracket 16: round 4 "Final", 3 "Semifinals", 2 "Quarterfinals", 1 "Round 1 (R16)".
pub fn round_label(round: u32, bracket_size_or_count: usize) -> String {
    let size = bracket_size(bracket_size_or_count);
    let total = total_rounds(size);
    if round == 0 || round > total {
        return format!("Round {}", round);
    }
    match total - round {
        0 => "Final".to_string(),
        1 => "Semifinals".to_string(),
        2 => "Quarterfinals".to_string(),
        _ => {
            // entrants still in the bracket when this round starts
            let entrants = size >> (round - 1);
            format!("Round {} (R{})", round, entrants)
        }
    }
}

/// Losers-bracket name for a stored `round`. A bracket of size n has
/// 2 * (log2(n) - 1) losers rounds.
pub fn losers_round_label(round: u32, bracket_size_or_count: usize, start: LosersStart) -> String {
    let losers_round = start.normalize(round);
    let total = total_rounds(bracket_size_or_count).saturating_sub(1) * 2;
    if losers_round == 0 || losers_round > total {
        return format!("Losers Round {}", losers_round);
    }
    match total - losers_round {
        0 => "Losers Final".to_string(),
        1 => "Losers Semifinals".to_string(),
        _ => format!("Losers Round {}", losers_round),
    }
}

/// Label for one match: group-stage rounds are plain "Round r", losers-bracket
/// matches use the losers tiers, everything else the winners tiers.
pub fn match_round_label(m: &Match, bracket_size_or_count: usize, start: LosersStart) -> String {
    if m.group_id.is_some() {
        return format!("Round {}", m.round);
    }
    match m.bracket {
        Some(BracketSide::Losers) => losers_round_label(m.round, bracket_size_or_count, start),
        Some(BracketSide::Winners) | None => round_label(m.round, bracket_size_or_count),
    }
}
