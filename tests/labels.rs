//! Integration tests for bracket size and round naming.

use club_tournament_web::{
    bracket_size, distinct_registrations, losers_round_label, match_round_label, round_label,
    total_rounds, BracketSide, Group, LosersStart, Match,
};
use uuid::Uuid;

#[test]
fn bracket_size_rounds_up_to_power_of_two() {
    assert_eq!(bracket_size(0), 1);
    assert_eq!(bracket_size(1), 1);
    assert_eq!(bracket_size(2), 2);
    assert_eq!(bracket_size(5), 8);
    assert_eq!(bracket_size(8), 8);
    assert_eq!(bracket_size(9), 16);
}

#[test]
fn total_rounds_is_log2_of_bracket_size() {
    assert_eq!(total_rounds(1), 0);
    assert_eq!(total_rounds(2), 1);
    assert_eq!(total_rounds(8), 3);
    assert_eq!(total_rounds(16), 4);
    // raw counts are rounded up first
    assert_eq!(total_rounds(5), 3);
}

#[test]
fn labels_for_bracket_of_eight() {
    assert_eq!(round_label(3, 8), "Final");
    assert_eq!(round_label(2, 8), "Semifinals");
    assert_eq!(round_label(1, 8), "Quarterfinals");
}

#[test]
fn labels_for_bracket_of_sixteen_and_thirty_two() {
    assert_eq!(round_label(4, 16), "Final");
    assert_eq!(round_label(3, 16), "Semifinals");
    assert_eq!(round_label(2, 16), "Quarterfinals");
    assert_eq!(round_label(1, 16), "Round 1 (R16)");

    assert_eq!(round_label(1, 32), "Round 1 (R32)");
    assert_eq!(round_label(2, 32), "Round 2 (R16)");
}

#[test]
fn labels_use_rounded_up_size_for_bye_brackets() {
    // 6 entrants play in a bracket of 8
    assert_eq!(round_label(1, 6), "Quarterfinals");
    assert_eq!(round_label(3, 6), "Final");
}

#[test]
fn out_of_range_rounds_do_not_panic() {
    assert_eq!(round_label(0, 8), "Round 0");
    assert_eq!(round_label(5, 8), "Round 5");
    assert_eq!(round_label(1, 0), "Round 1");
    assert_eq!(losers_round_label(0, 8, LosersStart::default()), "Losers Round 0");
    assert_eq!(losers_round_label(1, 1, LosersStart::default()), "Losers Round 1");
}

#[test]
fn losers_labels_for_bracket_of_eight() {
    // 8 entrants: 4 losers rounds
    let start = LosersStart::default();
    assert_eq!(losers_round_label(4, 8, start), "Losers Final");
    assert_eq!(losers_round_label(3, 8, start), "Losers Semifinals");
    assert_eq!(losers_round_label(2, 8, start), "Losers Round 2");
    assert_eq!(losers_round_label(1, 8, start), "Losers Round 1");
}

#[test]
fn losers_labels_respect_losers_start() {
    // losers rounds stored as 2..=5
    let start = LosersStart::new(2).unwrap();
    assert_eq!(losers_round_label(5, 8, start), "Losers Final");
    assert_eq!(losers_round_label(4, 8, start), "Losers Semifinals");
    assert_eq!(losers_round_label(2, 8, start), "Losers Round 1");
    assert!(LosersStart::new(0).is_err());
}

#[test]
fn match_label_dispatches_on_side_and_group() {
    let start = LosersStart::default();
    let winners = Match::new(None, None, 3, 1).on_side(BracketSide::Winners);
    let losers = Match::new(None, None, 4, 1).on_side(BracketSide::Losers);
    let plain = Match::new(None, None, 2, 1);
    let grouped = Match::new(None, None, 3, 1).in_group(Group::new("A").id);

    assert_eq!(match_round_label(&winners, 8, start), "Final");
    assert_eq!(match_round_label(&losers, 8, start), "Losers Final");
    assert_eq!(match_round_label(&plain, 8, start), "Semifinals");
    assert_eq!(match_round_label(&grouped, 8, start), "Round 3");
}

#[test]
fn distinct_registrations_skips_byes_and_repeats() {
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let c = Uuid::new_v4();
    let matches = vec![
        Match::new(Some(a), Some(b), 1, 1),
        Match::new(Some(c), None, 1, 2),
        Match::new(Some(a), Some(c), 2, 1),
    ];
    assert_eq!(distinct_registrations(&matches), 3);
    assert_eq!(bracket_size(distinct_registrations(&matches)), 4);
    assert_eq!(distinct_registrations(&[]), 0);
}

#[test]
fn extreme_rounds_and_sizes_do_not_panic() {
    let start = LosersStart::default();
    assert_eq!(round_label(u32::MAX, 8), format!("Round {}", u32::MAX));
    assert_eq!(
        losers_round_label(u32::MAX, 8, start),
        format!("Losers Round {}", u32::MAX)
    );
    assert_eq!(
        losers_round_label(u32::MAX, 8, LosersStart::new(u32::MAX).unwrap()),
        "Losers Round 1"
    );
    assert_eq!(losers_round_label(1, 8, LosersStart::new(u32::MAX).unwrap()), "Losers Round 0");

    let losers = Match::new(None, None, u32::MAX, u32::MAX).on_side(BracketSide::Losers);
    assert_eq!(
        match_round_label(&losers, usize::MAX, start),
        format!("Losers Round {}", u32::MAX)
    );
    assert_eq!(round_label(1, usize::MAX), format!("Round 1 (R{})", usize::MAX / 2 + 1));
    assert_eq!(total_rounds(usize::MAX), usize::BITS - 1);
}
