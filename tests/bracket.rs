//! Integration tests for single-elimination generation and result recording.

use club_tournament_web::{
    bracket_view, generate_single_elimination, record_result, round_views, seed_order, Event,
    EventError, EventFormat, EventState, Match, Registration, Slot,
};

fn event_with_registrations(n: usize) -> Event {
    let registrations: Vec<Registration> =
        (0..n).map(|i| Registration::single(format!("P{i}"))).collect();
    Event::with_registrations("Club open", EventFormat::SingleElimination, registrations)
}

/// Play every ready, unplayed match of the lowest open round, slot one always winning.
fn play_round(event: &mut Event) {
    let ready: Vec<_> = event
        .matches
        .iter()
        .filter(|m| !m.is_played() && m.registration_1.is_some() && m.registration_2.is_some())
        .map(|m| (m.round, m.id))
        .collect();
    let Some(low) = ready.iter().map(|(r, _)| *r).min() else {
        return;
    };
    for (_, id) in ready.into_iter().filter(|(r, _)| *r == low) {
        record_result(event, id, Slot::One, Some("3-1".to_string())).unwrap();
    }
}

#[test]
fn seed_order_keeps_top_seeds_apart() {
    assert_eq!(seed_order(1), vec![1]);
    assert_eq!(seed_order(2), vec![1, 2]);
    assert_eq!(seed_order(4), vec![1, 4, 2, 3]);
    assert_eq!(seed_order(8), vec![1, 8, 4, 5, 2, 7, 3, 6]);
}

#[test]
fn generate_requires_two_registrations() {
    let mut e = event_with_registrations(1);
    assert_eq!(
        generate_single_elimination(&mut e),
        Err(EventError::NotEnoughRegistrations { required: 2 })
    );
    assert_eq!(e.state, EventState::Setup);
}

#[test]
fn generate_rejects_other_formats() {
    let mut e = event_with_registrations(4);
    e.set_format(EventFormat::Groups).unwrap();
    assert_eq!(generate_single_elimination(&mut e), Err(EventError::InvalidState));
}

#[test]
fn generate_builds_all_rounds() {
    let mut e = event_with_registrations(8);
    generate_single_elimination(&mut e).unwrap();

    assert_eq!(e.state, EventState::InProgress);
    assert_eq!(e.matches.len(), 7);
    assert_eq!(e.matches.iter().filter(|m| m.round == 1).count(), 4);
    assert_eq!(e.matches.iter().filter(|m| m.round == 2).count(), 2);
    assert_eq!(e.matches.iter().filter(|m| m.round == 3).count(), 1);
    assert!(e
        .matches
        .iter()
        .filter(|m| m.round == 1)
        .all(|m| m.registration_1.is_some() && m.registration_2.is_some()));
}

#[test]
fn byes_go_to_top_seeds_and_advance() {
    let mut registrations: Vec<Registration> =
        (0..5).map(|i| Registration::single(format!("P{i}"))).collect();
    registrations[3] = registrations[3].clone().with_seed(1);
    let top = registrations[3].id;
    let mut e = Event::with_registrations("Club open", EventFormat::SingleElimination, registrations);

    generate_single_elimination(&mut e).unwrap();

    // 5 entrants, bracket of 8: 3 byes
    let byes: Vec<_> = e.matches.iter().filter(|m| m.is_bye()).collect();
    assert_eq!(byes.len(), 3);
    assert!(byes.iter().all(|m| m.is_played()));
    let first = e.matches.iter().find(|m| m.round == 1 && m.match_number == 1).unwrap();
    assert_eq!(first.registration_1, Some(top));
    assert_eq!(first.winner, Some(Slot::One));
    let semi = e.matches.iter().find(|m| m.round == 2 && m.match_number == 1).unwrap();
    assert_eq!(semi.registration_1, Some(top));
}

#[test]
fn results_advance_winners_until_final_completes_event() {
    let mut e = event_with_registrations(6);
    generate_single_elimination(&mut e).unwrap();

    while e.state == EventState::InProgress {
        let before = e.matches.iter().filter(|m| m.is_played()).count();
        play_round(&mut e);
        let after = e.matches.iter().filter(|m| m.is_played()).count();
        assert!(after > before, "no progress");
    }

    assert_eq!(e.state, EventState::Completed);
    assert!(e.matches.iter().all(|m| m.is_played()));
    let final_match = e.matches.iter().find(|m| m.round == 3).unwrap();
    assert!(final_match.winner_registration().is_some());
    assert!(final_match.played_at.is_some());
    assert_eq!(final_match.score.as_deref(), Some("3-1"));
}

#[test]
fn undecided_match_cannot_be_recorded() {
    let mut e = event_with_registrations(4);
    generate_single_elimination(&mut e).unwrap();
    let final_id = e.matches.iter().find(|m| m.round == 2).unwrap().id;
    assert_eq!(
        record_result(&mut e, final_id, Slot::One, None),
        Err(EventError::MatchNotReady)
    );
}

#[test]
fn result_cannot_change_after_next_round_is_played() {
    let mut e = event_with_registrations(4);
    generate_single_elimination(&mut e).unwrap();
    let semis: Vec<_> = e.matches.iter().filter(|m| m.round == 1).map(|m| m.id).collect();
    for id in &semis {
        record_result(&mut e, *id, Slot::Two, None).unwrap();
    }
    // changing a semifinal before the final is played re-seats the final
    record_result(&mut e, semis[0], Slot::One, None).unwrap();
    let expected = e.matches.iter().find(|m| m.id == semis[0]).unwrap().registration_1;
    let final_id = e.matches.iter().find(|m| m.round == 2).unwrap().id;
    assert_eq!(e.get_match(final_id).unwrap().registration_1, expected);

    record_result(&mut e, final_id, Slot::One, None).unwrap();
    assert_eq!(e.state, EventState::Completed);
    assert_eq!(
        record_result(&mut e, semis[0], Slot::Two, None),
        Err(EventError::InvalidState)
    );
}

#[test]
fn views_label_generated_bracket() {
    let mut e = event_with_registrations(16);
    generate_single_elimination(&mut e).unwrap();

    let labels: Vec<_> = round_views(&e).into_iter().map(|r| r.label).collect();
    assert_eq!(
        labels,
        vec!["Round 1 (R16)", "Quarterfinals", "Semifinals", "Final"]
    );

    let view = bracket_view(&e);
    assert_eq!(view.bracket_size, 16);
    assert_eq!(view.winners.len(), 4);
    assert!(view.losers.is_empty());
}

#[test]
fn extreme_round_and_match_numbers_record_without_panic() {
    let mut e = event_with_registrations(2);
    let a = e.registrations[0].id;
    let b = e.registrations[1].id;
    let last_round = e.add_match(Match::new(Some(a), Some(b), u32::MAX, 1)).unwrap();
    let last_number = e.add_match(Match::new(Some(a), Some(b), 1, u32::MAX)).unwrap();

    record_result(&mut e, last_number, Slot::Two, None).unwrap();
    assert_eq!(e.state, EventState::Completed);
    assert_eq!(e.get_match(last_round).unwrap().winner, None);

    let labels: Vec<_> = round_views(&e).into_iter().map(|r| r.label).collect();
    assert_eq!(labels, vec!["Final".to_string(), format!("Round {}", u32::MAX)]);
}

#[test]
fn extreme_round_final_completes_event() {
    let mut e = event_with_registrations(2);
    let a = e.registrations[0].id;
    let b = e.registrations[1].id;
    let id = e.add_match(Match::new(Some(a), Some(b), u32::MAX, 1)).unwrap();
    record_result(&mut e, id, Slot::One, None).unwrap();
    assert_eq!(e.get_match(id).unwrap().winner_registration(), Some(a));
    assert_eq!(e.state, EventState::Completed);
}
