//! Single-elimination bracket generation and result recording.

use crate::logic::labels::{bracket_size, total_rounds};
use crate::models::{
    Event, EventError, EventFormat, EventState, Match, MatchId, Registration, RegistrationId,
    Slot,
};
use chrono::Utc;
use rand::seq::SliceRandom;

/// Seed numbers (1-based) in bracket position order, so that seeds 1 and 2 can
/// only meet in the final. Size 8 gives `[1, 8, 4, 5, 2, 7, 3, 6]`.
pub fn seed_order(bracket_size: usize) -> Vec<usize> {
    let mut order = vec![1];
    while order.len() < bracket_size {
        let n = order.len() * 2;
        order = order.iter().flat_map(|&s| [s, n + 1 - s]).collect();
    }
    order
}

/// Seeded registrations by seed, then the unseeded ones in random order.
fn draw_order(registrations: &[Registration]) -> Vec<RegistrationId> {
    let mut seeded: Vec<&Registration> = registrations.iter().filter(|r| r.seed.is_some()).collect();
    seeded.sort_by_key(|r| r.seed);
    let mut unseeded: Vec<RegistrationId> = registrations
        .iter()
        .filter(|r| r.seed.is_none())
        .map(|r| r.id)
        .collect();
    unseeded.shuffle(&mut rand::thread_rng());
    seeded.into_iter().map(|r| r.id).chain(unseeded).collect()
}

/// Build every round of a single-elimination bracket.
///
/// 1. Order registrations: seeds first, unseeded shuffled.
/// 2. Round up to the bracket size; missing seeds are byes.
/// 3. Round 1 pairs bracket positions, later rounds start empty.
/// 4. Bye matches are decided immediately and their registration moves on.
pub fn generate_single_elimination(event: &mut Event) -> Result<(), EventError> {
    if event.state != EventState::Setup || event.format != EventFormat::SingleElimination {
        return Err(EventError::InvalidState);
    }
    if event.registrations.len() < 2 {
        return Err(EventError::NotEnoughRegistrations { required: 2 });
    }

    let entrants = draw_order(&event.registrations);
    let size = bracket_size(entrants.len());
    let rounds = total_rounds(size);
    let entrant = |seed: usize| entrants.get(seed - 1).copied();

    let positions = seed_order(size);
    let mut matches: Vec<Match> = positions
        .chunks_exact(2)
        .enumerate()
        .map(|(i, pair)| Match::new(entrant(pair[0]), entrant(pair[1]), 1, i as u32 + 1))
        .collect();
    for round in 2..=rounds {
        let count = size >> round;
        matches.extend((1..=count).map(|n| Match::new(None, None, round, n as u32)));
    }

    log::info!(
        "Generated single elimination for event {}: {} registrations, bracket of {}, {} rounds",
        event.id,
        entrants.len(),
        size,
        rounds
    );

    event.matches = matches;
    event.state = EventState::InProgress;

    let byes: Vec<(MatchId, Slot)> = event
        .matches
        .iter()
        .filter(|m| m.is_bye())
        .map(|m| {
            let slot = if m.registration_1.is_some() { Slot::One } else { Slot::Two };
            (m.id, slot)
        })
        .collect();
    for (match_id, slot) in byes {
        let idx = match_index(event, match_id)?;
        event.matches[idx].winner = Some(slot);
        advance_winner(event, idx)?;
    }
    Ok(())
}

fn match_index(event: &Event, match_id: MatchId) -> Result<usize, EventError> {
    event
        .matches
        .iter()
        .position(|m| m.id == match_id)
        .ok_or(EventError::MatchNotFound(match_id))
}

/// Next-round position for an elimination match: (match index, slot to fill).
fn next_position(event: &Event, idx: usize) -> Option<(usize, Slot)> {
    let m = &event.matches[idx];
    let number = m.match_number.max(1);
    let next_number = number / 2 + number % 2;
    let next_round = m.round.checked_add(1)?;
    let slot = if number % 2 == 1 { Slot::One } else { Slot::Two };
    event
        .matches
        .iter()
        .position(|n| {
            n.round == next_round
                && n.match_number == next_number
                && n.group_id.is_none()
                && n.bracket.is_none()
        })
        .map(|next| (next, slot))
}

/// Move the winner of `idx` into the next round. Returns false when `idx` was the final.
fn advance_winner(event: &mut Event, idx: usize) -> Result<bool, EventError> {
    let winner = event.matches[idx]
        .winner_registration()
        .ok_or(EventError::MatchNotReady)?;
    match next_position(event, idx) {
        Some((next, slot)) => {
            let target = &mut event.matches[next];
            match slot {
                Slot::One => target.registration_1 = Some(winner),
                Slot::Two => target.registration_2 = Some(winner),
            }
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Mark a group completed once all its matches are played; the event completes
/// once every group is.
fn refresh_group_completion(event: &mut Event) {
    let matches = &event.matches;
    for group in &mut event.groups {
        group.completed = matches
            .iter()
            .filter(|m| m.group_id == Some(group.id))
            .all(Match::is_played);
    }
    if !event.groups.is_empty() && event.groups.iter().all(|g| g.completed) {
        event.state = EventState::Completed;
    }
}

/// Record the winner of a match (and an optional score).
///
/// Elimination winners are moved into the next round; recording the final
/// completes the event. A result can be changed only while the next-round
/// match is unplayed.
pub fn record_result(
    event: &mut Event,
    match_id: MatchId,
    winner: Slot,
    score: Option<String>,
) -> Result<(), EventError> {
    if event.state != EventState::InProgress {
        return Err(EventError::InvalidState);
    }
    let idx = match_index(event, match_id)?;
    let m = &event.matches[idx];
    let ready = m.is_bye() || (m.registration_1.is_some() && m.registration_2.is_some());
    if !ready || m.registration(winner).is_none() {
        return Err(EventError::MatchNotReady);
    }

    let elimination =
        event.format == EventFormat::SingleElimination && m.group_id.is_none() && m.bracket.is_none();
    if elimination {
        if let Some((next, _)) = next_position(event, idx) {
            if event.matches[next].is_played() {
                return Err(EventError::InvalidState);
            }
        }
    }

    let m = &mut event.matches[idx];
    m.winner = Some(winner);
    m.score = score;
    m.played_at = Some(Utc::now());
    log::debug!("Recorded result for match {} (round {}): {:?}", m.id, m.round, winner);
    let in_group = m.group_id.is_some();

    if in_group {
        refresh_group_completion(event);
    } else if elimination && !advance_winner(event, idx)? {
        log::info!("Final decided, event {} completed", event.id);
        event.state = EventState::Completed;
    }
    Ok(())
}
