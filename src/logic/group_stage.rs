//! Group stage: split registrations into named groups and build round-robin matches.

use crate::models::{
    Event, EventError, EventFormat, EventState, Group, Match, RegistrationId,
};
use rand::seq::SliceRandom;

/// Group name for a 0-based index: "A".."Z", then "AA", "AB", ...
pub fn group_name(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push((b'A' + (n % 26) as u8) as char);
        n /= 26;
    }
    letters.iter().rev().collect()
}

/// Round-robin schedule for one group (circle method). Each entry is a round of
/// pairings; with an odd member count one member sits out every round.
pub fn round_robin_pairings(members: &[RegistrationId]) -> Vec<Vec<(RegistrationId, RegistrationId)>> {
    let mut slots: Vec<Option<RegistrationId>> = members.iter().copied().map(Some).collect();
    if slots.len() % 2 == 1 {
        slots.push(None);
    }
    let k = slots.len();
    if k < 2 {
        return Vec::new();
    }
    let mut rounds = Vec::with_capacity(k - 1);
    for _ in 0..k - 1 {
        let pairs = (0..k / 2)
            .filter_map(|i| match (slots[i], slots[k - 1 - i]) {
                (Some(a), Some(b)) => Some((a, b)),
                _ => None,
            })
            .collect();
        rounds.push(pairs);
        // first slot stays fixed, the rest rotate one step
        slots[1..].rotate_right(1);
    }
    rounds
}

/// Generate the group stage.
///
/// 1. Shuffle registrations.
/// 2. Deal them into `group_count` groups named "A", "B", ...
/// 3. Build a full round-robin per group; rounds are numbered per group from 1.
pub fn generate_group_stage(event: &mut Event, group_count: usize) -> Result<(), EventError> {
    if event.state != EventState::Setup || event.format != EventFormat::Groups {
        return Err(EventError::InvalidState);
    }
    let registrations = event.registrations.len();
    if group_count == 0 || group_count > registrations / 2 {
        return Err(EventError::InvalidGroupCount {
            groups: group_count,
            registrations,
        });
    }

    let mut ids: Vec<RegistrationId> = event.registrations.iter().map(|r| r.id).collect();
    ids.shuffle(&mut rand::thread_rng());

    let mut groups: Vec<Group> = (0..group_count).map(|i| Group::new(group_name(i))).collect();
    for (i, id) in ids.into_iter().enumerate() {
        groups[i % group_count].registrations.push(id);
    }

    let mut matches = Vec::new();
    for group in &groups {
        for (round, pairs) in round_robin_pairings(&group.registrations).into_iter().enumerate() {
            for (number, (a, b)) in pairs.into_iter().enumerate() {
                matches.push(
                    Match::new(Some(a), Some(b), round as u32 + 1, number as u32 + 1)
                        .in_group(group.id),
                );
            }
        }
    }

    log::info!(
        "Generated group stage for event {}: {} groups, {} matches",
        event.id,
        groups.len(),
        matches.len()
    );

    event.groups = groups;
    event.matches = matches;
    event.state = EventState::InProgress;
    Ok(())
}
