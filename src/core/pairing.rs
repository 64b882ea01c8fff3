//! Shift derivation: match entry punches to exit punches per worker.
//!
//! The matching policy is a single left-to-right greedy pass: each entry, in
//! chronological order, claims the earliest not-yet-claimed exit that comes
//! strictly after it. This is NOT an optimal interval matching; a later
//! entry can take an exit a closer entry "deserved". The policy is frozen
//! for output compatibility with historical reports and must not change.

use std::collections::BTreeMap;

use crate::models::justification::Justification;
use crate::models::punch::{PunchKind, PunchRecord};
use crate::models::shift::Shift;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairOrder {
    /// Newest shift first (default listing).
    Descending,
    /// Oldest first (tabular audit views).
    Ascending,
}

/// Derive shifts from raw punches. Pure and deterministic: identical inputs
/// produce identical output, with ties broken by punch id.
///
/// BREAK_IN/BREAK_OUT punches are retained in the store but take no part in
/// pairing. Exits that no entry claims surface as entry-less shifts so a
/// missing entry is always visible to operators.
pub fn pair(
    punches: &[PunchRecord],
    justifications: &[Justification],
    order: PairOrder,
) -> Vec<Shift> {
    // Group per worker; BTreeMap keeps the worker scan order stable.
    let mut by_worker: BTreeMap<&str, Vec<&PunchRecord>> = BTreeMap::new();
    for p in punches {
        by_worker.entry(p.worker_id.as_str()).or_default().push(p);
    }

    let mut shifts: Vec<Shift> = Vec::new();
    for (_, worker_punches) in by_worker {
        shifts.extend(pair_worker(&worker_punches));
    }

    attach_justifications(&mut shifts, justifications);

    // Effective timestamp ordering; punch id breaks ties either way.
    shifts.sort_by(|a, b| {
        let key_a = (a.effective_timestamp(), a.sort_id().to_string());
        let key_b = (b.effective_timestamp(), b.sort_id().to_string());
        match order {
            PairOrder::Ascending => key_a.cmp(&key_b),
            PairOrder::Descending => key_b.cmp(&key_a),
        }
    });

    shifts
}

fn pair_worker(punches: &[&PunchRecord]) -> Vec<Shift> {
    let mut entries: Vec<&PunchRecord> = punches
        .iter()
        .copied()
        .filter(|p| p.kind == PunchKind::Entry)
        .collect();
    let mut exits: Vec<&PunchRecord> = punches
        .iter()
        .copied()
        .filter(|p| p.kind == PunchKind::Exit)
        .collect();

    entries.sort_by(|a, b| (a.timestamp, &a.id).cmp(&(b.timestamp, &b.id)));
    exits.sort_by(|a, b| (a.timestamp, &a.id).cmp(&(b.timestamp, &b.id)));

    let mut claimed = vec![false; exits.len()];
    let mut shifts = Vec::new();

    for entry in &entries {
        let mut matched: Option<usize> = None;
        for (i, exit) in exits.iter().enumerate() {
            if !claimed[i] && exit.timestamp > entry.timestamp {
                matched = Some(i);
                break;
            }
        }

        match matched {
            Some(i) => {
                claimed[i] = true;
                shifts.push(Shift::new(Some((*entry).clone()), Some(exits[i].clone())));
            }
            // Two entries with no exit in between both stay open; they are
            // never merged.
            None => shifts.push(Shift::new(Some((*entry).clone()), None)),
        }
    }

    // Orphan exits: no entry claimed them, still a visible shift.
    for (i, exit) in exits.iter().enumerate() {
        if !claimed[i] {
            shifts.push(Shift::new(None, Some((*exit).clone())));
        }
    }

    shifts
}

/// Link each shift to the request governing one of its punches, exit side
/// preferred. First match in (requested_at, id) order wins.
fn attach_justifications(shifts: &mut [Shift], justifications: &[Justification]) {
    if justifications.is_empty() {
        return;
    }

    let mut sorted: Vec<&Justification> = justifications.iter().collect();
    sorted.sort_by(|a, b| (&a.requested_at, &a.id).cmp(&(&b.requested_at, &b.id)));

    for shift in shifts.iter_mut() {
        let exit_id = shift.exit.as_ref().map(|p| p.id.as_str());
        let entry_id = shift.entry.as_ref().map(|p| p.id.as_str());

        shift.justification = sorted
            .iter()
            .find(|j| j.linked_punch_id.as_deref() == exit_id && exit_id.is_some())
            .or_else(|| {
                sorted
                    .iter()
                    .find(|j| j.linked_punch_id.as_deref() == entry_id && entry_id.is_some())
            })
            .map(|j| (*j).clone());
    }
}
