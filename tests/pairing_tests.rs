mod common;
use common::{mk_punch, naive};

use punchlog::core::pairing::{PairOrder, pair};
use punchlog::models::punch::{Origin, PunchKind, PunchStatus};

fn open_biometric(id: &str, worker: &str, kind: PunchKind, ts: &str) -> punchlog::models::punch::PunchRecord {
    mk_punch(id, worker, kind, ts, Origin::Biometric, PunchStatus::Open)
}

#[test]
fn pairing_is_deterministic() {
    let punches = vec![
        open_biometric("p2", "W1", PunchKind::Exit, "2026-03-01 17:00"),
        open_biometric("p1", "W1", PunchKind::Entry, "2026-03-01 08:00"),
        open_biometric("p4", "W1", PunchKind::Exit, "2026-03-02 17:00"),
        open_biometric("p3", "W1", PunchKind::Entry, "2026-03-02 08:00"),
    ];

    let first = pair(&punches, &[], PairOrder::Descending);
    let second = pair(&punches, &[], PairOrder::Descending);

    let render = |shifts: &[punchlog::models::shift::Shift]| {
        shifts
            .iter()
            .map(|s| {
                format!(
                    "{:?}-{:?}",
                    s.entry.as_ref().map(|p| &p.id),
                    s.exit.as_ref().map(|p| &p.id)
                )
            })
            .collect::<Vec<_>>()
    };

    assert_eq!(render(&first), render(&second));
}

#[test]
fn no_punch_is_lost() {
    let punches = vec![
        open_biometric("a", "W1", PunchKind::Entry, "2026-03-01 08:00"),
        open_biometric("b", "W1", PunchKind::Entry, "2026-03-01 09:00"),
        open_biometric("c", "W1", PunchKind::Exit, "2026-03-01 12:00"),
        open_biometric("d", "W1", PunchKind::Exit, "2026-03-02 02:00"),
        open_biometric("e", "W1", PunchKind::Exit, "2026-03-02 03:00"),
    ];

    let shifts = pair(&punches, &[], PairOrder::Ascending);
    let referenced: usize = shifts.iter().map(|s| s.punch_count()).sum();

    assert_eq!(referenced, punches.len());
}

#[test]
fn greedy_takes_earliest_available_exit() {
    // ENTRY@09:00, ENTRY@09:30, EXIT@10:00, EXIT@18:00:
    // the first entry claims 10:00, the second gets 18:00. The exit
    // "closest to each entry" policy would pick differently; that is the
    // point of this pin.
    let punches = vec![
        open_biometric("e1", "W1", PunchKind::Entry, "2026-03-01 09:00"),
        open_biometric("e2", "W1", PunchKind::Entry, "2026-03-01 09:30"),
        open_biometric("x1", "W1", PunchKind::Exit, "2026-03-01 10:00"),
        open_biometric("x2", "W1", PunchKind::Exit, "2026-03-01 18:00"),
    ];

    let shifts = pair(&punches, &[], PairOrder::Ascending);

    assert_eq!(shifts.len(), 2);
    assert_eq!(shifts[0].entry.as_ref().unwrap().id, "e1");
    assert_eq!(shifts[0].exit.as_ref().unwrap().id, "x1");
    assert_eq!(shifts[1].entry.as_ref().unwrap().id, "e2");
    assert_eq!(shifts[1].exit.as_ref().unwrap().id, "x2");
}

#[test]
fn orphan_exit_surfaces_as_entryless_shift() {
    let punches = vec![open_biometric("x1", "W1", PunchKind::Exit, "2026-03-01 12:00")];

    let shifts = pair(&punches, &[], PairOrder::Descending);

    assert_eq!(shifts.len(), 1);
    assert!(shifts[0].entry.is_none());
    assert_eq!(
        shifts[0].exit.as_ref().unwrap().timestamp,
        naive("2026-03-01 12:00")
    );
}

#[test]
fn consecutive_entries_stay_separate_open_shifts() {
    let punches = vec![
        open_biometric("e1", "W1", PunchKind::Entry, "2026-03-01 08:00"),
        open_biometric("e2", "W1", PunchKind::Entry, "2026-03-01 09:00"),
    ];

    let shifts = pair(&punches, &[], PairOrder::Ascending);

    assert_eq!(shifts.len(), 2);
    assert!(shifts.iter().all(|s| s.exit.is_none()));
}

#[test]
fn no_punches_yield_no_shifts() {
    let shifts = pair(&[], &[], PairOrder::Descending);
    assert!(shifts.is_empty());
}

#[test]
fn break_punches_take_no_part_in_pairing() {
    let punches = vec![
        open_biometric("e1", "W1", PunchKind::Entry, "2026-03-01 08:00"),
        open_biometric("b1", "W1", PunchKind::BreakOut, "2026-03-01 12:00"),
        open_biometric("b2", "W1", PunchKind::BreakIn, "2026-03-01 13:00"),
        open_biometric("x1", "W1", PunchKind::Exit, "2026-03-01 17:00"),
    ];

    let shifts = pair(&punches, &[], PairOrder::Ascending);

    assert_eq!(shifts.len(), 1);
    assert_eq!(shifts[0].entry.as_ref().unwrap().id, "e1");
    assert_eq!(shifts[0].exit.as_ref().unwrap().id, "x1");
}

#[test]
fn workers_never_share_a_shift() {
    let punches = vec![
        open_biometric("e1", "W1", PunchKind::Entry, "2026-03-01 08:00"),
        open_biometric("x1", "W2", PunchKind::Exit, "2026-03-01 17:00"),
    ];

    let shifts = pair(&punches, &[], PairOrder::Ascending);

    assert_eq!(shifts.len(), 2);
    for s in &shifts {
        assert!(s.entry.is_none() || s.exit.is_none());
    }
}

#[test]
fn default_order_is_newest_first() {
    let punches = vec![
        open_biometric("e1", "W1", PunchKind::Entry, "2026-03-01 08:00"),
        open_biometric("e2", "W1", PunchKind::Entry, "2026-03-05 08:00"),
    ];

    let desc = pair(&punches, &[], PairOrder::Descending);
    assert_eq!(desc[0].entry.as_ref().unwrap().id, "e2");

    let asc = pair(&punches, &[], PairOrder::Ascending);
    assert_eq!(asc[0].entry.as_ref().unwrap().id, "e1");
}
