mod common;
use common::mk_punch;

use punchlog::core::status::{StatusLabel, resolve_status};
use punchlog::models::punch::{Origin, PunchKind, PunchStatus};
use punchlog::models::shift::Shift;

#[test]
fn rejection_beats_a_closed_counterpart() {
    let mut entry = mk_punch(
        "e1",
        "W1",
        PunchKind::Entry,
        "2026-03-01 08:00",
        Origin::Biometric,
        PunchStatus::Closed,
    );
    entry.approved_by = Some("mgr1".to_string());

    let mut exit = mk_punch(
        "x1",
        "W1",
        PunchKind::Exit,
        "2026-03-01 17:00",
        Origin::Manual,
        PunchStatus::Rejected,
    );
    exit.rejected_by = Some("mgr2".to_string());
    exit.rejection_reason = Some("no supporting document".to_string());

    let resolved = resolve_status(&Shift::new(Some(entry), Some(exit)));

    assert_eq!(resolved.label, StatusLabel::Rejected);
    let detail = resolved.detail.unwrap();
    assert!(detail.contains("mgr2"));
    assert!(detail.contains("no supporting document"));
}

#[test]
fn rejection_detail_falls_back_to_entry_side() {
    let mut entry = mk_punch(
        "e1",
        "W1",
        PunchKind::Entry,
        "2026-03-01 08:00",
        Origin::Biometric,
        PunchStatus::Rejected,
    );
    entry.rejected_by = Some("mgr1".to_string());
    entry.rejection_reason = Some("wrong sector".to_string());

    let exit = mk_punch(
        "x1",
        "W1",
        PunchKind::Exit,
        "2026-03-01 17:00",
        Origin::Biometric,
        PunchStatus::Closed,
    );

    let resolved = resolve_status(&Shift::new(Some(entry), Some(exit)));

    assert_eq!(resolved.label, StatusLabel::Rejected);
    assert!(resolved.detail.unwrap().contains("mgr1"));
}

#[test]
fn unapproved_manual_punch_is_pending_even_when_marked_closed() {
    // A manual exit that drifted to CLOSED without any approver on record
    // must still read as provisional.
    let entry = mk_punch(
        "e1",
        "W1",
        PunchKind::Entry,
        "2026-03-01 08:00",
        Origin::Biometric,
        PunchStatus::Closed,
    );
    let exit = mk_punch(
        "x1",
        "W1",
        PunchKind::Exit,
        "2026-03-01 17:00",
        Origin::Manual,
        PunchStatus::Closed,
    );

    let resolved = resolve_status(&Shift::new(Some(entry), Some(exit)));

    assert_eq!(resolved.label, StatusLabel::Pending);
}

#[test]
fn approved_manual_pair_is_closed_with_approver_detail() {
    let mut entry = mk_punch(
        "e1",
        "W1",
        PunchKind::Entry,
        "2026-03-01 08:00",
        Origin::Manual,
        PunchStatus::Closed,
    );
    entry.approved_by = Some("mgr1".to_string());

    let mut exit = mk_punch(
        "x1",
        "W1",
        PunchKind::Exit,
        "2026-03-01 17:00",
        Origin::Manual,
        PunchStatus::Closed,
    );
    exit.approved_by = Some("mgr2".to_string());

    let resolved = resolve_status(&Shift::new(Some(entry), Some(exit)));

    assert_eq!(resolved.label, StatusLabel::Closed);
    // Exit side approver wins the detail
    assert_eq!(resolved.detail.as_deref(), Some("mgr2"));
}

#[test]
fn pending_status_on_one_side_is_pending() {
    let entry = mk_punch(
        "e1",
        "W1",
        PunchKind::Entry,
        "2026-03-01 08:00",
        Origin::Biometric,
        PunchStatus::Pending,
    );
    let exit = mk_punch(
        "x1",
        "W1",
        PunchKind::Exit,
        "2026-03-01 17:00",
        Origin::Biometric,
        PunchStatus::Closed,
    );

    let resolved = resolve_status(&Shift::new(Some(entry), Some(exit)));

    assert_eq!(resolved.label, StatusLabel::Pending);
}

#[test]
fn lone_open_entry_is_open() {
    let entry = mk_punch(
        "e1",
        "W1",
        PunchKind::Entry,
        "2026-03-01 08:00",
        Origin::Biometric,
        PunchStatus::Open,
    );

    let resolved = resolve_status(&Shift::new(Some(entry), None));

    assert_eq!(resolved.label, StatusLabel::Open);
    assert!(resolved.detail.is_none());
}

#[test]
fn orphan_open_exit_is_open_not_closed() {
    let exit = mk_punch(
        "x1",
        "W1",
        PunchKind::Exit,
        "2026-03-01 12:00",
        Origin::Biometric,
        PunchStatus::Open,
    );

    let resolved = resolve_status(&Shift::new(None, Some(exit)));

    assert_eq!(resolved.label, StatusLabel::Open);
}

#[test]
fn closed_biometric_pair_reads_closed_without_detail() {
    let entry = mk_punch(
        "e1",
        "W1",
        PunchKind::Entry,
        "2026-03-01 08:00",
        Origin::Biometric,
        PunchStatus::Closed,
    );
    let exit = mk_punch(
        "x1",
        "W1",
        PunchKind::Exit,
        "2026-03-01 17:00",
        Origin::Biometric,
        PunchStatus::Closed,
    );

    let resolved = resolve_status(&Shift::new(Some(entry), Some(exit)));

    assert_eq!(resolved.label, StatusLabel::Closed);
    assert!(resolved.detail.is_none());
}
