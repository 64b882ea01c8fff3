mod common;
use common::{mem_pool, mk_punch, seed_worker};

use punchlog::core::reconcile::{Decision, ReconcileLogic};
use punchlog::db::justifications::SqliteJustificationStore;
use punchlog::db::punches::SqlitePunchStore;
use punchlog::errors::AppError;
use punchlog::models::justification::{Justification, JustificationStatus, JustifyReason};
use punchlog::models::punch::{Origin, PunchKind, PunchStatus};
use punchlog::store::{JustificationStore, PunchStore};

fn seed_justification(
    store: &SqliteJustificationStore,
    id: &str,
    worker: &str,
    linked_punch_id: Option<&str>,
) -> Justification {
    let j = Justification::new(
        id.to_string(),
        worker,
        worker,
        None,
        linked_punch_id.map(str::to_string),
        JustifyReason::Forgot,
        "",
    );
    store.upsert(&j).expect("seed justification");
    j
}

#[test]
fn approval_propagates_to_linked_and_paired_punch() {
    let pool = mem_pool();
    seed_worker(&pool, "W1", "1042", "Ana Souza");
    let punches = SqlitePunchStore::new(&pool.conn);
    let justifications = SqliteJustificationStore::new(&pool.conn);

    let entry = mk_punch(
        "A",
        "W1",
        PunchKind::Entry,
        "2026-03-01 08:00",
        Origin::Manual,
        PunchStatus::Pending,
    );
    punches.upsert(&entry).unwrap();

    let mut exit = mk_punch(
        "B",
        "W1",
        PunchKind::Exit,
        "2026-03-01 17:00",
        Origin::Manual,
        PunchStatus::Pending,
    );
    exit.pair_ref = Some("A".to_string());
    punches.upsert(&exit).unwrap();

    seed_justification(&justifications, "J", "W1", Some("B"));

    let outcome =
        ReconcileLogic::decide(&justifications, &punches, "J", Decision::Approve, "mgr1", None)
            .unwrap();

    assert_eq!(outcome.punches_updated, 2);
    assert!(outcome.warnings.is_empty());

    let a = punches.get("A").unwrap().unwrap();
    let b = punches.get("B").unwrap().unwrap();
    let j = justifications.get("J").unwrap().unwrap();

    assert_eq!(a.status, PunchStatus::Closed);
    assert_eq!(b.status, PunchStatus::Closed);
    assert_eq!(a.approved_by.as_deref(), Some("mgr1"));
    assert_eq!(b.approved_by.as_deref(), Some("mgr1"));
    assert_eq!(j.status, JustificationStatus::Approved);
    assert_eq!(j.decided_by.as_deref(), Some("mgr1"));
}

#[test]
fn approval_reaches_reverse_referencing_punches() {
    let pool = mem_pool();
    seed_worker(&pool, "W1", "1042", "Ana Souza");
    let punches = SqlitePunchStore::new(&pool.conn);
    let justifications = SqliteJustificationStore::new(&pool.conn);

    let entry = mk_punch(
        "A",
        "W1",
        PunchKind::Entry,
        "2026-03-01 08:00",
        Origin::Manual,
        PunchStatus::Pending,
    );
    punches.upsert(&entry).unwrap();

    // C was created independently, after A, and points back at it.
    let mut c = mk_punch(
        "C",
        "W1",
        PunchKind::Exit,
        "2026-03-01 19:00",
        Origin::Manual,
        PunchStatus::Pending,
    );
    c.pair_ref = Some("A".to_string());
    punches.upsert(&c).unwrap();

    seed_justification(&justifications, "J", "W1", Some("A"));

    ReconcileLogic::decide(&justifications, &punches, "J", Decision::Approve, "mgr1", None)
        .unwrap();

    let c = punches.get("C").unwrap().unwrap();
    assert_eq!(c.status, PunchStatus::Closed);
    assert_eq!(c.approved_by.as_deref(), Some("mgr1"));
}

#[test]
fn deciding_twice_with_same_decision_is_idempotent() {
    let pool = mem_pool();
    seed_worker(&pool, "W1", "1042", "Ana Souza");
    let punches = SqlitePunchStore::new(&pool.conn);
    let justifications = SqliteJustificationStore::new(&pool.conn);

    let entry = mk_punch(
        "A",
        "W1",
        PunchKind::Entry,
        "2026-03-01 08:00",
        Origin::Manual,
        PunchStatus::Pending,
    );
    punches.upsert(&entry).unwrap();
    seed_justification(&justifications, "J", "W1", Some("A"));

    ReconcileLogic::decide(&justifications, &punches, "J", Decision::Approve, "mgr1", None)
        .unwrap();
    let first_a = punches.get("A").unwrap().unwrap();
    let first_j = justifications.get("J").unwrap().unwrap();

    ReconcileLogic::decide(&justifications, &punches, "J", Decision::Approve, "mgr1", None)
        .unwrap();
    let second_a = punches.get("A").unwrap().unwrap();
    let second_j = justifications.get("J").unwrap().unwrap();

    assert_eq!(first_a.status, second_a.status);
    assert_eq!(first_a.approved_by, second_a.approved_by);
    assert_eq!(first_j.status, second_j.status);
    assert_eq!(first_j.decided_by, second_j.decided_by);
}

#[test]
fn opposite_decision_overwrites_the_previous_one() {
    let pool = mem_pool();
    seed_worker(&pool, "W1", "1042", "Ana Souza");
    let punches = SqlitePunchStore::new(&pool.conn);
    let justifications = SqliteJustificationStore::new(&pool.conn);

    let entry = mk_punch(
        "A",
        "W1",
        PunchKind::Entry,
        "2026-03-01 08:00",
        Origin::Manual,
        PunchStatus::Pending,
    );
    punches.upsert(&entry).unwrap();
    seed_justification(&justifications, "J", "W1", Some("A"));

    ReconcileLogic::decide(&justifications, &punches, "J", Decision::Approve, "mgr1", None)
        .unwrap();
    ReconcileLogic::decide(
        &justifications,
        &punches,
        "J",
        Decision::Reject,
        "mgr2",
        Some("shift not recognized"),
    )
    .unwrap();

    let a = punches.get("A").unwrap().unwrap();
    let j = justifications.get("J").unwrap().unwrap();

    assert_eq!(a.status, PunchStatus::Rejected);
    assert_eq!(a.rejected_by.as_deref(), Some("mgr2"));
    assert!(a.approved_by.is_none());
    assert_eq!(j.status, JustificationStatus::Rejected);
    assert_eq!(j.rejection_reason.as_deref(), Some("shift not recognized"));
}

#[test]
fn missing_linked_punch_is_a_warning_not_an_error() {
    let pool = mem_pool();
    seed_worker(&pool, "W1", "1042", "Ana Souza");
    let punches = SqlitePunchStore::new(&pool.conn);
    let justifications = SqliteJustificationStore::new(&pool.conn);

    seed_justification(&justifications, "J", "W1", Some("vanished"));

    let outcome =
        ReconcileLogic::decide(&justifications, &punches, "J", Decision::Approve, "mgr1", None)
            .unwrap();

    assert_eq!(outcome.punches_updated, 0);
    assert_eq!(outcome.warnings.len(), 1);

    let j = justifications.get("J").unwrap().unwrap();
    assert_eq!(j.status, JustificationStatus::Approved);
}

#[test]
fn rejection_requires_a_reason() {
    let pool = mem_pool();
    let punches = SqlitePunchStore::new(&pool.conn);
    let justifications = SqliteJustificationStore::new(&pool.conn);
    seed_justification(&justifications, "J", "W1", None);

    let err =
        ReconcileLogic::decide(&justifications, &punches, "J", Decision::Reject, "mgr1", None)
            .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));

    // Nothing was applied
    let j = justifications.get("J").unwrap().unwrap();
    assert_eq!(j.status, JustificationStatus::Pending);
}

#[test]
fn unknown_justification_is_fatal() {
    let pool = mem_pool();
    let punches = SqlitePunchStore::new(&pool.conn);
    let justifications = SqliteJustificationStore::new(&pool.conn);

    let err = ReconcileLogic::decide(
        &justifications,
        &punches,
        "nope",
        Decision::Approve,
        "mgr1",
        None,
    )
    .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}
