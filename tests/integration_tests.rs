mod common;
use common::{init_db_with_data, pl, setup_test_db};

use predicates::prelude::*;

#[test]
fn full_biometric_day_reads_closed() {
    let db_path = setup_test_db("biometric_day");
    init_db_with_data(&db_path);

    pl().args([
        "--db", &db_path, "punch", "--worker", "W1", "--kind", "entry", "--at",
        "2026-03-01 07:00", "--location", "L1",
    ])
    .assert()
    .success();

    pl().args([
        "--db", &db_path, "punch", "--worker", "W1", "--kind", "exit", "--at",
        "2026-03-01 19:00", "--location", "L1",
    ])
    .assert()
    .success();

    pl().args(["--db", &db_path, "shifts", "--events"])
        .assert()
        .success()
        .stdout(predicate::str::contains("entry"))
        .stdout(predicate::str::contains("exit"));

    pl().args(["--db", &db_path, "shifts", "--worker", "W1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ana Souza"))
        .stdout(predicate::str::contains("Closed"))
        .stdout(predicate::str::contains("Hospital Santa Lucia"));
}

#[test]
fn justification_flow_end_to_end() {
    let db_path = setup_test_db("justify_flow");
    init_db_with_data(&db_path);

    pl().args([
        "--db", &db_path, "justify", "--worker", "W1", "--date", "2026-03-02", "--in",
        "07:00", "--out", "19:00", "--reason", "forgot",
    ])
    .assert()
    .success();

    // Shift derived from the two pending punches reads Pending
    pl().args(["--db", &db_path, "shifts", "--worker", "W1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pending"));

    // Pull the request id from the JSON listing
    let output = pl()
        .args(["--db", &db_path, "requests", "--status", "pending", "--json"])
        .output()
        .expect("list requests");
    assert!(output.status.success());

    let requests: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("parse requests JSON");
    let id = requests[0]["id"].as_str().expect("request id").to_string();

    pl().args([
        "--db", &db_path, "decide", &id, "--approve", "--actor", "mgr1",
    ])
    .assert()
    .success();

    pl().args(["--db", &db_path, "requests", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("approved"))
        .stdout(predicate::str::contains("mgr1"));

    // Both punches closed by the decision: the shift now reads Closed
    pl().args(["--db", &db_path, "shifts", "--worker", "W1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Closed"));
}

#[test]
fn rejection_without_reason_fails() {
    let db_path = setup_test_db("reject_no_reason");
    init_db_with_data(&db_path);

    pl().args([
        "--db", &db_path, "justify", "--worker", "W1", "--date", "2026-03-02", "--out",
        "19:00", "--reason", "device",
    ])
    .assert()
    .success();

    let output = pl()
        .args(["--db", &db_path, "requests", "--json"])
        .output()
        .expect("list requests");
    let requests: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("parse requests JSON");
    let id = requests[0]["id"].as_str().expect("request id").to_string();

    pl().args([
        "--db", &db_path, "decide", &id, "--reject", "--actor", "mgr1",
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains("reason"));
}

#[test]
fn sweep_on_a_clean_database_finds_nothing() {
    let db_path = setup_test_db("clean_sweep");
    init_db_with_data(&db_path);

    pl().args(["--db", &db_path, "sweep"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to repair."));
}

#[test]
fn invalid_punch_kind_is_rejected() {
    let db_path = setup_test_db("bad_kind");
    init_db_with_data(&db_path);

    pl().args([
        "--db", &db_path, "punch", "--worker", "W1", "--kind", "lunch", "--at",
        "2026-03-01 12:00",
    ])
    .assert()
    .failure();
}

#[test]
fn unknown_worker_punch_fails_cleanly() {
    let db_path = setup_test_db("ghost_punch");
    init_db_with_data(&db_path);

    pl().args([
        "--db", &db_path, "punch", "--worker", "ghost", "--kind", "entry", "--at",
        "2026-03-01 07:00",
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Not found"));
}

#[test]
fn orphan_exit_is_visible_in_the_shift_listing() {
    let db_path = setup_test_db("orphan_exit");
    init_db_with_data(&db_path);

    pl().args([
        "--db", &db_path, "punch", "--worker", "W1", "--kind", "exit", "--at",
        "2026-03-01 12:00",
    ])
    .assert()
    .success();

    pl().args(["--db", &db_path, "shifts", "--worker", "W1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--:--"))
        .stdout(predicate::str::contains("12:00"));
}

#[test]
fn operation_log_records_the_decisions() {
    let db_path = setup_test_db("op_log");
    init_db_with_data(&db_path);

    pl().args([
        "--db", &db_path, "punch", "--worker", "W1", "--kind", "entry", "--at",
        "2026-03-01 07:00",
    ])
    .assert()
    .success();

    pl().args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(predicate::str::contains("punch_recorded"));
}
