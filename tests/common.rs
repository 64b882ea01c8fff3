#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDateTime;
use std::env;
use std::fs;
use std::path::PathBuf;

use punchlog::db::initialize::init_db;
use punchlog::db::pool::DbPool;
use punchlog::models::directory::Worker;
use punchlog::models::punch::{Origin, PunchKind, PunchRecord, PunchStatus};
use punchlog::store::WorkerDirectory;

pub fn pl() -> Command {
    cargo_bin_cmd!("punchlog")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_punchlog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// In-memory database with the full schema, for library-level tests
pub fn mem_pool() -> DbPool {
    let pool = DbPool::in_memory().expect("open in-memory db");
    init_db(&pool.conn).expect("init db");
    pool
}

pub fn naive(ts: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M").expect("parse timestamp")
}

/// Build a punch record with an explicit status, bypassing the intake flow
pub fn mk_punch(
    id: &str,
    worker: &str,
    kind: PunchKind,
    ts: &str,
    origin: Origin,
    status: PunchStatus,
) -> PunchRecord {
    let mut p = PunchRecord::new(id.to_string(), worker, worker, naive(ts), kind, origin);
    p.status = status;
    p
}

pub fn seed_worker(pool: &DbPool, id: &str, badge: &str, name: &str) {
    let directory = punchlog::db::directory::SqliteDirectory::new(&pool.conn);
    directory
        .upsert_worker(&Worker::new(id.to_string(), badge, name, None))
        .expect("seed worker");
}

/// Initialize a file DB and register a default worker and hospital via the CLI
pub fn init_db_with_data(db_path: &str) {
    pl().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    pl().args([
        "--db", db_path, "register", "worker", "--id", "W1", "--badge", "1042", "--name",
        "Ana Souza",
    ])
    .assert()
    .success();

    pl().args([
        "--db", db_path, "register", "location", "--id", "L1", "--slug", "hsl", "--name",
        "Hospital Santa Lucia",
    ])
    .assert()
    .success();
}
