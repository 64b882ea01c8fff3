use crate::ui::messages::{success, warning};
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Create every attendance table with the modern schema.
///
/// Status columns carry NO CHECK constraint on purpose: rows written by
/// older versions hold legacy status strings, and the consistency sweep
/// must still be able to load and rewrite them.
fn create_attendance_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS punches (
            id               TEXT PRIMARY KEY,
            worker_id        TEXT NOT NULL,
            worker_name      TEXT NOT NULL DEFAULT '',
            timestamp        TEXT NOT NULL,
            kind             TEXT NOT NULL CHECK(kind IN ('entry','break_out','break_in','exit')),
            location_id      TEXT,
            sector_id        TEXT,
            origin           TEXT NOT NULL DEFAULT 'biometric' CHECK(origin IN ('biometric','manual')),
            status           TEXT NOT NULL DEFAULT 'open',
            approved_by      TEXT,
            rejected_by      TEXT,
            rejection_reason TEXT,
            pair_ref         TEXT,
            created_at       TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS justifications (
            id               TEXT PRIMARY KEY,
            worker_id        TEXT NOT NULL,
            worker_name      TEXT NOT NULL DEFAULT '',
            sector_id        TEXT,
            linked_punch_id  TEXT,
            reason           TEXT NOT NULL DEFAULT 'other',
            description      TEXT NOT NULL DEFAULT '',
            status           TEXT NOT NULL DEFAULT 'pending',
            requested_at     TEXT NOT NULL,
            decided_at       TEXT,
            decided_by       TEXT,
            rejection_reason TEXT
        );

        CREATE TABLE IF NOT EXISTS workers (
            id         TEXT PRIMARY KEY,
            badge      TEXT NOT NULL DEFAULT '',
            name       TEXT NOT NULL,
            sector_id  TEXT,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS locations (
            id         TEXT PRIMARY KEY,
            slug       TEXT NOT NULL,
            name       TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS sectors (
            id          TEXT PRIMARY KEY,
            location_id TEXT,
            name        TEXT NOT NULL,
            created_at  TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn ensure_indexes(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE INDEX IF NOT EXISTS idx_punches_worker_ts ON punches(worker_id, timestamp);
        CREATE INDEX IF NOT EXISTS idx_punches_pair_ref ON punches(pair_ref);
        CREATE INDEX IF NOT EXISTS idx_justifications_status ON justifications(status);
        CREATE INDEX IF NOT EXISTS idx_justifications_worker ON justifications(worker_id);
        "#,
    )?;
    Ok(())
}

/// Deployments older than 0.3 named the justifications table `requests`
/// and had no `worker_name` column. Rename and backfill, once.
fn migrate_rename_requests_table(conn: &Connection) -> Result<()> {
    let version = "20250410_0003_rename_requests_to_justifications";

    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    if chk.query_row([version], |_| Ok(())).optional()?.is_some() {
        return Ok(());
    }

    if table_exists(conn, "requests")? && !table_exists(conn, "justifications")? {
        warning("Legacy 'requests' table detected, renaming to 'justifications'...");
        conn.execute_batch(
            r#"
            BEGIN;
            ALTER TABLE requests RENAME TO justifications;
            ALTER TABLE justifications ADD COLUMN worker_name TEXT NOT NULL DEFAULT '';
            COMMIT;
            "#,
        )?;
        success("Renamed legacy 'requests' table.");
    }

    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, 'Renamed requests to justifications')",
        [version],
    )?;

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table (migration bookkeeping lives there)
    ensure_log_table(conn)?;

    // 2) Legacy renames must run before the CREATE IF NOT EXISTS pass,
    //    otherwise an empty justifications table would shadow the old data
    migrate_rename_requests_table(conn)?;

    // 3) Modern schema + indexes
    create_attendance_tables(conn)?;
    ensure_indexes(conn)?;

    Ok(())
}
