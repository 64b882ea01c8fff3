use rusqlite::{Connection, Result, Row, params};

use crate::errors::AppResult;
use crate::models::justification::{Justification, JustificationStatus, JustifyReason};
use crate::models::legacy;
use crate::models::legacy::LEGACY_JUSTIFICATION_STATUSES;
use crate::store::JustificationStore;

/// SQLite-backed justification store.
///
/// Reads perform legacy read-repair: a row holding a deprecated status
/// string is returned normalized AND rewritten in place, so the repair
/// fires once per row rather than on every listing.
pub struct SqliteJustificationStore<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteJustificationStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn persist_repairs(&self, mapped: Vec<(Justification, String)>) -> AppResult<Vec<Justification>> {
        let mut out = Vec::with_capacity(mapped.len());
        for (rec, raw_status) in mapped {
            if legacy::justification_status_is_legacy(&raw_status) {
                self.conn.execute(
                    "UPDATE justifications SET status = ?1 WHERE id = ?2",
                    params![rec.status.to_db_str(), rec.id],
                )?;
            }
            out.push(rec);
        }
        Ok(out)
    }

    fn query(&self, sql: &str, args: &[&str]) -> AppResult<Vec<Justification>> {
        let mut stmt = self.conn.prepare(sql)?;
        let params: Vec<&dyn rusqlite::ToSql> =
            args.iter().map(|s| s as &dyn rusqlite::ToSql).collect();
        let rows = stmt.query_map(rusqlite::params_from_iter(params), map_row)?;

        let mut mapped = Vec::new();
        for r in rows {
            mapped.push(r?);
        }
        drop(stmt);
        self.persist_repairs(mapped)
    }
}

/// Map a row to (record, raw status string). The raw status is kept so the
/// caller can tell whether a read-repair is due.
pub fn map_row(row: &Row) -> Result<(Justification, String)> {
    let raw_status: String = row.get("status")?;
    let status = JustificationStatus::from_db_str(&raw_status);

    let reason_str: String = row.get("reason")?;
    let reason = JustifyReason::from_db_str(&reason_str).unwrap_or(JustifyReason::Other);

    let rec = Justification {
        id: row.get("id")?,
        worker_id: row.get("worker_id")?,
        worker_name: row.get("worker_name")?,
        sector_id: row.get("sector_id")?,
        linked_punch_id: row.get("linked_punch_id")?,
        reason,
        description: row.get("description")?,
        status,
        requested_at: row.get("requested_at")?,
        decided_at: row.get("decided_at")?,
        decided_by: row.get("decided_by")?,
        rejection_reason: row.get("rejection_reason")?,
    };

    Ok((rec, raw_status))
}

impl JustificationStore for SqliteJustificationStore<'_> {
    fn get(&self, id: &str) -> AppResult<Option<Justification>> {
        let mut found = self.query("SELECT * FROM justifications WHERE id = ?1", &[id])?;
        Ok(found.pop())
    }

    fn list_by_status(&self, status: JustificationStatus) -> AppResult<Vec<Justification>> {
        // Legacy rows read back as their normalized status, so the scan
        // must include the deprecated spellings of the requested one.
        let mut wanted: Vec<&str> = vec![status.to_db_str()];
        for &(old, new) in LEGACY_JUSTIFICATION_STATUSES {
            if new == status.to_db_str() {
                wanted.push(old);
            }
        }

        let placeholders = (1..=wanted.len())
            .map(|i| format!("?{}", i))
            .collect::<Vec<_>>()
            .join(",");
        let sql = format!(
            "SELECT * FROM justifications WHERE status IN ({}) ORDER BY requested_at ASC, id ASC",
            placeholders
        );
        self.query(&sql, &wanted)
    }

    fn list_by_worker(&self, worker_id: &str) -> AppResult<Vec<Justification>> {
        self.query(
            "SELECT * FROM justifications WHERE worker_id = ?1 ORDER BY requested_at ASC, id ASC",
            &[worker_id],
        )
    }

    fn list_all(&self) -> AppResult<Vec<Justification>> {
        self.query(
            "SELECT * FROM justifications ORDER BY requested_at ASC, id ASC",
            &[],
        )
    }

    fn upsert(&self, record: &Justification) -> AppResult<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO justifications
                 (id, worker_id, worker_name, sector_id, linked_punch_id, reason,
                  description, status, requested_at, decided_at, decided_by, rejection_reason)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                record.id,
                record.worker_id,
                record.worker_name,
                record.sector_id,
                record.linked_punch_id,
                record.reason.to_db_str(),
                record.description,
                record.status.to_db_str(),
                record.requested_at,
                record.decided_at,
                record.decided_by,
                record.rejection_reason,
            ],
        )?;
        Ok(())
    }

    fn normalize_legacy_statuses(&self) -> AppResult<usize> {
        let mut affected = 0;
        for &(old, new) in LEGACY_JUSTIFICATION_STATUSES {
            affected += self.conn.execute(
                "UPDATE justifications SET status = ?2 WHERE status = ?1",
                params![old, new],
            )?;
        }
        Ok(affected)
    }
}
