use chrono::NaiveDateTime;
use rusqlite::{Connection, Result, Row, params};

use crate::errors::{AppError, AppResult};
use crate::models::legacy::LEGACY_PUNCH_STATUSES;
use crate::models::punch::{Origin, PunchKind, PunchRecord, PunchStatus, TIMESTAMP_FMT};
use crate::store::{PunchFilter, PunchStore};

/// SQLite-backed punch store.
pub struct SqlitePunchStore<'a> {
    conn: &'a Connection,
}

impl<'a> SqlitePunchStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

pub fn map_row(row: &Row) -> Result<PunchRecord> {
    let ts_str: String = row.get("timestamp")?;
    let timestamp = NaiveDateTime::parse_from_str(&ts_str, TIMESTAMP_FMT).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidTimestamp(ts_str.clone())),
        )
    })?;

    let kind_str: String = row.get("kind")?;
    let kind = PunchKind::from_db_str(&kind_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidKind(kind_str.clone())),
        )
    })?;

    let origin_str: String = row.get("origin")?;
    let origin = Origin::from_db_str(&origin_str).unwrap_or(Origin::Biometric);

    // Unmapped historical values surface as PENDING so the row stays
    // visible to operators instead of crashing a listing.
    let status_str: String = row.get("status")?;
    let status = PunchStatus::from_db_str(&status_str).unwrap_or(PunchStatus::Pending);

    Ok(PunchRecord {
        id: row.get("id")?,
        worker_id: row.get("worker_id")?,
        worker_name: row.get("worker_name")?,
        timestamp,
        kind,
        location_id: row.get("location_id")?,
        sector_id: row.get("sector_id")?,
        origin,
        status,
        approved_by: row.get("approved_by")?,
        rejected_by: row.get("rejected_by")?,
        rejection_reason: row.get("rejection_reason")?,
        pair_ref: row.get("pair_ref")?,
        created_at: row.get("created_at")?,
    })
}

/// pair_ref is a one-way edge: EXIT → ENTRY, nothing else. Enforced on
/// every write so the pairing graph stays acyclic.
fn validate_pair_ref(store: &SqlitePunchStore<'_>, record: &PunchRecord) -> AppResult<()> {
    let target_id = match &record.pair_ref {
        Some(id) => id,
        None => return Ok(()),
    };

    if !record.kind.is_exit() {
        return Err(AppError::Validation(format!(
            "pair_ref is only allowed on an exit punch (punch {} is {})",
            record.id,
            record.kind.to_db_str()
        )));
    }

    match store.get(target_id)? {
        Some(target) if target.kind.is_entry() => Ok(()),
        Some(target) => Err(AppError::Validation(format!(
            "pair_ref of punch {} must point at an entry, found {}",
            record.id,
            target.kind.to_db_str()
        ))),
        None => Err(AppError::Validation(format!(
            "pair_ref of punch {} points at missing punch {}",
            record.id, target_id
        ))),
    }
}

impl PunchStore for SqlitePunchStore<'_> {
    fn get(&self, id: &str) -> AppResult<Option<PunchRecord>> {
        let mut stmt = self.conn.prepare("SELECT * FROM punches WHERE id = ?1")?;
        let mut rows = stmt.query_map([id], map_row)?;
        match rows.next() {
            Some(r) => Ok(Some(r?)),
            None => Ok(None),
        }
    }

    fn list_by_worker(&self, worker_id: &str) -> AppResult<Vec<PunchRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT * FROM punches
             WHERE worker_id = ?1
             ORDER BY timestamp ASC, id ASC",
        )?;
        let rows = stmt.query_map([worker_id], map_row)?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    fn list_all(&self, filter: Option<&PunchFilter>) -> AppResult<Vec<PunchRecord>> {
        let mut sql = String::from("SELECT * FROM punches WHERE 1=1");
        let mut args: Vec<String> = Vec::new();

        if let Some(f) = filter {
            if let Some(w) = &f.worker_id {
                sql.push_str(&format!(" AND worker_id = ?{}", args.len() + 1));
                args.push(w.clone());
            }
            if let Some(l) = &f.location_id {
                sql.push_str(&format!(" AND location_id = ?{}", args.len() + 1));
                args.push(l.clone());
            }
            if let Some(from) = &f.from {
                sql.push_str(&format!(" AND timestamp >= ?{}", args.len() + 1));
                args.push(from.format(TIMESTAMP_FMT).to_string());
            }
            if let Some(to) = &f.to {
                sql.push_str(&format!(" AND timestamp <= ?{}", args.len() + 1));
                args.push(to.format(TIMESTAMP_FMT).to_string());
            }
        }

        sql.push_str(" ORDER BY timestamp ASC, id ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let params: Vec<&dyn rusqlite::ToSql> =
            args.iter().map(|s| s as &dyn rusqlite::ToSql).collect();
        let rows = stmt.query_map(rusqlite::params_from_iter(params), map_row)?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    fn upsert(&self, record: &PunchRecord) -> AppResult<()> {
        validate_pair_ref(self, record)?;

        self.conn.execute(
            "INSERT OR REPLACE INTO punches
                 (id, worker_id, worker_name, timestamp, kind, location_id, sector_id,
                  origin, status, approved_by, rejected_by, rejection_reason, pair_ref, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            params![
                record.id,
                record.worker_id,
                record.worker_name,
                record.timestamp_str(),
                record.kind.to_db_str(),
                record.location_id,
                record.sector_id,
                record.origin.to_db_str(),
                record.status.to_db_str(),
                record.approved_by,
                record.rejected_by,
                record.rejection_reason,
                record.pair_ref,
                record.created_at,
            ],
        )?;
        Ok(())
    }

    fn delete(&self, id: &str) -> AppResult<()> {
        self.conn
            .execute("DELETE FROM punches WHERE id = ?1", [id])?;
        Ok(())
    }

    fn normalize_legacy_statuses(&self) -> AppResult<usize> {
        let mut affected = 0;
        for &(old, new) in LEGACY_PUNCH_STATUSES {
            affected += self.conn.execute(
                "UPDATE punches SET status = ?2 WHERE status = ?1",
                params![old, new],
            )?;
        }
        Ok(affected)
    }
}
