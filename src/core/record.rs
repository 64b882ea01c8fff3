//! Punch intake (kiosk or manual) and administrative deletion.

use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::punch::{Origin, PunchKind, PunchRecord, PunchStatus};
use crate::store::{PunchStore, WorkerDirectory};

/// High-level business logic for recording a punch.
pub struct RecordLogic;

impl RecordLogic {
    /// Store one clock event and run the pairing-on-write step.
    ///
    /// A biometric EXIT claims the worker's most recent still-open ENTRY
    /// before it: the exit gets `pair_ref` and both sides close. A manual
    /// punch enters PENDING and flips nothing; the reconciliation pass does
    /// that once a manager decides.
    ///
    /// Submitting the same event twice (same worker, kind and timestamp) is
    /// a no-op success. The same event with different location or origin is
    /// a conflict: the caller's intended end-state differs from what is
    /// already stored.
    #[allow(clippy::too_many_arguments)]
    pub fn apply(
        punches: &dyn PunchStore,
        workers: &dyn WorkerDirectory,
        worker_id: &str,
        kind: PunchKind,
        timestamp: NaiveDateTime,
        location_id: Option<String>,
        sector_id: Option<String>,
        origin: Origin,
    ) -> AppResult<PunchRecord> {
        let worker = workers
            .get_worker(worker_id)?
            .ok_or_else(|| AppError::NotFound(format!("worker {}", worker_id)))?;

        let existing = punches.list_by_worker(worker_id)?;

        // Duplicate submission check before any write.
        if let Some(dup) = existing
            .iter()
            .find(|p| p.kind == kind && p.timestamp == timestamp)
        {
            let identical = dup.location_id == location_id && dup.origin == origin;
            if identical {
                return Ok(dup.clone());
            }
            return Err(AppError::Conflict(format!(
                "punch for {} at {} already recorded with different details",
                worker_id,
                timestamp.format("%Y-%m-%d %H:%M")
            )));
        }

        let mut record = PunchRecord::new(
            Uuid::new_v4().to_string(),
            worker_id,
            &worker.name,
            timestamp,
            kind,
            origin,
        );
        record.location_id = location_id;
        record.sector_id = sector_id.or_else(|| worker.sector_id.clone());

        if kind == PunchKind::Exit {
            // Most recent open entry strictly before this exit.
            let open_entry = existing
                .iter()
                .filter(|p| {
                    p.kind == PunchKind::Entry
                        && p.status == PunchStatus::Open
                        && p.timestamp < timestamp
                })
                .max_by(|a, b| (a.timestamp, &a.id).cmp(&(b.timestamp, &b.id)));

            if let Some(entry) = open_entry {
                record.pair_ref = Some(entry.id.clone());

                if origin == Origin::Biometric {
                    record.status = PunchStatus::Closed;
                    let mut closed_entry = entry.clone();
                    closed_entry.status = PunchStatus::Closed;
                    punches.upsert(&closed_entry)?;
                }
            }
            // No open entry: the exit stays unpaired and surfaces as an
            // orphan in the shift listing.
        }

        punches.upsert(&record)?;
        Ok(record)
    }
}

/// Administrative delete. The pair left behind is repaired, never silently
/// broken: removing an EXIT reopens the ENTRY it pointed at, removing an
/// ENTRY detaches every punch that pointed at it.
pub struct DeleteLogic;

impl DeleteLogic {
    pub fn apply(punches: &dyn PunchStore, id: &str) -> AppResult<PunchRecord> {
        let record = punches
            .get(id)?
            .ok_or_else(|| AppError::NotFound(format!("punch {}", id)))?;

        match record.kind {
            PunchKind::Exit => {
                if let Some(entry_id) = &record.pair_ref {
                    if let Some(mut entry) = punches.get(entry_id)? {
                        if entry.status == PunchStatus::Closed {
                            entry.status = PunchStatus::Open;
                            entry.approved_by = None;
                            entry.rejected_by = None;
                            entry.rejection_reason = None;
                            punches.upsert(&entry)?;
                        }
                    }
                }
            }
            PunchKind::Entry => {
                for mut referrer in punches
                    .list_all(None)?
                    .into_iter()
                    .filter(|p| p.pair_ref.as_deref() == Some(id))
                {
                    referrer.pair_ref = None;
                    punches.upsert(&referrer)?;
                }
            }
            _ => {}
        }

        punches.delete(id)?;
        Ok(record)
    }
}
