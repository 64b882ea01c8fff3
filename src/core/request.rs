//! Justification flow: a worker reports a missing or partial shift, which
//! creates one or two provisional punches plus the request governing them.

use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::justification::{Justification, JustifyReason};
use crate::models::punch::{Origin, PunchKind, PunchRecord, PunchStatus};
use crate::store::{JustificationStore, PunchStore, WorkerDirectory};

pub struct RequestArgs {
    pub worker_id: String,
    pub date: NaiveDate,
    pub entry_time: Option<NaiveTime>,
    pub exit_time: Option<NaiveTime>,
    pub location_id: Option<String>,
    pub sector_id: Option<String>,
    pub reason: JustifyReason,
    pub description: String,
}

#[derive(Debug)]
pub struct RequestOutcome {
    pub justification: Justification,
    pub created_punches: Vec<PunchRecord>,
}

pub struct RequestLogic;

impl RequestLogic {
    /// Validate, create the pending punches, then the justification linked
    /// to the exit when one exists (else the entry). All validation happens
    /// before the first write; nothing is partially applied.
    pub fn apply(
        punches: &dyn PunchStore,
        justifications: &dyn JustificationStore,
        workers: &dyn WorkerDirectory,
        args: RequestArgs,
    ) -> AppResult<RequestOutcome> {
        if args.entry_time.is_none() && args.exit_time.is_none() {
            return Err(AppError::Validation(
                "a request needs at least an entry or an exit time".into(),
            ));
        }
        if let (Some(start), Some(end)) = (args.entry_time, args.exit_time) {
            if end <= start {
                return Err(AppError::Validation(
                    "exit time must be later than entry time".into(),
                ));
            }
        }
        if args.reason == JustifyReason::Other && args.description.trim().is_empty() {
            return Err(AppError::Validation(
                "reason 'other' requires a description".into(),
            ));
        }

        let worker = workers
            .get_worker(&args.worker_id)?
            .ok_or_else(|| AppError::NotFound(format!("worker {}", args.worker_id)))?;

        let mut created = Vec::new();

        let entry = args.entry_time.map(|t| {
            let mut p = PunchRecord::new(
                Uuid::new_v4().to_string(),
                &args.worker_id,
                &worker.name,
                args.date.and_time(t),
                PunchKind::Entry,
                Origin::Manual,
            );
            p.location_id = args.location_id.clone();
            p.sector_id = args.sector_id.clone();
            p
        });

        let exit = match args.exit_time {
            Some(t) => {
                let mut p = PunchRecord::new(
                    Uuid::new_v4().to_string(),
                    &args.worker_id,
                    &worker.name,
                    args.date.and_time(t),
                    PunchKind::Exit,
                    Origin::Manual,
                );
                p.location_id = args.location_id.clone();
                p.sector_id = args.sector_id.clone();

                // Pair with the entry created alongside, or fall back to the
                // worker's latest still-open entry before the exit.
                p.pair_ref = match &entry {
                    Some(e) => Some(e.id.clone()),
                    None => punches
                        .list_by_worker(&args.worker_id)?
                        .iter()
                        .filter(|q| {
                            q.kind == PunchKind::Entry
                                && q.status == PunchStatus::Open
                                && q.timestamp < p.timestamp
                        })
                        .max_by(|a, b| (a.timestamp, &a.id).cmp(&(b.timestamp, &b.id)))
                        .map(|q| q.id.clone()),
                };
                Some(p)
            }
            None => None,
        };

        // Entry first: the exit's pair_ref must resolve at write time.
        if let Some(e) = &entry {
            punches.upsert(e)?;
            created.push(e.clone());
        }
        if let Some(x) = &exit {
            punches.upsert(x)?;
            created.push(x.clone());
        }

        let linked_punch_id = exit
            .as_ref()
            .map(|p| p.id.clone())
            .or_else(|| entry.as_ref().map(|p| p.id.clone()));

        let justification = Justification::new(
            Uuid::new_v4().to_string(),
            &args.worker_id,
            &worker.name,
            args.sector_id.clone().or_else(|| worker.sector_id.clone()),
            linked_punch_id,
            args.reason,
            &args.description,
        );
        justifications.upsert(&justification)?;

        Ok(RequestOutcome {
            justification,
            created_punches: created,
        })
    }
}
