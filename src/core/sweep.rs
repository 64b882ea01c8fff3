//! Consistency sweep: idempotent maintenance pass over accumulated drift.
//!
//! Each repair category commits independently and is safe to skip on
//! failure; a failed category lands in the report's warnings instead of
//! aborting the others. Running the sweep twice in a row yields all-zero
//! counts on the second pass.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::errors::AppResult;
use crate::models::directory::Worker;
use crate::store::{JustificationStore, PlaceDirectory, PunchStore, WorkerDirectory};

#[derive(Debug, Default, Serialize)]
pub struct SweepReport {
    pub duplicate_workers_removed: usize,
    pub duplicate_locations_removed: usize,
    pub placeholder_workers_created: usize,
    pub dangling_links_cleared: usize,
    pub legacy_statuses_normalized: usize,
    pub warnings: Vec<String>,
}

impl SweepReport {
    pub fn total_repairs(&self) -> usize {
        self.duplicate_workers_removed
            + self.duplicate_locations_removed
            + self.placeholder_workers_created
            + self.dangling_links_cleared
            + self.legacy_statuses_normalized
    }
}

pub struct SweepLogic;

impl SweepLogic {
    pub fn sweep(
        punches: &dyn PunchStore,
        justifications: &dyn JustificationStore,
        workers: &dyn WorkerDirectory,
        places: &dyn PlaceDirectory,
    ) -> AppResult<SweepReport> {
        let mut report = SweepReport::default();

        // Order matters: duplicate workers are re-pointed before the orphan
        // scan, otherwise the orphan repair would resurrect them as
        // placeholders.
        match dedupe_workers(punches, justifications, workers) {
            Ok(n) => report.duplicate_workers_removed = n,
            Err(e) => report.warnings.push(format!("worker dedupe skipped: {}", e)),
        }

        match dedupe_locations(punches, places) {
            Ok(n) => report.duplicate_locations_removed = n,
            Err(e) => report
                .warnings
                .push(format!("location dedupe skipped: {}", e)),
        }

        match repair_orphaned_owners(punches, justifications, workers) {
            Ok(n) => report.placeholder_workers_created = n,
            Err(e) => report.warnings.push(format!("orphan repair skipped: {}", e)),
        }

        match clear_dangling_links(punches, justifications) {
            Ok(n) => report.dangling_links_cleared = n,
            Err(e) => report
                .warnings
                .push(format!("dangling link repair skipped: {}", e)),
        }

        match normalize_legacy(punches, justifications) {
            Ok(n) => report.legacy_statuses_normalized = n,
            Err(e) => report
                .warnings
                .push(format!("legacy normalization skipped: {}", e)),
        }

        Ok(report)
    }
}

/// Newest record wins a natural-key collision: highest created_at, tie
/// broken by id.
fn newest_wins<'a, T>(
    group: &'a [T],
    created_at: impl Fn(&'a T) -> &'a str,
    id: impl Fn(&'a T) -> &'a str,
) -> usize {
    let mut best = 0;
    for i in 1..group.len() {
        let a = (created_at(&group[i]), id(&group[i]));
        let b = (created_at(&group[best]), id(&group[best]));
        if a > b {
            best = i;
        }
    }
    best
}

/// Workers sharing a badge: keep the newest, re-point the punch and
/// justification history of the others at it, then remove them.
fn dedupe_workers(
    punches: &dyn PunchStore,
    justifications: &dyn JustificationStore,
    workers: &dyn WorkerDirectory,
) -> AppResult<usize> {
    let mut by_badge: BTreeMap<String, Vec<Worker>> = BTreeMap::new();
    for w in workers.list_workers()? {
        if w.badge.is_empty() {
            continue; // placeholders carry no badge
        }
        by_badge.entry(w.badge.clone()).or_default().push(w);
    }

    let mut removed = 0;
    for (_, group) in by_badge {
        if group.len() < 2 {
            continue;
        }
        let keep = newest_wins(&group, |w| w.created_at.as_str(), |w| w.id.as_str());
        let keeper = group[keep].clone();

        for (i, dup) in group.iter().enumerate() {
            if i == keep {
                continue;
            }

            for mut p in punches.list_by_worker(&dup.id)? {
                p.worker_id = keeper.id.clone();
                p.worker_name = keeper.name.clone();
                punches.upsert(&p)?;
            }
            for mut j in justifications.list_by_worker(&dup.id)? {
                j.worker_id = keeper.id.clone();
                j.worker_name = keeper.name.clone();
                justifications.upsert(&j)?;
            }

            workers.delete_worker(&dup.id)?;
            removed += 1;
        }
    }

    Ok(removed)
}

/// Locations sharing a slug: keep the newest, re-point punches, remove the
/// rest.
fn dedupe_locations(punches: &dyn PunchStore, places: &dyn PlaceDirectory) -> AppResult<usize> {
    let mut by_slug: BTreeMap<String, Vec<crate::models::directory::Location>> = BTreeMap::new();
    for l in places.list_locations()? {
        by_slug.entry(l.slug.clone()).or_default().push(l);
    }

    let mut removed = 0;
    for (_, group) in by_slug {
        if group.len() < 2 {
            continue;
        }
        let keep = newest_wins(&group, |l| l.created_at.as_str(), |l| l.id.as_str());
        let keeper_id = group[keep].id.clone();

        for (i, dup) in group.iter().enumerate() {
            if i == keep {
                continue;
            }

            for mut p in punches.list_all(None)? {
                if p.location_id.as_deref() == Some(dup.id.as_str()) {
                    p.location_id = Some(keeper_id.clone());
                    punches.upsert(&p)?;
                }
            }

            places.delete_location(&dup.id)?;
            removed += 1;
        }
    }

    Ok(removed)
}

/// Punch history must never be destroyed by a missing foreign key: a punch
/// or justification owned by a vanished worker gets a minimal placeholder
/// record instead.
fn repair_orphaned_owners(
    punches: &dyn PunchStore,
    justifications: &dyn JustificationStore,
    workers: &dyn WorkerDirectory,
) -> AppResult<usize> {
    let known: BTreeSet<String> = workers.list_workers()?.into_iter().map(|w| w.id).collect();

    let mut missing: BTreeSet<String> = BTreeSet::new();
    for p in punches.list_all(None)? {
        if !known.contains(&p.worker_id) {
            missing.insert(p.worker_id);
        }
    }
    for j in justifications.list_all()? {
        if !known.contains(&j.worker_id) {
            missing.insert(j.worker_id);
        }
    }

    let mut created = 0;
    for id in missing {
        workers.upsert_worker(&Worker::placeholder(&id))?;
        created += 1;
    }

    Ok(created)
}

/// A justification whose linked punch no longer resolves keeps its
/// historical record; only the link is nulled out.
fn clear_dangling_links(
    punches: &dyn PunchStore,
    justifications: &dyn JustificationStore,
) -> AppResult<usize> {
    let mut cleared = 0;
    for mut j in justifications.list_all()? {
        let target = match &j.linked_punch_id {
            Some(id) => id.clone(),
            None => continue,
        };
        if punches.get(&target)?.is_none() {
            j.linked_punch_id = None;
            justifications.upsert(&j)?;
            cleared += 1;
        }
    }
    Ok(cleared)
}

/// Rewrite statuses known only to older versions, using the documented
/// mapping table (never inferred).
fn normalize_legacy(
    punches: &dyn PunchStore,
    justifications: &dyn JustificationStore,
) -> AppResult<usize> {
    let p = punches.normalize_legacy_statuses()?;
    let j = justifications.normalize_legacy_statuses()?;
    Ok(p + j)
}
