//! Abstract store interfaces consumed by the core.
//!
//! The engine never touches SQL directly: the pairing, reconciliation and
//! sweep routines receive these traits, and `crate::db` provides the SQLite
//! implementations. Keeping the seam here is what lets the core tests run
//! against any backing collection.

use chrono::NaiveDateTime;

use crate::errors::AppResult;
use crate::models::directory::{Location, Sector, Worker};
use crate::models::justification::{Justification, JustificationStatus};
use crate::models::punch::PunchRecord;

/// Optional narrowing of a `list_all` punch scan.
#[derive(Debug, Default, Clone)]
pub struct PunchFilter {
    pub worker_id: Option<String>,
    pub location_id: Option<String>,
    pub from: Option<NaiveDateTime>,
    pub to: Option<NaiveDateTime>,
}

pub trait PunchStore {
    fn get(&self, id: &str) -> AppResult<Option<PunchRecord>>;
    fn list_by_worker(&self, worker_id: &str) -> AppResult<Vec<PunchRecord>>;
    fn list_all(&self, filter: Option<&PunchFilter>) -> AppResult<Vec<PunchRecord>>;
    fn upsert(&self, record: &PunchRecord) -> AppResult<()>;
    fn delete(&self, id: &str) -> AppResult<()>;
    /// Rewrite rows whose stored status appears in the documented legacy
    /// table to the current equivalent. Returns the number of rows touched.
    fn normalize_legacy_statuses(&self) -> AppResult<usize>;
}

pub trait JustificationStore {
    fn get(&self, id: &str) -> AppResult<Option<Justification>>;
    fn list_by_status(&self, status: JustificationStatus) -> AppResult<Vec<Justification>>;
    fn list_by_worker(&self, worker_id: &str) -> AppResult<Vec<Justification>>;
    fn list_all(&self) -> AppResult<Vec<Justification>>;
    fn upsert(&self, record: &Justification) -> AppResult<()>;
    /// See [`PunchStore::normalize_legacy_statuses`].
    fn normalize_legacy_statuses(&self) -> AppResult<usize>;
}

pub trait WorkerDirectory {
    fn get_worker(&self, id: &str) -> AppResult<Option<Worker>>;
    fn list_workers(&self) -> AppResult<Vec<Worker>>;
    fn upsert_worker(&self, worker: &Worker) -> AppResult<()>;
    fn delete_worker(&self, id: &str) -> AppResult<()>;
}

pub trait PlaceDirectory {
    fn get_location(&self, id: &str) -> AppResult<Option<Location>>;
    fn list_locations(&self) -> AppResult<Vec<Location>>;
    fn upsert_location(&self, location: &Location) -> AppResult<()>;
    fn delete_location(&self, id: &str) -> AppResult<()>;
    fn get_sector(&self, id: &str) -> AppResult<Option<Sector>>;
    fn list_sectors_for_location(&self, location_id: &str) -> AppResult<Vec<Sector>>;
    fn upsert_sector(&self, sector: &Sector) -> AppResult<()>;
}
