use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::models::justification::Justification;
use crate::models::punch::PunchRecord;

/// A derived pairing of at most one ENTRY and one EXIT for the same worker,
/// same logical session. Never persisted; recomputed from the stores on
/// every query.
#[derive(Debug, Clone, Serialize)]
pub struct Shift {
    pub entry: Option<PunchRecord>,
    pub exit: Option<PunchRecord>,
    /// Request governing either side of the pair, when one exists.
    pub justification: Option<Justification>,
}

impl Shift {
    pub fn new(entry: Option<PunchRecord>, exit: Option<PunchRecord>) -> Self {
        Self {
            entry,
            exit,
            justification: None,
        }
    }

    pub fn worker_id(&self) -> &str {
        match (&self.entry, &self.exit) {
            (Some(e), _) => &e.worker_id,
            (None, Some(x)) => &x.worker_id,
            (None, None) => "",
        }
    }

    pub fn worker_name(&self) -> &str {
        match (&self.entry, &self.exit) {
            (Some(e), _) => &e.worker_name,
            (None, Some(x)) => &x.worker_name,
            (None, None) => "",
        }
    }

    /// Entry timestamp if present, else exit timestamp. Drives both the
    /// shift date and the output ordering.
    pub fn effective_timestamp(&self) -> Option<NaiveDateTime> {
        self.entry
            .as_ref()
            .or(self.exit.as_ref())
            .map(|p| p.timestamp)
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.effective_timestamp().map(|ts| ts.date())
    }

    /// Location reference of the pair: entry side wins, exit side fills in.
    pub fn location_id(&self) -> Option<&str> {
        self.entry
            .as_ref()
            .and_then(|p| p.location_id.as_deref())
            .or_else(|| self.exit.as_ref().and_then(|p| p.location_id.as_deref()))
    }

    pub fn sector_id(&self) -> Option<&str> {
        self.entry
            .as_ref()
            .and_then(|p| p.sector_id.as_deref())
            .or_else(|| self.exit.as_ref().and_then(|p| p.sector_id.as_deref()))
    }

    /// Tie-breaker id for deterministic ordering.
    pub fn sort_id(&self) -> &str {
        match (&self.entry, &self.exit) {
            (Some(e), _) => &e.id,
            (None, Some(x)) => &x.id,
            (None, None) => "",
        }
    }

    /// Number of real punches referenced by this shift (0, 1 or 2).
    pub fn punch_count(&self) -> usize {
        self.entry.iter().count() + self.exit.iter().count()
    }
}
