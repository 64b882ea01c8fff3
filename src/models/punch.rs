use chrono::{Local, NaiveDateTime};
use serde::Serialize;

use crate::models::legacy;

pub const TIMESTAMP_FMT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PunchKind {
    Entry,
    BreakOut,
    BreakIn,
    Exit,
}

impl PunchKind {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            PunchKind::Entry => "entry",
            PunchKind::BreakOut => "break_out",
            PunchKind::BreakIn => "break_in",
            PunchKind::Exit => "exit",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "entry" => Some(PunchKind::Entry),
            "break_out" => Some(PunchKind::BreakOut),
            "break_in" => Some(PunchKind::BreakIn),
            "exit" => Some(PunchKind::Exit),
            _ => None,
        }
    }

    /// Helper: convert input code from CLI (lowercase or uppercase)
    pub fn from_code(code: &str) -> Option<Self> {
        PunchKind::from_db_str(&code.to_lowercase().replace('-', "_"))
    }

    pub fn is_entry(&self) -> bool {
        matches!(self, PunchKind::Entry)
    }

    pub fn is_exit(&self) -> bool {
        matches!(self, PunchKind::Exit)
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    Biometric,
    Manual,
}

impl Origin {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Origin::Biometric => "biometric",
            Origin::Manual => "manual",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "biometric" => Some(Origin::Biometric),
            "manual" => Some(Origin::Manual),
            _ => None,
        }
    }

    pub fn is_manual(&self) -> bool {
        matches!(self, Origin::Manual)
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PunchStatus {
    /// Unpaired, awaiting its counterpart.
    Open,
    /// Awaiting a manager decision.
    Pending,
    /// Paired and approved/valid.
    Closed,
    /// Denied by a manager.
    Rejected,
}

impl PunchStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            PunchStatus::Open => "open",
            PunchStatus::Pending => "pending",
            PunchStatus::Closed => "closed",
            PunchStatus::Rejected => "rejected",
        }
    }

    /// Convert DB string → enum. Legacy values are routed through the
    /// normalization table so old rows stay loadable.
    pub fn from_db_str(s: &str) -> Option<Self> {
        let canon = legacy::normalize_punch_status(s);
        match canon {
            "open" => Some(PunchStatus::Open),
            "pending" => Some(PunchStatus::Pending),
            "closed" => Some(PunchStatus::Closed),
            "rejected" => Some(PunchStatus::Rejected),
            _ => None,
        }
    }
}

/// One clock event, as stored in the `punches` table.
#[derive(Debug, Clone, Serialize)]
pub struct PunchRecord {
    pub id: String,
    pub worker_id: String,
    pub worker_name: String, // denormalized for display
    pub timestamp: NaiveDateTime,
    pub kind: PunchKind,
    pub location_id: Option<String>,
    pub sector_id: Option<String>,
    pub origin: Origin,
    pub status: PunchStatus,
    pub approved_by: Option<String>,
    pub rejected_by: Option<String>,
    pub rejection_reason: Option<String>,

    /// Id of the counterpart punch. Only ever set on an EXIT, pointing at
    /// its ENTRY. The reverse direction would make the pairing graph cyclic
    /// and is rejected on write.
    pub pair_ref: Option<String>,
    pub created_at: String, // ISO8601
}

impl PunchRecord {
    /// Constructor for punches produced by a kiosk or the CLI.
    /// Biometric punches start OPEN, manual ones PENDING.
    pub fn new(
        id: String,
        worker_id: &str,
        worker_name: &str,
        timestamp: NaiveDateTime,
        kind: PunchKind,
        origin: Origin,
    ) -> Self {
        let status = match origin {
            Origin::Biometric => PunchStatus::Open,
            Origin::Manual => PunchStatus::Pending,
        };
        Self {
            id,
            worker_id: worker_id.to_string(),
            worker_name: worker_name.to_string(),
            timestamp,
            kind,
            location_id: None,
            sector_id: None,
            origin,
            status,
            approved_by: None,
            rejected_by: None,
            rejection_reason: None,
            pair_ref: None,
            created_at: Local::now().to_rfc3339(),
        }
    }

    pub fn timestamp_str(&self) -> String {
        self.timestamp.format(TIMESTAMP_FMT).to_string()
    }

    /// Stamp an approval, clearing any previous rejection.
    pub fn approve(&mut self, actor: &str) {
        self.status = PunchStatus::Closed;
        self.approved_by = Some(actor.to_string());
        self.rejected_by = None;
        self.rejection_reason = None;
    }

    /// Stamp a rejection, clearing any previous approval.
    pub fn reject(&mut self, actor: &str, reason: &str) {
        self.status = PunchStatus::Rejected;
        self.rejected_by = Some(actor.to_string());
        self.rejection_reason = Some(reason.to_string());
        self.approved_by = None;
    }
}
