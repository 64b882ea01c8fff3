use chrono::Local;
use serde::Serialize;

use crate::models::legacy;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JustificationStatus {
    Pending,
    Approved,
    Rejected,
}

impl JustificationStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            JustificationStatus::Pending => "pending",
            JustificationStatus::Approved => "approved",
            JustificationStatus::Rejected => "rejected",
        }
    }

    /// Convert DB string → enum, routing legacy values through the
    /// normalization table. Anything still unknown afterwards reads as
    /// PENDING so an odd historical row never crashes a listing.
    pub fn from_db_str(s: &str) -> Self {
        match legacy::normalize_justification_status(s) {
            "approved" => JustificationStatus::Approved,
            "rejected" => JustificationStatus::Rejected,
            _ => JustificationStatus::Pending,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_lowercase().as_str() {
            "pending" => Some(JustificationStatus::Pending),
            "approved" => Some(JustificationStatus::Approved),
            "rejected" => Some(JustificationStatus::Rejected),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JustifyReason {
    /// Worker forgot to punch.
    Forgot,
    /// The punch device was down or rejected the biometric read.
    Device,
    /// Shift worked away from any kiosk (home care, external duty).
    Offsite,
    /// Anything else; requires a free-text description.
    Other,
}

impl JustifyReason {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            JustifyReason::Forgot => "forgot",
            JustifyReason::Device => "device",
            JustifyReason::Offsite => "offsite",
            JustifyReason::Other => "other",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "forgot" => Some(JustifyReason::Forgot),
            "device" => Some(JustifyReason::Device),
            "offsite" => Some(JustifyReason::Offsite),
            "other" => Some(JustifyReason::Other),
            _ => None,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        JustifyReason::from_db_str(&code.to_lowercase())
    }
}

/// A worker's request to validate an irregular or missing shift.
#[derive(Debug, Clone, Serialize)]
pub struct Justification {
    pub id: String,
    pub worker_id: String,
    pub worker_name: String,
    pub sector_id: Option<String>,
    /// The punch this request governs: usually the EXIT, or the synthetic
    /// punch created for a fully-missing shift. Nulled by the sweep when the
    /// target no longer resolves.
    pub linked_punch_id: Option<String>,
    pub reason: JustifyReason,
    pub description: String,
    pub status: JustificationStatus,
    pub requested_at: String, // ISO8601
    pub decided_at: Option<String>,
    pub decided_by: Option<String>,
    pub rejection_reason: Option<String>,
}

impl Justification {
    pub fn new(
        id: String,
        worker_id: &str,
        worker_name: &str,
        sector_id: Option<String>,
        linked_punch_id: Option<String>,
        reason: JustifyReason,
        description: &str,
    ) -> Self {
        Self {
            id,
            worker_id: worker_id.to_string(),
            worker_name: worker_name.to_string(),
            sector_id,
            linked_punch_id,
            reason,
            description: description.to_string(),
            status: JustificationStatus::Pending,
            requested_at: Local::now().to_rfc3339(),
            decided_at: None,
            decided_by: None,
            rejection_reason: None,
        }
    }
}
