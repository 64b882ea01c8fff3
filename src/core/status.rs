//! Single display status for a shift.
//!
//! A shift's two punches evolve independently (a biometric entry may be
//! auto-closed while the exit is still under manual justification), so the
//! resolution order is fixed: rejection and pending always win over a stale
//! "closed" on the other side.

use serde::Serialize;

use crate::models::punch::{PunchRecord, PunchStatus};
use crate::models::shift::Shift;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum StatusLabel {
    Rejected,
    Pending,
    Closed,
    Open,
}

impl StatusLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusLabel::Rejected => "Rejected",
            StatusLabel::Pending => "Pending",
            StatusLabel::Closed => "Closed",
            StatusLabel::Open => "Open",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResolvedStatus {
    pub label: StatusLabel,
    pub detail: Option<String>,
}

fn is_rejected(p: &PunchRecord) -> bool {
    p.status == PunchStatus::Rejected
}

fn is_closed(p: &PunchRecord) -> bool {
    p.status == PunchStatus::Closed
}

/// True when this side carries an explicit manager approval.
fn explicitly_approved(p: &PunchRecord) -> bool {
    p.approved_by.is_some() && is_closed(p)
}

fn rejection_detail(p: &PunchRecord) -> Option<String> {
    match (&p.rejected_by, &p.rejection_reason) {
        (Some(by), Some(reason)) => Some(format!("{}: {}", by, reason)),
        (Some(by), None) => Some(by.clone()),
        (None, Some(reason)) => Some(reason.clone()),
        (None, None) => None,
    }
}

/// Resolve the display status of a shift. Pure; never fails — missing
/// references degrade to a label without detail.
pub fn resolve_status(shift: &Shift) -> ResolvedStatus {
    let entry = shift.entry.as_ref();
    let exit = shift.exit.as_ref();
    let sides: Vec<&PunchRecord> = entry.into_iter().chain(exit).collect();

    // 1. Any rejection wins outright. The exit's rejection fields are
    //    preferred for the detail, the entry's fill in.
    if sides.iter().any(|p| is_rejected(p)) {
        let detail = exit
            .and_then(rejection_detail)
            .or_else(|| entry.and_then(rejection_detail));
        return ResolvedStatus {
            label: StatusLabel::Rejected,
            detail,
        };
    }

    // 2. A manual punch that nobody explicitly approved is provisional,
    //    whatever its stored status says.
    let any_manual = sides.iter().any(|p| p.origin.is_manual());
    let any_approved = sides.iter().any(|p| explicitly_approved(p));
    if any_manual && !any_approved {
        let detail = shift
            .justification
            .as_ref()
            .map(|j| format!("awaiting decision on {} request", j.reason.to_db_str()))
            .or_else(|| Some("manual punch awaiting decision".to_string()));
        return ResolvedStatus {
            label: StatusLabel::Pending,
            detail,
        };
    }

    // 3. An explicit pending status on either side.
    if sides.iter().any(|p| p.status == PunchStatus::Pending) {
        return ResolvedStatus {
            label: StatusLabel::Pending,
            detail: Some("awaiting manager decision".to_string()),
        };
    }

    // 4. Both sides effectively closed (an absent entry does not block an
    //    already-validated orphan exit).
    if let Some(x) = exit {
        if is_closed(x) && entry.is_none_or(is_closed) {
            let detail = x
                .approved_by
                .clone()
                .or_else(|| entry.and_then(|e| e.approved_by.clone()));
            return ResolvedStatus {
                label: StatusLabel::Closed,
                detail,
            };
        }
    }

    // 5. Everything else is an open shift (entry waiting for its exit, or
    //    drift the sweep has not caught up with yet).
    ResolvedStatus {
        label: StatusLabel::Open,
        detail: None,
    }
}
