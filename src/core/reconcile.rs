//! Reconciliation: propagate a manager's decision from a justification to
//! every punch linked to it.
//!
//! Updates are applied in a fixed order (justification, linked punch,
//! paired punch, reverse-referencing punches) and every step is idempotent,
//! so an interrupted run is completed by re-running `decide` with the same
//! arguments.

use chrono::Local;

use crate::errors::{AppError, AppResult};
use crate::models::justification::{Justification, JustificationStatus};
use crate::models::punch::PunchRecord;
use crate::store::{JustificationStore, PunchStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

#[derive(Debug)]
pub struct DecideOutcome {
    pub justification: Justification,
    pub punches_updated: usize,
    /// Non-fatal lookup misses: the justification may reference punches
    /// created through a different workflow.
    pub warnings: Vec<String>,
}

pub struct ReconcileLogic;

impl ReconcileLogic {
    pub fn decide(
        justifications: &dyn JustificationStore,
        punches: &dyn PunchStore,
        justification_id: &str,
        decision: Decision,
        actor: &str,
        reason: Option<&str>,
    ) -> AppResult<DecideOutcome> {
        let reason = match decision {
            Decision::Reject => Some(
                reason
                    .map(str::trim)
                    .filter(|r| !r.is_empty())
                    .ok_or_else(|| {
                        AppError::Validation("a rejection requires a reason".into())
                    })?,
            ),
            Decision::Approve => None,
        };

        let mut justification = justifications
            .get(justification_id)?
            .ok_or_else(|| AppError::NotFound(format!("justification {}", justification_id)))?;

        // 1. The justification itself. Last write wins: deciding again with
        //    the opposite decision simply overwrites the previous one.
        justification.status = match decision {
            Decision::Approve => JustificationStatus::Approved,
            Decision::Reject => JustificationStatus::Rejected,
        };
        justification.decided_by = Some(actor.to_string());
        justification.decided_at = Some(Local::now().to_rfc3339());
        justification.rejection_reason = reason.map(str::to_string);
        justifications.upsert(&justification)?;

        let mut updated = 0;
        let mut warnings = Vec::new();

        let apply = |p: &mut PunchRecord| match decision {
            Decision::Approve => p.approve(actor),
            Decision::Reject => p.reject(actor, reason.unwrap_or_default()),
        };

        // 2. The linked punch. Absence is a warning, not a failure.
        let linked = match &justification.linked_punch_id {
            Some(id) => match punches.get(id)? {
                Some(p) => Some(p),
                None => {
                    warnings.push(format!("linked punch {} not found", id));
                    None
                }
            },
            None => None,
        };

        if let Some(mut linked) = linked {
            apply(&mut linked);
            punches.upsert(&linked)?;
            updated += 1;

            // 3. The punch it points at.
            if let Some(pair_id) = &linked.pair_ref {
                match punches.get(pair_id)? {
                    Some(mut paired) => {
                        apply(&mut paired);
                        punches.upsert(&paired)?;
                        updated += 1;
                    }
                    None => warnings.push(format!("paired punch {} not found", pair_id)),
                }
            }

            // 4. Punches pointing back at it: a punch may have been created
            //    after the linked one and reference it as its entry.
            for mut referrer in punches
                .list_all(None)?
                .into_iter()
                .filter(|p| p.pair_ref.as_deref() == Some(linked.id.as_str()))
            {
                apply(&mut referrer);
                punches.upsert(&referrer)?;
                updated += 1;
            }
        }

        Ok(DecideOutcome {
            justification,
            punches_updated: updated,
            warnings,
        })
    }
}
