use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::reconcile::{Decision, ReconcileLogic};
use crate::db::journal::log_op;
use crate::db::justifications::SqliteJustificationStore;
use crate::db::pool::DbPool;
use crate::db::punches::SqlitePunchStore;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};

/// Approve or reject a justification request.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Decide {
        id,
        approve,
        reject,
        actor,
        reason,
    } = cmd
    {
        let decision = match (*approve, *reject) {
            (true, false) => Decision::Approve,
            (false, true) => Decision::Reject,
            _ => {
                return Err(AppError::Validation(
                    "specify exactly one of --approve or --reject".into(),
                ));
            }
        };

        let pool = DbPool::new(&cfg.database)?;
        let punches = SqlitePunchStore::new(&pool.conn);
        let justifications = SqliteJustificationStore::new(&pool.conn);

        let outcome = ReconcileLogic::decide(
            &justifications,
            &punches,
            id,
            decision,
            actor,
            reason.as_deref(),
        )?;

        for w in &outcome.warnings {
            warning(w);
        }

        let verb = match decision {
            Decision::Approve => "approved",
            Decision::Reject => "rejected",
        };

        log_op(
            &pool.conn,
            "justification_decided",
            id,
            &format!("{} by {} ({} punches updated)", verb, actor, outcome.punches_updated),
        )?;

        success(format!(
            "Request {} {} by {}; {} punch(es) updated.",
            id, verb, actor, outcome.punches_updated
        ));
    }

    Ok(())
}
