use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::request::{RequestArgs, RequestLogic};
use crate::db::directory::SqliteDirectory;
use crate::db::journal::log_op;
use crate::db::justifications::SqliteJustificationStore;
use crate::db::pool::DbPool;
use crate::db::punches::SqlitePunchStore;
use crate::errors::{AppError, AppResult};
use crate::models::justification::JustifyReason;
use crate::ui::messages::success;
use crate::utils::date::{parse_date, parse_time};

/// Submit a justification request for a missing or partial shift.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Justify {
        worker,
        date,
        entry,
        exit,
        reason,
        description,
        location,
        sector,
    } = cmd
    {
        let d = parse_date(date).ok_or_else(|| AppError::InvalidDate(date.to_string()))?;

        let entry_time = match entry {
            Some(t) => {
                Some(parse_time(t).ok_or_else(|| AppError::InvalidTimestamp(t.to_string()))?)
            }
            None => None,
        };
        let exit_time = match exit {
            Some(t) => {
                Some(parse_time(t).ok_or_else(|| AppError::InvalidTimestamp(t.to_string()))?)
            }
            None => None,
        };

        let reason = JustifyReason::from_code(reason).ok_or_else(|| {
            AppError::Validation(format!(
                "Invalid reason '{}'. Use one of: forgot, device, offsite, other",
                reason
            ))
        })?;

        let pool = DbPool::new(&cfg.database)?;
        let punches = SqlitePunchStore::new(&pool.conn);
        let justifications = SqliteJustificationStore::new(&pool.conn);
        let workers = SqliteDirectory::new(&pool.conn);

        let outcome = RequestLogic::apply(
            &punches,
            &justifications,
            &workers,
            RequestArgs {
                worker_id: worker.clone(),
                date: d,
                entry_time,
                exit_time,
                location_id: location.clone(),
                sector_id: sector.clone(),
                reason,
                description: description.clone(),
            },
        )?;

        log_op(
            &pool.conn,
            "justification_opened",
            &outcome.justification.id,
            &format!(
                "{} requested {} punch(es) on {}",
                worker,
                outcome.created_punches.len(),
                date
            ),
        )?;

        success(format!(
            "Request {} opened for {} ({} pending punch(es) created).",
            outcome.justification.id,
            outcome.justification.worker_name,
            outcome.created_punches.len()
        ));
    }

    Ok(())
}
