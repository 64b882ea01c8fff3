use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::justifications::SqliteJustificationStore;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::justification::JustificationStatus;
use crate::store::JustificationStore;
use crate::ui::messages::info;
use crate::utils::fmt::{pad, short_id};

/// List justification requests.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Requests {
        status,
        worker,
        json,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;
        let store = SqliteJustificationStore::new(&pool.conn);

        let mut requests = match status {
            Some(code) => {
                let wanted = JustificationStatus::from_code(code).ok_or_else(|| {
                    AppError::Validation(format!(
                        "Invalid status '{}'. Use one of: pending, approved, rejected",
                        code
                    ))
                })?;
                store.list_by_status(wanted)?
            }
            None => store.list_all()?,
        };

        if let Some(w) = worker {
            requests.retain(|j| &j.worker_id == w);
        }

        if *json {
            println!("{}", serde_json::to_string_pretty(&requests)?);
            return Ok(());
        }

        if requests.is_empty() {
            info("No requests in the selected scope.");
            return Ok(());
        }

        println!(
            "{} {} {} {} {}",
            pad("ID", 8),
            pad("WORKER", 24),
            pad("REASON", 8),
            pad("STATUS", 9),
            "DECIDED BY"
        );
        for j in &requests {
            println!(
                "{} {} {} {} {}",
                pad(short_id(&j.id), 8),
                pad(&j.worker_name, 24),
                pad(j.reason.to_db_str(), 8),
                pad(j.status.to_db_str(), 9),
                j.decided_by.as_deref().unwrap_or("-")
            );
        }
    }

    Ok(())
}
