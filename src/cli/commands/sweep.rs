use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::sweep::SweepLogic;
use crate::db::directory::SqliteDirectory;
use crate::db::journal::log_op;
use crate::db::justifications::SqliteJustificationStore;
use crate::db::pool::DbPool;
use crate::db::punches::SqlitePunchStore;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

/// Run the consistency sweep and print its report.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Sweep { json } = cmd {
        let pool = DbPool::new(&cfg.database)?;
        let punches = SqlitePunchStore::new(&pool.conn);
        let justifications = SqliteJustificationStore::new(&pool.conn);
        let directory = SqliteDirectory::new(&pool.conn);

        let report = SweepLogic::sweep(&punches, &justifications, &directory, &directory)?;

        log_op(
            &pool.conn,
            "sweep_completed",
            "",
            &format!("{} repairs", report.total_repairs()),
        )?;

        if *json {
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(());
        }

        for w in &report.warnings {
            warning(w);
        }

        if report.total_repairs() == 0 {
            info("Nothing to repair.");
            return Ok(());
        }

        success(format!(
            "Sweep done: {} duplicate worker(s), {} duplicate location(s), {} placeholder worker(s), {} dangling link(s), {} legacy status(es).",
            report.duplicate_workers_removed,
            report.duplicate_locations_removed,
            report.placeholder_workers_created,
            report.dangling_links_cleared,
            report.legacy_statuses_normalized
        ));
    }

    Ok(())
}
