use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::record::DeleteLogic;
use crate::db::journal::log_op;
use crate::db::pool::DbPool;
use crate::db::punches::SqlitePunchStore;
use crate::errors::AppResult;
use crate::ui::messages::info;

/// Administrative punch deletion.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id } = cmd {
        let pool = DbPool::new(&cfg.database)?;
        let punches = SqlitePunchStore::new(&pool.conn);

        let removed = DeleteLogic::apply(&punches, id)?;

        log_op(
            &pool.conn,
            "punch_deleted",
            id,
            &format!(
                "{} {} at {}",
                removed.worker_id,
                removed.kind.to_db_str(),
                removed.timestamp_str()
            ),
        )?;

        info(format!(
            "Deleted {} punch of {} at {}.",
            removed.kind.to_db_str(),
            removed.worker_name,
            removed.timestamp_str()
        ));
    }

    Ok(())
}
