use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::journal::load_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;

/// Print the internal operation log.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log { print } = cmd {
        if !*print {
            info("Use --print to show the operation log.");
            return Ok(());
        }

        let pool = DbPool::new(&cfg.database)?;
        let rows = load_log(&pool.conn)?;

        if rows.is_empty() {
            info("Operation log is empty.");
            return Ok(());
        }

        for (date, operation, message) in rows {
            println!("{}  {:24}  {}", date, operation, message);
        }
    }

    Ok(())
}
