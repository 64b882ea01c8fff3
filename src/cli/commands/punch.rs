use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::record::RecordLogic;
use crate::db::directory::SqliteDirectory;
use crate::db::journal::log_op;
use crate::db::pool::DbPool;
use crate::db::punches::SqlitePunchStore;
use crate::errors::{AppError, AppResult};
use crate::models::punch::{Origin, PunchKind};
use crate::ui::messages::success;
use crate::utils::date::parse_datetime;

/// Record a clock event.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Punch {
        worker,
        kind,
        at,
        location,
        sector,
        manual,
    } = cmd
    {
        let kind = PunchKind::from_code(kind)
            .ok_or_else(|| AppError::InvalidKind(kind.to_string()))?;

        let timestamp =
            parse_datetime(at).ok_or_else(|| AppError::InvalidTimestamp(at.to_string()))?;

        let origin = if *manual {
            Origin::Manual
        } else {
            Origin::Biometric
        };

        let location = location.clone().or_else(|| {
            if cfg.default_location.is_empty() {
                None
            } else {
                Some(cfg.default_location.clone())
            }
        });

        let pool = DbPool::new(&cfg.database)?;
        let punches = SqlitePunchStore::new(&pool.conn);
        let workers = SqliteDirectory::new(&pool.conn);

        let record = RecordLogic::apply(
            &punches,
            &workers,
            worker,
            kind,
            timestamp,
            location,
            sector.clone(),
            origin,
        )?;

        log_op(
            &pool.conn,
            "punch_recorded",
            &record.id,
            &format!(
                "{} {} at {} ({})",
                record.worker_id,
                record.kind.to_db_str(),
                record.timestamp_str(),
                record.origin.to_db_str()
            ),
        )?;

        success(format!(
            "Recorded {} for {} at {} [{}].",
            record.kind.to_db_str(),
            record.worker_name,
            record.timestamp_str(),
            record.status.to_db_str()
        ));
    }

    Ok(())
}
