use crate::cli::parser::{Commands, RegisterTarget};
use crate::config::Config;
use crate::db::directory::SqliteDirectory;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::directory::{Location, Sector, Worker};
use crate::store::{PlaceDirectory, WorkerDirectory};
use crate::ui::messages::success;

/// Register a worker, hospital or sector.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Register { target } = cmd {
        let pool = DbPool::new(&cfg.database)?;
        let directory = SqliteDirectory::new(&pool.conn);

        match target {
            RegisterTarget::Worker {
                id,
                badge,
                name,
                sector,
            } => {
                directory.upsert_worker(&Worker::new(id.clone(), badge, name, sector.clone()))?;
                success(format!("Worker {} registered.", name));
            }
            RegisterTarget::Location { id, slug, name } => {
                directory.upsert_location(&Location::new(id.clone(), slug, name))?;
                success(format!("Hospital {} registered.", name));
            }
            RegisterTarget::Sector { id, location, name } => {
                directory.upsert_sector(&Sector::new(id.clone(), location.clone(), name))?;
                success(format!("Sector {} registered.", name));
            }
        }
    }

    Ok(())
}
