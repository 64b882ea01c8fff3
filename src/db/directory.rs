use rusqlite::{Connection, Result, Row, params};

use crate::errors::AppResult;
use crate::models::directory::{Location, Sector, Worker};
use crate::store::{PlaceDirectory, WorkerDirectory};

/// SQLite-backed worker/location/sector directory.
pub struct SqliteDirectory<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteDirectory<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

fn map_worker(row: &Row) -> Result<Worker> {
    Ok(Worker {
        id: row.get("id")?,
        badge: row.get("badge")?,
        name: row.get("name")?,
        sector_id: row.get("sector_id")?,
        created_at: row.get("created_at")?,
    })
}

fn map_location(row: &Row) -> Result<Location> {
    Ok(Location {
        id: row.get("id")?,
        slug: row.get("slug")?,
        name: row.get("name")?,
        created_at: row.get("created_at")?,
    })
}

fn map_sector(row: &Row) -> Result<Sector> {
    Ok(Sector {
        id: row.get("id")?,
        location_id: row.get("location_id")?,
        name: row.get("name")?,
        created_at: row.get("created_at")?,
    })
}

impl WorkerDirectory for SqliteDirectory<'_> {
    fn get_worker(&self, id: &str) -> AppResult<Option<Worker>> {
        let mut stmt = self.conn.prepare("SELECT * FROM workers WHERE id = ?1")?;
        let mut rows = stmt.query_map([id], map_worker)?;
        match rows.next() {
            Some(r) => Ok(Some(r?)),
            None => Ok(None),
        }
    }

    fn list_workers(&self) -> AppResult<Vec<Worker>> {
        let mut stmt = self
            .conn
            .prepare("SELECT * FROM workers ORDER BY name ASC, id ASC")?;
        let rows = stmt.query_map([], map_worker)?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    fn upsert_worker(&self, worker: &Worker) -> AppResult<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO workers (id, badge, name, sector_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                worker.id,
                worker.badge,
                worker.name,
                worker.sector_id,
                worker.created_at
            ],
        )?;
        Ok(())
    }

    fn delete_worker(&self, id: &str) -> AppResult<()> {
        self.conn
            .execute("DELETE FROM workers WHERE id = ?1", [id])?;
        Ok(())
    }
}

impl PlaceDirectory for SqliteDirectory<'_> {
    fn get_location(&self, id: &str) -> AppResult<Option<Location>> {
        let mut stmt = self.conn.prepare("SELECT * FROM locations WHERE id = ?1")?;
        let mut rows = stmt.query_map([id], map_location)?;
        match rows.next() {
            Some(r) => Ok(Some(r?)),
            None => Ok(None),
        }
    }

    fn list_locations(&self) -> AppResult<Vec<Location>> {
        let mut stmt = self
            .conn
            .prepare("SELECT * FROM locations ORDER BY slug ASC, id ASC")?;
        let rows = stmt.query_map([], map_location)?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    fn upsert_location(&self, location: &Location) -> AppResult<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO locations (id, slug, name, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![location.id, location.slug, location.name, location.created_at],
        )?;
        Ok(())
    }

    fn delete_location(&self, id: &str) -> AppResult<()> {
        self.conn
            .execute("DELETE FROM locations WHERE id = ?1", [id])?;
        Ok(())
    }

    fn get_sector(&self, id: &str) -> AppResult<Option<Sector>> {
        let mut stmt = self.conn.prepare("SELECT * FROM sectors WHERE id = ?1")?;
        let mut rows = stmt.query_map([id], map_sector)?;
        match rows.next() {
            Some(r) => Ok(Some(r?)),
            None => Ok(None),
        }
    }

    fn list_sectors_for_location(&self, location_id: &str) -> AppResult<Vec<Sector>> {
        let mut stmt = self.conn.prepare(
            "SELECT * FROM sectors WHERE location_id = ?1 ORDER BY name ASC, id ASC",
        )?;
        let rows = stmt.query_map([location_id], map_sector)?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    fn upsert_sector(&self, sector: &Sector) -> AppResult<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO sectors (id, location_id, name, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![sector.id, sector.location_id, sector.name, sector.created_at],
        )?;
        Ok(())
    }
}
