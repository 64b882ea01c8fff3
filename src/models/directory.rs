//! Reference records resolved through the directory stores: who punched,
//! and where. Read-mostly; the sweep is the only writer besides `register`.

use chrono::Local;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Worker {
    pub id: String,
    /// Cooperative registration number. Intended unique, historically not
    /// enforced; the sweep deduplicates on it.
    pub badge: String,
    pub name: String,
    pub sector_id: Option<String>,
    pub created_at: String, // ISO8601
}

impl Worker {
    pub fn new(id: String, badge: &str, name: &str, sector_id: Option<String>) -> Self {
        Self {
            id,
            badge: badge.to_string(),
            name: name.to_string(),
            sector_id,
            created_at: Local::now().to_rfc3339(),
        }
    }

    /// Minimal stand-in synthesized by the sweep when punch history points
    /// at a worker that no longer exists.
    pub fn placeholder(id: &str) -> Self {
        Self {
            id: id.to_string(),
            badge: String::new(),
            name: "(unknown worker)".to_string(),
            sector_id: None,
            created_at: Local::now().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Location {
    pub id: String,
    /// Hospital short name, intended unique. Deduplicated by the sweep.
    pub slug: String,
    pub name: String,
    pub created_at: String,
}

impl Location {
    pub fn new(id: String, slug: &str, name: &str) -> Self {
        Self {
            id,
            slug: slug.to_string(),
            name: name.to_string(),
            created_at: Local::now().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Sector {
    pub id: String,
    pub location_id: Option<String>,
    pub name: String,
    pub created_at: String,
}

impl Sector {
    pub fn new(id: String, location_id: Option<String>, name: &str) -> Self {
        Self {
            id,
            location_id,
            name: name.to_string(),
            created_at: Local::now().to_rfc3339(),
        }
    }
}
