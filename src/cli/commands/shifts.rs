use serde_json::json;

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::pairing::{PairOrder, pair};
use crate::core::status::resolve_status;
use crate::db::directory::SqliteDirectory;
use crate::db::justifications::SqliteJustificationStore;
use crate::db::pool::DbPool;
use crate::db::punches::SqlitePunchStore;
use crate::errors::AppResult;
use crate::models::shift::Shift;
use crate::store::{JustificationStore, PlaceDirectory, PunchFilter, PunchStore};
use crate::ui::messages::info;
use crate::utils::date::period_bounds;
use crate::utils::fmt::{pad, short_id};

/// List derived shifts, or raw punch events with --events.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Shifts {
        worker,
        period,
        location,
        asc,
        events,
        json,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;
        let punch_store = SqlitePunchStore::new(&pool.conn);
        let just_store = SqliteJustificationStore::new(&pool.conn);
        let directory = SqliteDirectory::new(&pool.conn);

        let mut filter = PunchFilter {
            worker_id: worker.clone(),
            location_id: location.clone(),
            ..PunchFilter::default()
        };
        if let Some(p) = period {
            let (from, to) = period_bounds(p)?;
            filter.from = Some(from);
            filter.to = Some(to);
        }

        let punches = punch_store.list_all(Some(&filter))?;

        if *events {
            return print_events(&punches, *json);
        }

        let justifications = just_store.list_all()?;

        let order = if *asc || cfg.list_order == "asc" {
            PairOrder::Ascending
        } else {
            PairOrder::Descending
        };
        let shifts = pair(&punches, &justifications, order);

        if *json {
            let rows: Vec<_> = shifts
                .iter()
                .map(|s| {
                    let st = resolve_status(s);
                    json!({
                        "date": s.date().map(|d| d.to_string()),
                        "worker_id": s.worker_id(),
                        "worker_name": s.worker_name(),
                        "entry": s.entry.as_ref().map(|p| p.timestamp_str()),
                        "exit": s.exit.as_ref().map(|p| p.timestamp_str()),
                        "location_id": s.location_id(),
                        "sector_id": s.sector_id(),
                        "status": st.label.as_str(),
                        "detail": st.detail,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
            return Ok(());
        }

        if shifts.is_empty() {
            info("No shifts in the selected scope.");
            return Ok(());
        }

        println!(
            "{} {} {} {} {} {}",
            pad("DATE", 10),
            pad("WORKER", 24),
            pad("ENTRY", 6),
            pad("EXIT", 6),
            pad("HOSPITAL", 16),
            "STATUS"
        );
        for s in &shifts {
            print_shift_row(&directory, s);
        }
    }

    Ok(())
}

fn print_shift_row(directory: &SqliteDirectory<'_>, s: &Shift) {
    let st = resolve_status(s);

    let date = s
        .date()
        .map(|d| d.to_string())
        .unwrap_or_else(|| "-".to_string());
    let entry = s
        .entry
        .as_ref()
        .map(|p| p.timestamp.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string());
    let exit = s
        .exit
        .as_ref()
        .map(|p| p.timestamp.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string());

    // Missing references render as a placeholder, never an error.
    let hospital = s
        .location_id()
        .map(|id| match directory.get_location(id) {
            Ok(Some(l)) => l.name,
            _ => "(unknown)".to_string(),
        })
        .unwrap_or_else(|| "-".to_string());

    let status = match &st.detail {
        Some(d) => format!("{} ({})", st.label.as_str(), d),
        None => st.label.as_str().to_string(),
    };

    println!(
        "{} {} {} {} {} {}",
        pad(&date, 10),
        pad(s.worker_name(), 24),
        pad(&entry, 6),
        pad(&exit, 6),
        pad(&hospital, 16),
        status
    );
}

fn print_events(punches: &[crate::models::punch::PunchRecord], json: bool) -> AppResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(punches)?);
        return Ok(());
    }

    if punches.is_empty() {
        info("No punches in the selected scope.");
        return Ok(());
    }

    println!(
        "{} {} {} {} {} {}",
        pad("ID", 8),
        pad("TIMESTAMP", 16),
        pad("WORKER", 24),
        pad("KIND", 9),
        pad("ORIGIN", 9),
        "STATUS"
    );
    for p in punches {
        println!(
            "{} {} {} {} {} {}",
            pad(short_id(&p.id), 8),
            pad(&p.timestamp_str(), 16),
            pad(&p.worker_name, 24),
            pad(p.kind.to_db_str(), 9),
            pad(p.origin.to_db_str(), 9),
            p.status.to_db_str()
        );
    }

    Ok(())
}
