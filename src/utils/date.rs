use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

use crate::errors::{AppError, AppResult};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

pub fn parse_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M").ok()
}

pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").ok()
}

fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let first_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    first_next.unwrap().pred_opt().unwrap()
}

/// First and last day covered by a single period token:
/// `YYYY-MM-DD`, `YYYY-MM` or `YYYY`.
fn period_days(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    // YYYY-MM-DD
    if let Some(d) = parse_date(p) {
        return Ok((d, d));
    }

    // YYYY-MM
    if let Ok(first) = NaiveDate::parse_from_str(&format!("{}-01", p), "%Y-%m-%d") {
        return Ok((first, last_day_of_month(first.year(), first.month())));
    }

    // YYYY
    if let Ok(year) = p.parse::<i32>() {
        let first = NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(|| AppError::InvalidPeriod(p.to_string()))?;
        return Ok((first, NaiveDate::from_ymd_opt(year, 12, 31).unwrap()));
    }

    Err(AppError::InvalidPeriod(p.to_string()))
}

/// Inclusive timestamp bounds for a period expression. A `..` separates a
/// custom range; each side takes any single-period form.
pub fn period_bounds(p: &str) -> AppResult<(NaiveDateTime, NaiveDateTime)> {
    let (first, last) = match p.split_once("..") {
        Some((a, b)) => {
            let (first, _) = period_days(a.trim())?;
            let (_, last) = period_days(b.trim())?;
            (first, last)
        }
        None => period_days(p.trim())?,
    };

    if last < first {
        return Err(AppError::InvalidPeriod(p.to_string()));
    }

    Ok((
        first.and_time(NaiveTime::from_hms_opt(0, 0, 0).unwrap()),
        last.and_time(NaiveTime::from_hms_opt(23, 59, 0).unwrap()),
    ))
}
