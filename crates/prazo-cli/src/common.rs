//! Shared helpers for CLI commands: date parsing, snapshot loading and
//! output formatting.

use std::path::Path;

use chrono::{Datelike, NaiveDate, Utc};

use prazo_core::calendar::builtin::snapshot_for_years;
use prazo_core::{format_br, CalendarSnapshot, ProvenSet, SuspensionEvent};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Parse an ISO `YYYY-MM-DD` date argument.
pub fn parse_date(value: &str) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("invalid date '{value}' (expected YYYY-MM-DD): {e}").into())
}

/// Parse a list of ISO dates into a proven set.
pub fn parse_proven(values: &[String]) -> Result<ProvenSet, Box<dyn std::error::Error>> {
    let mut proven = ProvenSet::new();
    for value in values {
        proven.insert(parse_date(value)?);
    }
    Ok(proven)
}

/// Load the calendar snapshot: a JSON or TOML file when given, otherwise
/// the built-in national calendar for the requested years plus the
/// current and next year.
pub fn load_snapshot(
    path: Option<&Path>,
    years: &[i32],
) -> Result<CalendarSnapshot, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            let snapshot = if path.extension().is_some_and(|ext| ext == "toml") {
                CalendarSnapshot::from_toml_str(&raw)?
            } else {
                CalendarSnapshot::from_json_str(&raw)?
            };
            Ok(snapshot)
        }
        None => {
            let current = Utc::now().date_naive().year();
            let mut all: Vec<i32> = years.to_vec();
            all.push(current);
            all.push(current + 1);
            all.sort_unstable();
            all.dedup();
            Ok(snapshot_for_years(&all))
        }
    }
}

/// Render a suspension list as indented lines, or a dash when empty.
pub fn print_suspensions(events: &[SuspensionEvent]) {
    if events.is_empty() {
        println!("  -");
        return;
    }
    for event in events {
        println!("  {}  {:?}  {}", format_br(event.date), event.kind, event.reason);
    }
}
