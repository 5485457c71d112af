use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};

use prazo_core::format_br;

use crate::common::{self, CliResult};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    Json,
    Toml,
}

#[derive(Subcommand)]
pub enum CalendarAction {
    /// List the exception days of the effective calendar
    Show {
        /// Calendar years to include from the built-in data
        #[arg(long, value_delimiter = ',')]
        years: Vec<i32>,
        /// Calendar snapshot file (JSON or TOML) instead of the built-in data
        #[arg(long)]
        calendar: Option<PathBuf>,
    },
    /// Export the effective calendar as a snapshot document
    Export {
        #[arg(long, value_delimiter = ',')]
        years: Vec<i32>,
        #[arg(long)]
        calendar: Option<PathBuf>,
        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: ExportFormat,
        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

pub fn run(action: CalendarAction) -> CliResult {
    match action {
        CalendarAction::Show { years, calendar } => {
            let snapshot = common::load_snapshot(calendar.as_deref(), &years)?;
            println!("Feriados:");
            for (date, exc) in &snapshot.maps.holidays {
                println!("  {}  {}", format_br(*date), exc.reason);
            }
            println!("Decretos e suspensões CNJ:");
            for (date, exc) in &snapshot.maps.decrees {
                println!("  {}  {:?}  {}", format_br(*date), exc.kind, exc.reason);
            }
            if !snapshot.maps.instability.is_empty() {
                println!("Indisponibilidades:");
                for (date, exc) in &snapshot.maps.instability {
                    println!("  {}  {}", format_br(*date), exc.reason);
                }
            }
            println!("Recesso:");
            for range in &snapshot.recess.ranges {
                println!(
                    "  {:02}/{:02} -- {:02}/{:02}",
                    range.start_day, range.start_month, range.end_day, range.end_month
                );
            }
            Ok(())
        }
        CalendarAction::Export {
            years,
            calendar,
            format,
            output,
        } => {
            let snapshot = common::load_snapshot(calendar.as_deref(), &years)?;
            let document = match format {
                ExportFormat::Json => snapshot.to_json()?,
                ExportFormat::Toml => toml::to_string_pretty(&snapshot)?,
            };
            match output {
                Some(path) => std::fs::write(path, document)?,
                None => println!("{document}"),
            }
            Ok(())
        }
    }
}
