use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use prazo_core::{is_weekend, DecreePolicy, SuspensionEvent};

use crate::common::{self, CliResult};

#[derive(Args)]
pub struct ClassifyArgs {
    /// Date to classify (YYYY-MM-DD)
    #[arg(long)]
    pub date: String,
    /// Treat every decree-layer entry as proven
    #[arg(long)]
    pub assume_proven: bool,
    /// Attested suspension dates (comma separated, YYYY-MM-DD)
    #[arg(long, value_delimiter = ',')]
    pub proven: Vec<String>,
    /// Disregard the forced recess
    #[arg(long)]
    pub ignore_recess: bool,
    /// Calendar snapshot file (JSON or TOML) instead of the built-in data
    #[arg(long)]
    pub calendar: Option<PathBuf>,
    /// Extra calendar years to load from the built-in data
    #[arg(long, value_delimiter = ',')]
    pub years: Vec<i32>,
    /// Print the classification as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct Classification {
    date: chrono::NaiveDate,
    business_day: bool,
    weekend: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    exception: Option<SuspensionEvent>,
}

pub fn run(args: ClassifyArgs) -> CliResult {
    let date = common::parse_date(&args.date)?;
    let proven = common::parse_proven(&args.proven)?;
    let snapshot = common::load_snapshot(args.calendar.as_deref(), &args.years)?;

    let policy = if args.assume_proven {
        DecreePolicy::AssumeAll
    } else {
        DecreePolicy::Attested(&proven)
    };
    let classifier = snapshot
        .classifier(policy)
        .with_ignore_recess(args.ignore_recess);

    let exception = classifier.classify(date);
    let weekend = is_weekend(date);
    let classification = Classification {
        date,
        business_day: !weekend && exception.is_none(),
        weekend,
        exception,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&classification)?);
        return Ok(());
    }

    if classification.business_day {
        println!("{}: dia útil", prazo_core::format_br(date));
    } else if let Some(exc) = &classification.exception {
        println!(
            "{}: {:?} -- {}",
            prazo_core::format_br(date),
            exc.kind,
            exc.reason
        );
    } else {
        println!("{}: fim de semana", prazo_core::format_br(date));
    }
    Ok(())
}
