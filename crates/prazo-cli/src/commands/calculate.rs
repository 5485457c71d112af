use std::path::PathBuf;

use clap::{Args, ValueEnum};
use serde::Serialize;

use prazo_core::{
    calculate, format_br, CalculationOutcome, CalculationRequest, MatterType, Timeliness,
    UsageRecord, UsageSink,
};

use crate::common::{self, CliResult};
use crate::usage_log::JsonlSink;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MatterArg {
    Civil,
    Criminal,
}

impl From<MatterArg> for MatterType {
    fn from(value: MatterArg) -> Self {
        match value {
            MatterArg::Civil => MatterType::Civil,
            MatterArg::Criminal => MatterType::Criminal,
        }
    }
}

#[derive(Args)]
pub struct CalculateArgs {
    /// Availability date in the electronic gazette (YYYY-MM-DD)
    #[arg(long)]
    pub availability: String,
    /// Deadline length: business days (civil) or calendar days (criminal)
    #[arg(long)]
    pub days: u32,
    /// Matter type
    #[arg(long, value_enum, default_value = "civil")]
    pub matter: MatterArg,
    /// Disregard the forced recess (criminal matters only)
    #[arg(long)]
    pub ignore_recess: bool,
    /// Attested suspension dates (comma separated, YYYY-MM-DD)
    #[arg(long, value_delimiter = ',')]
    pub proven: Vec<String>,
    /// Filing date to classify against the computed deadline
    #[arg(long)]
    pub filing: Option<String>,
    /// Case number, shown and logged but never interpreted
    #[arg(long)]
    pub process: Option<String>,
    /// Calendar snapshot file (JSON or TOML) instead of the built-in data
    #[arg(long)]
    pub calendar: Option<PathBuf>,
    /// Extra calendar years to load from the built-in data
    #[arg(long, value_delimiter = ',')]
    pub years: Vec<i32>,
    /// Print the step-by-step audit trail
    #[arg(long)]
    pub trace: bool,
    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    #[serde(flatten)]
    outcome: &'a CalculationOutcome,
    placeholders: std::collections::BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timeliness: Option<Timeliness>,
}

pub fn run(args: CalculateArgs) -> CliResult {
    let availability = common::parse_date(&args.availability)?;
    let proven = common::parse_proven(&args.proven)?;
    let filing = args.filing.as_deref().map(common::parse_date).transpose()?;
    let snapshot = common::load_snapshot(args.calendar.as_deref(), &args.years)?;

    let request = CalculationRequest {
        availability,
        length_days: args.days,
        matter: args.matter.into(),
        ignore_recess: args.ignore_recess,
        process_number: args.process.clone(),
    };
    let outcome = calculate(&snapshot, &request, &proven)?;

    JsonlSink::new().record(&UsageRecord::from_outcome(&outcome));

    let timeliness = filing.map(|date| outcome.timeliness(date));

    if args.json {
        let output = JsonOutput {
            placeholders: outcome.placeholders(),
            outcome: &outcome,
            timeliness,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if let Some(process) = &outcome.process_number {
        println!("Processo: {process}");
    }
    println!("Disponibilização: {}", format_br(outcome.availability));
    println!("Publicação:       {}", format_br(outcome.publication_date));
    println!("Início do prazo:  {}", format_br(outcome.deadline_start));
    println!();
    println!(
        "Prazo final (sem comprovação): {}",
        format_br(outcome.unproven.final_date_prorogated)
    );
    println!(
        "Prazo final (com comprovação): {}",
        format_br(outcome.proven.final_date_prorogated)
    );

    if !outcome.provable_suspensions.is_empty() {
        println!();
        println!("Suspensões comprováveis:");
        common::print_suspensions(&outcome.provable_suspensions);
    }

    if let Some(verdict) = timeliness {
        println!();
        let label = match verdict {
            Timeliness::Timely => "tempestivo",
            Timeliness::Untimely => "intempestivo",
            Timeliness::UntimelyPendingDecreeProof => {
                "intempestivo, salvo comprovação de suspensão"
            }
        };
        println!("Tempestividade: {label}");
    }

    if args.trace {
        println!();
        for step in &outcome.trace {
            println!("{}", render_step(step));
        }
    }

    Ok(())
}

fn render_step(step: &prazo_core::TraceStep) -> String {
    use prazo_core::TraceStep::*;
    let body = match step {
        Availability { date }
        | Publication { date }
        | CountStart { date }
        | FinalDate { date }
        | FinalDateProrogated { date }
        | TransitionOverride { date } => format_br(*date),
        AvailabilitySuspensions { events }
        | PublicationToStartInterval { events }
        | CourseSuspensions { events }
        | Prorogations { events } => {
            if events.is_empty() {
                "-".to_string()
            } else {
                events
                    .iter()
                    .map(|e| format_br(e.date))
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        }
    };
    format!("{}: {}", step.label(), body)
}
