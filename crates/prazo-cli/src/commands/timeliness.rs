use clap::Args;

use prazo_core::{classify_filing, Timeliness};

use crate::common::{self, CliResult};

#[derive(Args)]
pub struct TimelinessArgs {
    /// Filing date (YYYY-MM-DD)
    #[arg(long)]
    pub filing: String,
    /// Final date of the unproven scenario (YYYY-MM-DD)
    #[arg(long)]
    pub unproven_final: String,
    /// Final date of the proven scenario (YYYY-MM-DD)
    #[arg(long)]
    pub proven_final: String,
    /// Print the verdict as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: TimelinessArgs) -> CliResult {
    let filing = common::parse_date(&args.filing)?;
    let unproven_final = common::parse_date(&args.unproven_final)?;
    let proven_final = common::parse_date(&args.proven_final)?;

    let verdict = classify_filing(filing, unproven_final, proven_final);

    if args.json {
        println!("{}", serde_json::to_string(&verdict)?);
        return Ok(());
    }

    let label = match verdict {
        Timeliness::Timely => "tempestivo",
        Timeliness::Untimely => "intempestivo",
        Timeliness::UntimelyPendingDecreeProof => "intempestivo, salvo comprovação de suspensão",
    };
    println!("{label}");
    Ok(())
}
