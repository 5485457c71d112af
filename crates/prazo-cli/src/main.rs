use clap::{CommandFactory, Parser, Subcommand};

mod commands;
mod common;
mod usage_log;

#[derive(Parser)]
#[command(name = "prazo-cli", version, about = "Prazo CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a deadline from an availability date
    Calculate(commands::calculate::CalculateArgs),
    /// Classify a single date against the calendar
    Classify(commands::classify::ClassifyArgs),
    /// Classify a filing date against two scenario finals
    Timeliness(commands::timeliness::TimelinessArgs),
    /// Inspect or export the effective calendar
    Calendar {
        #[command(subcommand)]
        action: commands::calendar::CalendarAction,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Calculate(args) => commands::calculate::run(args),
        Commands::Classify(args) => commands::classify::run(args),
        Commands::Timeliness(args) => commands::timeliness::run(args),
        Commands::Calendar { action } => commands::calendar::run(action),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "prazo-cli", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
