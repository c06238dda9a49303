mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "hamntaxa",
    version,
    about = "Deterministic port tariff calculator for structured vessel call queries"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the itemized tariff for a vessel call described in a JSON query file
    Calculate {
        /// Path to a JSON query file (vessel type, tonnages, quantities, ...)
        query_file: PathBuf,

        /// Custom JSON tariff dataset
        #[arg(short, long = "rules", value_name = "FILE")]
        rules: Option<PathBuf>,

        /// Predefined tariff dataset (default: gothenburg-2025)
        #[arg(short, long = "preset", value_name = "NAME")]
        preset: Option<String>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write the result to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// Show rule descriptions and band details per line item
        #[arg(long)]
        verbose: bool,
    },
    /// Manage and inspect tariff datasets
    Rules {
        #[command(subcommand)]
        action: RulesAction,
    },
}

#[derive(Subcommand)]
enum RulesAction {
    /// List predefined tariff datasets
    List,
    /// Explain a dataset's rules in plain language
    Explain {
        /// Preset name (e.g., "gothenburg-2025")
        preset: String,
    },
    /// Print the JSON schema for rule files with field descriptions and example
    Schema,
    /// Validate a custom tariff dataset file
    Validate {
        /// Path to JSON dataset file
        file: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Calculate {
            query_file,
            rules,
            preset,
            output,
            out,
            verbose,
        } => commands::calculate::run(query_file, rules, preset, &output, out, verbose),
        Commands::Rules { action } => match action {
            RulesAction::List => commands::rules::list(),
            RulesAction::Explain { preset } => commands::rules::explain(&preset),
            RulesAction::Schema => commands::rules::schema(),
            RulesAction::Validate { file } => commands::rules::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
