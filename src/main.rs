//! Command-line interface for treegen
//!
//! # Usage Examples
//!
//! ```bash
//! # Generate the default dataset (20 transactions, 25 patterns)
//! treegen generate --output output.csv
//!
//! # Larger dataset with explicit parameters
//! treegen generate --output data.csv \
//!   --total-trees 1000 --total-patterns 50 --avg-pattern-length 4 \
//!   --total-fields 10 --values-per-field 100 --threshold 5 --seed 7
//!
//! # Parameters from a YAML file, dumping the planted patterns
//! treegen generate --config dataset.yaml --output data.csv --print-patterns
//!
//! # Turn the dump back off for a config file that enables it
//! treegen generate --config dataset.yaml --output data.csv --print-patterns=false
//! ```

use clap::{Parser, Subcommand};
use treegen::{log_filter, run_generate, CsvGenerateArgs};

#[derive(Parser)]
#[command(name = "treegen")]
#[command(about = "Synthesize labeled tree datasets with planted frequent subtree patterns")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a dataset and write it as CSV
    Generate {
        #[command(flatten)]
        args: CsvGenerateArgs,
    },
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { args } => {
            run_generate(args)?;
        }
    }

    Ok(())
}
