mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::calculate::CalculateArgs;
use commands::convert::ConvertArgs;
use commands::share::{DecodeArgs, ShareArgs};

/// Thai property transfer cost calculations
#[derive(Parser)]
#[command(
    name = "ttax",
    version,
    about = "Thai property transfer fee and tax calculations",
    long_about = "Computes the government fees and taxes owed when a property changes \
                  ownership in Thailand: transfer fee, specific business tax, stamp duty, \
                  withholding tax, and mortgage registration, with buyer/seller fee \
                  splits and the reduced-rate incentive comparison."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the full transfer cost breakdown
    Calculate(CalculateArgs),
    /// Encode a calculation input as shareable query parameters
    Share(ShareArgs),
    /// Decode shareable query parameters back to a canonical input
    Decode(DecodeArgs),
    /// Convert an amount between currencies using a supplied rate table
    Convert(ConvertArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Calculate(args) => commands::calculate::run_calculate(args),
        Commands::Share(args) => commands::share::run_share(args),
        Commands::Decode(args) => commands::share::run_decode(args),
        Commands::Convert(args) => commands::convert::run_convert(args),
        Commands::Version => {
            println!("ttax {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
