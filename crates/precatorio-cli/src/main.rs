mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::correction::CorrectArgs;
use commands::indices::IndicesArgs;
use commands::proposal::{ProposalArgs, SplitArgs};
use commands::settlement::SettleArgs;
use commands::tax::{IrpfArgs, PssArgs};

/// Precatório settlement calculations
#[derive(Parser)]
#[command(
    name = "prec",
    version,
    about = "Precatório settlement calculations",
    long_about = "A CLI for valuing precatórios with decimal precision: regime-partitioned \
                  monetary correction (legacy factor table, SELIC 2022-2024, IPCA-E 2025+), \
                  RRA income-tax withholding, PSS, offer derivation and heir splits."
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
    /// Monetary correction of a principal between two dates
    Correct(CorrectArgs),
    /// RRA income-tax withholding (two-base method)
    Irpf(IrpfArgs),
    /// PSS pension withholding
    Pss(PssArgs),
    /// Floor/ceiling purchase offers from a net base
    Proposal(ProposalArgs),
    /// Split an amount across heirs by declared quotas
    Split(SplitArgs),
    /// Full settlement pipeline for a case
    Settle(SettleArgs),
    /// Coverage of the embedded index tables
    Indices(IndicesArgs),
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
        Commands::Correct(args) => commands::correction::run_correct(args),
        Commands::Irpf(args) => commands::tax::run_irpf(args),
        Commands::Pss(args) => commands::tax::run_pss(args),
        Commands::Proposal(args) => commands::proposal::run_proposal(args),
        Commands::Split(args) => commands::proposal::run_split(args),
        Commands::Settle(args) => commands::settlement::run_settle(args),
        Commands::Indices(args) => commands::indices::run_indices(args),
        Commands::Version => {
            println!("prec {}", env!("CARGO_PKG_VERSION"));
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
