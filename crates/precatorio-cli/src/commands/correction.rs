use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use precatorio_core::correction::engine::{correct_value, CorrectionInput};
use precatorio_core::indices::tables::IndexTables;

use crate::commands::parse_date;
use crate::input;

/// Arguments for monetary correction
#[derive(Args)]
pub struct CorrectArgs {
    /// Principal amount to correct
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Base date of the case (YYYY-MM-DD or YYYY-MM)
    #[arg(long)]
    pub base_date: Option<String>,

    /// Calculation cutoff date (YYYY-MM-DD or YYYY-MM)
    #[arg(long)]
    pub final_date: Option<String>,

    /// Path to a JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_correct(args: CorrectArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let correction_input: CorrectionInput = if let Some(ref path) = args.input {
        input::read_file(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        CorrectionInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            base_date: parse_date(
                args.base_date
                    .as_deref()
                    .ok_or("--base-date is required (or provide --input)")?,
            )?,
            final_date: parse_date(
                args.final_date
                    .as_deref()
                    .ok_or("--final-date is required (or provide --input)")?,
            )?,
        }
    };

    let tables = IndexTables::brazil();
    let result = correct_value(&correction_input, &tables)?;
    Ok(serde_json::to_value(result)?)
}
