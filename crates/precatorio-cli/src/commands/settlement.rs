use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use precatorio_core::indices::tables::IndexTables;
use precatorio_core::settlement::pipeline::{calculate_settlement, SettlementInput};

use crate::commands::parse_date;
use crate::input;

/// Arguments for the full settlement pipeline. Manual overrides and heir
/// quotas only travel through the input file or stdin.
#[derive(Args)]
pub struct SettleArgs {
    /// Principal amount of the case
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Base date of the case (YYYY-MM-DD or YYYY-MM)
    #[arg(long)]
    pub base_date: Option<String>,

    /// Calculation cutoff date (YYYY-MM-DD or YYYY-MM)
    #[arg(long)]
    pub final_date: Option<String>,

    /// Months elapsed in the execution period
    #[arg(long)]
    pub elapsed_months: Option<u32>,

    /// Execution-period total for RRA bracket selection
    #[arg(long)]
    pub execution_total: Option<Decimal>,

    /// PSS exemption flag
    #[arg(long)]
    pub pss_exempt: bool,

    /// PSS rate in percentage points
    #[arg(long)]
    pub pss_percent: Option<Decimal>,

    /// Contractual attorney fee percentage
    #[arg(long, default_value = "0")]
    pub attorney_fee_percent: Decimal,

    /// Advance-payment deduction percentage
    #[arg(long, default_value = "0")]
    pub advance_payment_percent: Decimal,

    /// Floor offer percentage of the net base
    #[arg(long)]
    pub floor_percent: Option<Decimal>,

    /// Ceiling offer percentage of the net base
    #[arg(long)]
    pub ceiling_percent: Option<Decimal>,

    /// Path to a JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_settle(args: SettleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let settlement_input: SettlementInput = if let Some(ref path) = args.input {
        input::read_file(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        SettlementInput {
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
            elapsed_months: args
                .elapsed_months
                .ok_or("--elapsed-months is required (or provide --input)")?,
            execution_total: args
                .execution_total
                .ok_or("--execution-total is required (or provide --input)")?,
            pss_exempt: args.pss_exempt,
            pss_percent: args.pss_percent,
            attorney_fee_percent: args.attorney_fee_percent,
            advance_payment_percent: args.advance_payment_percent,
            floor_percent: args
                .floor_percent
                .ok_or("--floor-percent is required (or provide --input)")?,
            ceiling_percent: args
                .ceiling_percent
                .ok_or("--ceiling-percent is required (or provide --input)")?,
            manual_override: None,
            heir_quotas: None,
        }
    };

    let tables = IndexTables::brazil();
    let result = calculate_settlement(&settlement_input, &tables)?;
    Ok(serde_json::to_value(result)?)
}
