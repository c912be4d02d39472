use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use precatorio_core::tax::irpf::{calculate_irpf, IrpfInput};
use precatorio_core::tax::pss::{calculate_pss, PssInput};

use crate::input;

/// Arguments for RRA income-tax withholding
#[derive(Args)]
pub struct IrpfArgs {
    /// Execution-period total (principal + interest + penalties)
    #[arg(long)]
    pub execution_total: Option<Decimal>,

    /// Months elapsed in the execution period
    #[arg(long)]
    pub elapsed_months: Option<u32>,

    /// Corrected value the tax is levied on
    #[arg(long)]
    pub corrected_value: Option<Decimal>,

    /// Path to a JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for PSS withholding
#[derive(Args)]
pub struct PssArgs {
    /// Amount the contribution applies to
    #[arg(long)]
    pub base: Option<Decimal>,

    /// Contribution rate in percentage points (defaults to the statutory 11%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Exemption flag: forces the deduction to zero
    #[arg(long)]
    pub exempt: bool,

    /// Path to a JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_irpf(args: IrpfArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let irpf_input: IrpfInput = if let Some(ref path) = args.input {
        input::read_file(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        IrpfInput {
            execution_total: args
                .execution_total
                .ok_or("--execution-total is required (or provide --input)")?,
            elapsed_months: args
                .elapsed_months
                .ok_or("--elapsed-months is required (or provide --input)")?,
            corrected_value: args
                .corrected_value
                .ok_or("--corrected-value is required (or provide --input)")?,
        }
    };

    let result = calculate_irpf(&irpf_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_pss(args: PssArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let pss_input: PssInput = if let Some(ref path) = args.input {
        input::read_file(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        PssInput {
            base: args.base.ok_or("--base is required (or provide --input)")?,
            rate: args.rate.unwrap_or(dec!(11)),
            exempt: args.exempt,
        }
    };

    let result = calculate_pss(&pss_input)?;
    Ok(serde_json::to_value(result)?)
}
