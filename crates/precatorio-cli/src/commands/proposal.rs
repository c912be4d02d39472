use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use precatorio_core::settlement::proposal::{
    derive_offers, split_heirs, HeirQuota, ManualOffer, OfferInput,
};

use crate::input;

/// Arguments for offer derivation
#[derive(Args)]
pub struct ProposalArgs {
    /// Net base after every deduction
    #[arg(long)]
    pub net_base: Option<Decimal>,

    /// Floor offer percentage of the net base
    #[arg(long)]
    pub floor_percent: Option<Decimal>,

    /// Ceiling offer percentage of the net base
    #[arg(long)]
    pub ceiling_percent: Option<Decimal>,

    /// Manually negotiated floor offer (requires --manual-ceiling)
    #[arg(long, requires = "manual_ceiling")]
    pub manual_floor: Option<Decimal>,

    /// Manually negotiated ceiling offer (requires --manual-floor)
    #[arg(long, requires = "manual_floor")]
    pub manual_ceiling: Option<Decimal>,

    /// Path to a JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for an heir split
#[derive(Args)]
pub struct SplitArgs {
    /// Amount to split
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Heir quota as `id=percent`, repeatable (e.g. --quota h1=50 --quota h2=50)
    #[arg(long = "quota")]
    pub quotas: Vec<String>,

    /// Path to a JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(serde::Deserialize)]
struct SplitRequest {
    amount: Decimal,
    quotas: Vec<HeirQuota>,
}

pub fn run_proposal(args: ProposalArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let offer_input: OfferInput = if let Some(ref path) = args.input {
        input::read_file(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let manual_override = match (args.manual_floor, args.manual_ceiling) {
            (Some(floor_offer), Some(ceiling_offer)) => Some(ManualOffer {
                floor_offer,
                ceiling_offer,
            }),
            _ => None,
        };
        OfferInput {
            net_base: args
                .net_base
                .ok_or("--net-base is required (or provide --input)")?,
            floor_percent: args
                .floor_percent
                .ok_or("--floor-percent is required (or provide --input)")?,
            ceiling_percent: args
                .ceiling_percent
                .ok_or("--ceiling-percent is required (or provide --input)")?,
            manual_override,
        }
    };

    let result = derive_offers(&offer_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_split(args: SplitArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: SplitRequest = if let Some(ref path) = args.input {
        input::read_file(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        SplitRequest {
            amount: args
                .amount
                .ok_or("--amount is required (or provide --input)")?,
            quotas: parse_quota_flags(&args.quotas)?,
        }
    };

    let shares = split_heirs(request.amount, &request.quotas)?;
    Ok(serde_json::to_value(shares)?)
}

fn parse_quota_flags(raw: &[String]) -> Result<Vec<HeirQuota>, Box<dyn std::error::Error>> {
    if raw.is_empty() {
        return Err("at least one --quota id=percent is required (or provide --input)".into());
    }
    raw.iter()
        .map(|entry| {
            let (id, pct) = entry
                .split_once('=')
                .ok_or_else(|| format!("Invalid quota '{entry}': expected id=percent"))?;
            let quota_percent: Decimal = pct
                .parse()
                .map_err(|_| format!("Invalid quota percentage in '{entry}'"))?;
            Ok(HeirQuota {
                heir_id: id.to_string(),
                quota_percent,
            })
        })
        .collect()
}
