//! The full settlement chain over a case record.
//!
//! Correction, PSS, RRA income tax, contractual attorney fees and
//! advance-payment deductions, then the negotiable offer band and an
//! optional heir split. Pure and idempotent: the host recomputes on every
//! input change and persists the returned envelope as a snapshot only when
//! the operator finalizes, so revised index tables never rewrite a closed
//! case.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use chrono::NaiveDate;

use crate::correction::engine::{correct_value, CorrectionInput, CorrectionOutput};
use crate::error::PrecatorioError;
use crate::indices::tables::IndexTables;
use crate::settlement::proposal::{
    derive_offers, validate_quotas, HeirQuota, ManualOffer, OfferInput, ProposalOutput,
};
use crate::tax::irpf::{calculate_irpf, IrpfInput, IrpfOutput};
use crate::tax::pss::{calculate_pss, PssInput};
use crate::types::*;
use crate::PrecatorioResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementInput {
    pub principal: Money,
    pub base_date: NaiveDate,
    /// Calculation cutoff, supplied by the caller ("today" is the host's
    /// decision, never read from the clock here).
    pub final_date: NaiveDate,
    /// Execution-period length in months, the RRA divisor.
    pub elapsed_months: u32,
    /// Execution-period total (principal + interest + penalties) averaged
    /// for IRPF bracket selection.
    pub execution_total: Money,
    pub pss_exempt: bool,
    /// PSS rate in percentage points; absent means no PSS withholding.
    #[serde(default)]
    pub pss_percent: Option<Percent>,
    pub attorney_fee_percent: Percent,
    pub advance_payment_percent: Percent,
    pub floor_percent: Percent,
    pub ceiling_percent: Percent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_override: Option<ManualOffer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heir_quotas: Option<Vec<HeirQuota>>,
}

/// One heir's slice of the settlement, over the net base and both offers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeirSettlementShare {
    pub heir_id: String,
    pub quota_percent: Percent,
    pub net_amount: Money,
    pub floor_amount: Money,
    pub ceiling_amount: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementOutput {
    pub corrected_value: Money,
    /// Full correction breakdown for the statement.
    pub correction: CorrectionOutput,
    pub pss_deduction: Money,
    pub tax: IrpfOutput,
    pub attorney_fee_value: Money,
    pub advance_payment_value: Money,
    /// `corrected - pss - net_tax - attorney - advance`, clamped at zero.
    pub net_base: Money,
    /// Set when the deduction chain drove the net base below zero. A
    /// clamped zero is materially different from "not yet calculated".
    pub net_base_clamped: bool,
    pub proposal: ProposalOutput,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heir_shares: Option<Vec<HeirSettlementShare>>,
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Run the whole settlement computation for a case.
pub fn calculate_settlement(
    input: &SettlementInput,
    tables: &IndexTables,
) -> PrecatorioResult<ComputationOutput<SettlementOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    for (field, pct) in [
        ("attorney_fee_percent", input.attorney_fee_percent),
        ("advance_payment_percent", input.advance_payment_percent),
    ] {
        if pct < dec!(0) {
            return Err(PrecatorioError::InvalidInput {
                field: field.to_string(),
                reason: "Deduction percentage cannot be negative".to_string(),
            });
        }
        if pct > dec!(100) {
            warnings.push(format!("{field} above 100%"));
        }
    }
    if let Some(rate) = input.pss_percent {
        if rate < dec!(0) {
            return Err(PrecatorioError::InvalidInput {
                field: "pss_percent".to_string(),
                reason: "PSS rate cannot be negative".to_string(),
            });
        }
    }

    // Stage 1: monetary correction.
    let correction = correct_value(
        &CorrectionInput {
            principal: input.principal,
            base_date: input.base_date,
            final_date: input.final_date,
        },
        tables,
    )?;
    for w in &correction.warnings {
        warnings.push(format!("correction: {w}"));
    }
    let corrected_value = correction.result.corrected_value;

    // Stage 2: PSS withholding over the corrected value.
    let pss = calculate_pss(&PssInput {
        base: corrected_value,
        rate: input.pss_percent.unwrap_or(Decimal::ZERO),
        exempt: input.pss_exempt,
    })?;
    for w in &pss.warnings {
        warnings.push(format!("pss: {w}"));
    }
    let pss_deduction = pss.result.deduction;

    // Stage 3: RRA income tax. Bracket from the monthly-averaged execution
    // total, levy on the corrected value.
    let tax = calculate_irpf(&IrpfInput {
        execution_total: input.execution_total,
        elapsed_months: input.elapsed_months,
        corrected_value,
    })?;
    for w in &tax.warnings {
        warnings.push(format!("irpf: {w}"));
    }

    // Stage 4: contractual deductions over the corrected value.
    let attorney_fee_value = corrected_value * input.attorney_fee_percent / dec!(100);
    let advance_payment_value = corrected_value * input.advance_payment_percent / dec!(100);

    // Stage 5: net base, clamped at zero but never silently.
    let raw_net_base = corrected_value
        - pss_deduction
        - tax.result.net_tax
        - attorney_fee_value
        - advance_payment_value;
    let net_base_clamped = raw_net_base < dec!(0);
    if net_base_clamped {
        warnings.push(format!(
            "Deductions exceed the corrected value by {}; net base clamped to zero",
            -raw_net_base
        ));
    }
    let net_base = raw_net_base.max(Decimal::ZERO);

    // Stage 6: offer band.
    let proposal = derive_offers(&OfferInput {
        net_base,
        floor_percent: input.floor_percent,
        ceiling_percent: input.ceiling_percent,
        manual_override: input.manual_override.clone(),
    })?;
    for w in &proposal.warnings {
        warnings.push(format!("proposal: {w}"));
    }

    // Stage 7: optional heir split of the net base and both offers.
    let heir_shares = match &input.heir_quotas {
        Some(quotas) => {
            validate_quotas(quotas)?;
            let floor = proposal.result.floor_offer;
            let ceiling = proposal.result.ceiling_offer;
            let shares = quotas
                .iter()
                .map(|q| {
                    let slice = |amount: Money| (amount * q.quota_percent / dec!(100)).round_dp(2);
                    HeirSettlementShare {
                        heir_id: q.heir_id.clone(),
                        quota_percent: q.quota_percent,
                        net_amount: slice(net_base),
                        floor_amount: slice(floor),
                        ceiling_amount: slice(ceiling),
                    }
                })
                .collect();
            Some(shares)
        }
        None => None,
    };

    let result = SettlementOutput {
        corrected_value,
        correction: correction.result,
        pss_deduction,
        tax: tax.result,
        attorney_fee_value,
        advance_payment_value,
        net_base,
        net_base_clamped,
        proposal: proposal.result,
        heir_shares,
    };

    let assumptions = serde_json::json!({
        "principal": input.principal.to_string(),
        "base_date": input.base_date.to_string(),
        "final_date": input.final_date.to_string(),
        "elapsed_months": input.elapsed_months,
        "execution_total": input.execution_total.to_string(),
        "pss_exempt": input.pss_exempt,
        "pss_percent": input.pss_percent.map(|p| p.to_string()),
        "attorney_fee_percent": input.attorney_fee_percent.to_string(),
        "advance_payment_percent": input.advance_payment_percent.to_string(),
        "floor_percent": input.floor_percent.to_string(),
        "ceiling_percent": input.ceiling_percent.to_string(),
        "heirs": input.heir_quotas.as_ref().map(|q| q.len()).unwrap_or(0),
    });

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Settlement: regime-partitioned correction, PSS, RRA income tax, contractual \
         deductions, clamped net base, offer band and optional heir split",
        &assumptions,
        warnings,
        elapsed,
        result,
    ))
}
