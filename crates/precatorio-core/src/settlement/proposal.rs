//! Purchase-offer derivation and heir splitting.
//!
//! The floor and ceiling offers are two independently configured
//! percentages of the net base. An operator can override both with manually
//! negotiated figures, but the automatic values are always carried along so
//! the comparison stays on screen. Heir quotas must close to 100% within a
//! centesimal tolerance; a mismatch is rejected with the computed sum, never
//! silently rescaled, because the quota split mirrors the formal partilha.

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::PrecatorioError;
use crate::types::*;
use crate::PrecatorioResult;

/// Accepted deviation of a quota sum from 100%.
pub const QUOTA_SUM_TOLERANCE: Percent = dec!(0.01);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualOffer {
    pub floor_offer: Money,
    pub ceiling_offer: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferInput {
    pub net_base: Money,
    pub floor_percent: Percent,
    pub ceiling_percent: Percent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_override: Option<ManualOffer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalOutput {
    /// Effective floor offer (manual when overridden).
    pub floor_offer: Money,
    /// Effective ceiling offer (manual when overridden).
    pub ceiling_offer: Money,
    /// What the configured percentages produce, kept for comparison even
    /// under a manual override.
    pub computed_floor: Money,
    pub computed_ceiling: Money,
    pub manual: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeirQuota {
    pub heir_id: String,
    pub quota_percent: Percent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeirShare {
    pub heir_id: String,
    pub quota_percent: Percent,
    pub amount: Money,
}

// ---------------------------------------------------------------------------
// Offers
// ---------------------------------------------------------------------------

/// Derive the floor and ceiling purchase offers from the net base.
pub fn derive_offers(input: &OfferInput) -> PrecatorioResult<ComputationOutput<ProposalOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.net_base < dec!(0) {
        return Err(PrecatorioError::InvalidInput {
            field: "net_base".to_string(),
            reason: "Net base cannot be negative".to_string(),
        });
    }
    for (field, pct) in [
        ("floor_percent", input.floor_percent),
        ("ceiling_percent", input.ceiling_percent),
    ] {
        if pct < dec!(0) {
            return Err(PrecatorioError::InvalidInput {
                field: field.to_string(),
                reason: "Offer percentage cannot be negative".to_string(),
            });
        }
        if pct > dec!(100) {
            warnings.push(format!("{field} above 100%: offer exceeds the net base"));
        }
    }
    if input.floor_percent > input.ceiling_percent {
        warnings.push("Floor percentage above ceiling percentage".to_string());
    }

    let computed_floor = (input.net_base * input.floor_percent / dec!(100)).round_dp(2);
    let computed_ceiling = (input.net_base * input.ceiling_percent / dec!(100)).round_dp(2);

    let (floor_offer, ceiling_offer, manual) = match &input.manual_override {
        Some(manual) => {
            warnings.push("Manual offer override in effect".to_string());
            (manual.floor_offer, manual.ceiling_offer, true)
        }
        None => (computed_floor, computed_ceiling, false),
    };

    let result = ProposalOutput {
        floor_offer,
        ceiling_offer,
        computed_floor,
        computed_ceiling,
        manual,
    };

    let assumptions = serde_json::json!({
        "net_base": input.net_base.to_string(),
        "floor_percent": input.floor_percent.to_string(),
        "ceiling_percent": input.ceiling_percent.to_string(),
        "manual_override": input.manual_override.is_some(),
    });

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Floor and ceiling offers as configured percentages of the net base; \
         manual overrides keep the computed figures for comparison",
        &assumptions,
        warnings,
        elapsed,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Heir split
// ---------------------------------------------------------------------------

/// Check that quotas are present, non-negative, and close to 100% within
/// [`QUOTA_SUM_TOLERANCE`]. The mismatch error carries the computed sum so
/// the operator sees exactly what the quotas add up to.
pub fn validate_quotas(quotas: &[HeirQuota]) -> PrecatorioResult<()> {
    if quotas.is_empty() {
        return Err(PrecatorioError::InvalidInput {
            field: "heir_quotas".to_string(),
            reason: "At least one heir quota is required".to_string(),
        });
    }
    for quota in quotas {
        if quota.quota_percent < dec!(0) {
            return Err(PrecatorioError::InvalidInput {
                field: "heir_quotas".to_string(),
                reason: format!("Negative quota for heir '{}'", quota.heir_id),
            });
        }
    }

    let sum: Percent = quotas.iter().map(|q| q.quota_percent).sum();
    if (sum - dec!(100)).abs() > QUOTA_SUM_TOLERANCE {
        return Err(PrecatorioError::HeirQuotaMismatch {
            expected: dec!(100),
            actual: sum,
        });
    }
    Ok(())
}

/// Split an amount across heirs by their declared quotas.
pub fn split_heirs(amount: Money, quotas: &[HeirQuota]) -> PrecatorioResult<Vec<HeirShare>> {
    if amount < dec!(0) {
        return Err(PrecatorioError::InvalidInput {
            field: "amount".to_string(),
            reason: "Split amount cannot be negative".to_string(),
        });
    }
    validate_quotas(quotas)?;

    Ok(quotas
        .iter()
        .map(|q| HeirShare {
            heir_id: q.heir_id.clone(),
            quota_percent: q.quota_percent,
            amount: (amount * q.quota_percent / dec!(100)).round_dp(2),
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
