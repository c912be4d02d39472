//! PSS pension-contribution withholding.
//!
//! A flat percentage over the stated base. Cases covered by an exemption
//! (already-retired beneficiaries, RPPS migrations) carry a flag that forces
//! the deduction to zero no matter what rate is configured.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::PrecatorioError;
use crate::types::*;
use crate::PrecatorioResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PssInput {
    /// Amount the contribution applies to.
    pub base: Money,
    /// Contribution rate in percentage points.
    pub rate: Percent,
    /// Forces the deduction to zero when set.
    pub exempt: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PssOutput {
    pub base: Money,
    pub rate: Percent,
    pub exempt: bool,
    pub deduction: Money,
}

pub fn calculate_pss(input: &PssInput) -> PrecatorioResult<ComputationOutput<PssOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.base < dec!(0) {
        return Err(PrecatorioError::InvalidInput {
            field: "base".to_string(),
            reason: "PSS base cannot be negative".to_string(),
        });
    }
    if input.rate < dec!(0) {
        return Err(PrecatorioError::InvalidInput {
            field: "rate".to_string(),
            reason: "PSS rate cannot be negative".to_string(),
        });
    }

    let deduction = if input.exempt {
        if input.rate > dec!(0) {
            warnings.push("PSS exemption set; configured rate ignored".to_string());
        }
        Decimal::ZERO
    } else {
        input.base * input.rate / dec!(100)
    };

    let result = PssOutput {
        base: input.base,
        rate: input.rate,
        exempt: input.exempt,
        deduction,
    };

    let assumptions = serde_json::json!({
        "base": input.base.to_string(),
        "rate": input.rate.to_string(),
        "exempt": input.exempt,
    });

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "PSS withholding as a flat percentage of the base, zeroed under exemption",
        &assumptions,
        warnings,
        elapsed,
        result,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_percentage() {
        let input = PssInput {
            base: dec!(150_000),
            rate: dec!(11),
            exempt: false,
        };
        let out = calculate_pss(&input).unwrap().result;
        assert_eq!(out.deduction, dec!(16_500));
    }

    #[test]
    fn test_exemption_forces_zero() {
        let input = PssInput {
            base: dec!(150_000),
            rate: dec!(11),
            exempt: true,
        };
        let out = calculate_pss(&input).unwrap();
        assert_eq!(out.result.deduction, dec!(0));
        assert!(out.warnings.iter().any(|w| w.contains("exemption")));
    }

    #[test]
    fn test_zero_rate_zero_deduction() {
        let input = PssInput {
            base: dec!(80_000),
            rate: dec!(0),
            exempt: false,
        };
        let out = calculate_pss(&input).unwrap();
        assert_eq!(out.result.deduction, dec!(0));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_negative_rate_rejected() {
        let input = PssInput {
            base: dec!(80_000),
            rate: dec!(-1),
            exempt: false,
        };
        assert!(calculate_pss(&input).is_err());
    }
}
