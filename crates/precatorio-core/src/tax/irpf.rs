//! IRPF withholding under the RRA rule (Rendimentos Recebidos
//! Acumuladamente, Lei 12.350/2010 art. 44).
//!
//! The computation runs on two deliberately different bases. BASE 1, the
//! execution-period total divided by the elapsed months, exists only to pick
//! the progressive bracket. BASE 2 is the full corrected value, on which the
//! selected rate is actually levied, with the bracket's flat deduction
//! scaled by the elapsed months. Collapsing the two bases into one is the
//! classic mistake this module exists to prevent: the asymmetry is the law,
//! not an accident.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::PrecatorioError;
use crate::types::*;
use crate::PrecatorioResult;

// ---------------------------------------------------------------------------
// Bracket table
// ---------------------------------------------------------------------------

/// One row of the progressive monthly IRPF table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Upper bound of the monthly base covered by this row; `None` for the
    /// top row.
    pub upper_bound: Option<Money>,
    /// Rate in percentage points.
    pub rate: Percent,
    /// Flat monthly deduction for this row.
    pub deduction: Money,
}

/// Monthly IRPF table applied to RRA income. Bounds strictly increasing;
/// selection picks the first row whose bound covers the monthly base.
pub const RRA_BRACKETS: [TaxBracket; 5] = [
    TaxBracket {
        upper_bound: Some(dec!(1903.98)),
        rate: dec!(0),
        deduction: dec!(0),
    },
    TaxBracket {
        upper_bound: Some(dec!(2826.65)),
        rate: dec!(7.5),
        deduction: dec!(142.80),
    },
    TaxBracket {
        upper_bound: Some(dec!(3751.05)),
        rate: dec!(15),
        deduction: dec!(354.80),
    },
    TaxBracket {
        upper_bound: Some(dec!(4664.68)),
        rate: dec!(22.5),
        deduction: dec!(636.13),
    },
    TaxBracket {
        upper_bound: None,
        rate: dec!(27.5),
        deduction: dec!(869.36),
    },
];

fn select_bracket(monthly_base: Money) -> &'static TaxBracket {
    for bracket in &RRA_BRACKETS {
        match bracket.upper_bound {
            Some(bound) if monthly_base > bound => continue,
            _ => return bracket,
        }
    }
    // The table ends in an unbounded row, so the loop always returns.
    &RRA_BRACKETS[RRA_BRACKETS.len() - 1]
}

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IrpfInput {
    /// Total of the execution period (principal + interest + penalties),
    /// the numerator of BASE 1.
    pub execution_total: Money,
    /// Months elapsed in the execution period. Must be positive.
    pub elapsed_months: u32,
    /// Corrected value the tax is levied on (BASE 2).
    pub corrected_value: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IrpfOutput {
    /// BASE 1: `execution_total / elapsed_months`. Selects the bracket,
    /// nothing else.
    pub reference_monthly_base: Money,
    pub bracket: TaxBracket,
    /// `bracket.deduction * elapsed_months`.
    pub total_deduction: Money,
    /// `corrected_value * bracket.rate / 100`.
    pub gross_tax: Money,
    /// `max(0, gross_tax - total_deduction)`.
    pub net_tax: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute the RRA income-tax withholding.
pub fn calculate_irpf(input: &IrpfInput) -> PrecatorioResult<ComputationOutput<IrpfOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.elapsed_months == 0 {
        return Err(PrecatorioError::InvalidInput {
            field: "elapsed_months".to_string(),
            reason: "RRA averaging requires at least one elapsed month".to_string(),
        });
    }
    if input.execution_total < dec!(0) {
        return Err(PrecatorioError::InvalidInput {
            field: "execution_total".to_string(),
            reason: "Execution total cannot be negative".to_string(),
        });
    }
    if input.corrected_value < dec!(0) {
        return Err(PrecatorioError::InvalidInput {
            field: "corrected_value".to_string(),
            reason: "Corrected value cannot be negative".to_string(),
        });
    }

    let months = Decimal::from(input.elapsed_months);

    // BASE 1: monthly reference, bracket selection only.
    let reference_monthly_base = input.execution_total / months;
    let bracket = select_bracket(reference_monthly_base);

    // BASE 2: the actual levy, on the full corrected value.
    let total_deduction = bracket.deduction * months;
    let gross_tax = input.corrected_value * bracket.rate / dec!(100);
    let net_tax = (gross_tax - total_deduction).max(Decimal::ZERO);

    if gross_tax < total_deduction && !gross_tax.is_zero() {
        warnings.push(format!(
            "Scaled deduction {total_deduction} exceeds gross tax {gross_tax}; net tax clamped to zero"
        ));
    }

    let result = IrpfOutput {
        reference_monthly_base,
        bracket: bracket.clone(),
        total_deduction,
        gross_tax,
        net_tax,
    };

    let assumptions = serde_json::json!({
        "execution_total": input.execution_total.to_string(),
        "elapsed_months": input.elapsed_months,
        "corrected_value": input.corrected_value.to_string(),
        "table": "IRPF mensal, tabela com parcela a deduzir 869.36",
    });

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "RRA withholding: bracket selected by the monthly-averaged execution total, \
         rate levied on the full corrected value, deduction scaled by elapsed months",
        &assumptions,
        warnings,
        elapsed,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bracket_bounds() {
        assert_eq!(select_bracket(dec!(0)).rate, dec!(0));
        assert_eq!(select_bracket(dec!(1903.98)).rate, dec!(0));
        assert_eq!(select_bracket(dec!(1903.99)).rate, dec!(7.5));
        assert_eq!(select_bracket(dec!(2826.65)).rate, dec!(7.5));
        assert_eq!(select_bracket(dec!(3751.05)).rate, dec!(15));
        assert_eq!(select_bracket(dec!(4664.68)).rate, dec!(22.5));
        assert_eq!(select_bracket(dec!(4664.69)).rate, dec!(27.5));
        assert_eq!(select_bracket(dec!(1_000_000)).deduction, dec!(869.36));
    }

    #[test]
    fn test_rra_uses_two_bases() {
        // Monthly base in the exempt bracket even though the corrected value
        // is large: no tax, because the bracket comes from BASE 1 alone.
        let input = IrpfInput {
            execution_total: dec!(120_000),
            elapsed_months: 120,
            corrected_value: dec!(500_000),
        };
        let out = calculate_irpf(&input).unwrap().result;
        assert_eq!(out.reference_monthly_base, dec!(1000));
        assert_eq!(out.bracket.rate, dec!(0));
        assert_eq!(out.net_tax, dec!(0));
    }

    #[test]
    fn test_deduction_scaled_by_months() {
        let input = IrpfInput {
            execution_total: dec!(60_000),
            elapsed_months: 12,
            corrected_value: dec!(80_000),
        };
        let out = calculate_irpf(&input).unwrap().result;
        // 60000/12 = 5000 -> top bracket
        assert_eq!(out.bracket.rate, dec!(27.5));
        assert_eq!(out.total_deduction, dec!(869.36) * dec!(12));
        assert_eq!(out.gross_tax, dec!(22000.000));
        assert_eq!(out.net_tax, dec!(22000.000) - dec!(10432.32));
    }

    #[test]
    fn test_net_tax_never_negative() {
        // Deduction scaled by many months dwarfs the gross tax.
        let input = IrpfInput {
            execution_total: dec!(300_000),
            elapsed_months: 100,
            corrected_value: dec!(1_000),
        };
        let out = calculate_irpf(&input).unwrap();
        assert_eq!(out.result.net_tax, dec!(0));
        assert!(out.warnings.iter().any(|w| w.contains("clamped")));
    }

    #[test]
    fn test_zero_elapsed_months_rejected() {
        let input = IrpfInput {
            execution_total: dec!(100_000),
            elapsed_months: 0,
            corrected_value: dec!(100_000),
        };
        let err = calculate_irpf(&input).unwrap_err();
        match err {
            PrecatorioError::InvalidInput { field, .. } => assert_eq!(field, "elapsed_months"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_execution_total_is_exempt() {
        let input = IrpfInput {
            execution_total: dec!(0),
            elapsed_months: 24,
            corrected_value: dec!(50_000),
        };
        let out = calculate_irpf(&input).unwrap().result;
        assert_eq!(out.bracket.rate, dec!(0));
        assert_eq!(out.net_tax, dec!(0));
    }
}
