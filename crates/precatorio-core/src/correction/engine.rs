//! Monetary correction across the regime cutovers of EC 113/2021.
//!
//! A case whose base date predates December 2021 is corrected by the legacy
//! factor table (brought up to the November 2021 ceiling) plus the
//! month-by-month legacy interest implied by that table. From January 2022
//! through December 2024 the correction index is the summed monthly SELIC;
//! from January 2025 on it is the summed monthly IPCA-E. A single case can
//! overlap several windows; each overlap contributes one stage and the
//! corrected value is the principal plus the sum of stage amounts.
//!
//! Every stage keeps the exact arithmetic it applied as a formula string.
//! The statement rendered from these stages is reviewed by lawyers, so the
//! numbers shown must be the numbers used.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use chrono::NaiveDate;

use crate::error::PrecatorioError;
use crate::indices::resolver::IndexResolver;
use crate::indices::tables::IndexTables;
use crate::types::*;
use crate::PrecatorioResult;

/// Last month of the legacy factor regime; also the ceiling month every
/// legacy correction is brought up to.
const FACTOR_CEILING_MONTH: YearMonth = YearMonth::of(2021, 11);
const SELIC_WINDOW_START: YearMonth = YearMonth::of(2022, 1);
const SELIC_WINDOW_END: YearMonth = YearMonth::of(2024, 12);
const IPCA_E_WINDOW_START: YearMonth = YearMonth::of(2025, 1);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectionInput {
    pub principal: Money,
    pub base_date: NaiveDate,
    /// Calculation cutoff. Always supplied by the caller; the engine never
    /// reads the system clock.
    pub final_date: NaiveDate,
}

/// One regime sub-period of the correction, kept verbatim for the statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectionStage {
    /// The exact arithmetic applied, e.g. `100000 * (3.795610 / 3.345288 - 1)`.
    pub formula: String,
    /// Amount the stage applies to.
    pub base: Money,
    /// Summed percentage for percent-driven stages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent: Option<Percent>,
    /// Factor at the case's base month, for the legacy factor stage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factor_base: Option<Factor>,
    /// Factor at the November 2021 ceiling, for the legacy factor stage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factor_ceiling: Option<Factor>,
    /// Monetary delta contributed by this stage.
    pub amount: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectionOutput {
    pub principal: Money,
    pub base_month: YearMonth,
    pub final_month: YearMonth,
    /// Factor correction up to Nov/2021, present when the base month
    /// predates Dec/2021.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legacy_factor: Option<CorrectionStage>,
    /// Month-summed legacy interest through Nov/2021, same window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legacy_interest: Option<CorrectionStage>,
    /// Summed SELIC over the overlap with 2022-01..2024-12.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selic: Option<CorrectionStage>,
    /// Summed IPCA-E over the overlap with 2025-01..final month.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipca_e: Option<CorrectionStage>,
    /// `principal + Σ stage.amount`.
    pub corrected_value: Money,
}

impl CorrectionOutput {
    pub fn stages(&self) -> impl Iterator<Item = &CorrectionStage> {
        [
            self.legacy_factor.as_ref(),
            self.legacy_interest.as_ref(),
            self.selic.as_ref(),
            self.ipca_e.as_ref(),
        ]
        .into_iter()
        .flatten()
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Correct a principal from its base date to the final date, partitioning
/// the elapsed period by regime cutover.
pub fn correct_value(
    input: &CorrectionInput,
    tables: &IndexTables,
) -> PrecatorioResult<ComputationOutput<CorrectionOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.principal <= dec!(0) {
        return Err(PrecatorioError::InvalidInput {
            field: "principal".to_string(),
            reason: "Principal must be positive".to_string(),
        });
    }

    let base_month = YearMonth::from_date(input.base_date);
    let final_month = YearMonth::from_date(input.final_date);
    let resolver = IndexResolver::new(tables);

    let mut result = CorrectionOutput {
        principal: input.principal,
        base_month,
        final_month,
        legacy_factor: None,
        legacy_interest: None,
        selic: None,
        ipca_e: None,
        corrected_value: input.principal,
    };

    if base_month > final_month {
        warnings.push(format!(
            "Base month {base_month} is after final month {final_month}; correction is zero"
        ));
        return Ok(finish(start, input, warnings, result));
    }

    // Legacy regime: factor correction to the Nov/2021 ceiling plus the
    // month-summed interest implied by the factor table.
    if base_month <= FACTOR_CEILING_MONTH {
        result.legacy_factor = Some(legacy_factor_stage(
            &resolver,
            input.principal,
            base_month,
            &mut warnings,
        ));
        result.legacy_interest = Some(legacy_interest_stage(
            &resolver,
            input.principal,
            base_month,
        ));
    }

    // SELIC window, EC113: overlap of the case period with 2022-01..2024-12.
    let selic_start = base_month.max(SELIC_WINDOW_START);
    let selic_end = final_month.min(SELIC_WINDOW_END);
    if selic_start <= selic_end {
        let pct = resolver.sum_selic(selic_start, selic_end);
        result.selic = Some(percent_stage(
            input.principal,
            pct,
            "SELIC",
            selic_start,
            selic_end,
        ));
    }

    // IPCA-E window: overlap of the case period with 2025-01..final month.
    let ipca_start = base_month.max(IPCA_E_WINDOW_START);
    if ipca_start <= final_month {
        let pct = resolver.sum_ipca_e(ipca_start, final_month);
        result.ipca_e = Some(percent_stage(
            input.principal,
            pct,
            "IPCA-E",
            ipca_start,
            final_month,
        ));
    }

    let stage_total: Decimal = result.stages().map(|s| s.amount).sum();
    result.corrected_value = input.principal + stage_total;

    Ok(finish(start, input, warnings, result))
}

fn legacy_factor_stage(
    resolver: &IndexResolver<'_>,
    principal: Money,
    base_month: YearMonth,
    warnings: &mut Vec<String>,
) -> CorrectionStage {
    let factor_base = resolver.legacy_factor(base_month);
    let factor_ceiling = resolver.legacy_factor(FACTOR_CEILING_MONTH);

    let amount = if factor_base > dec!(0) && factor_ceiling > dec!(0) {
        principal * (factor_ceiling / factor_base - Decimal::ONE)
    } else {
        warnings.push(format!(
            "No correction factor for {base_month}; legacy factor stage contributes zero"
        ));
        Decimal::ZERO
    };

    CorrectionStage {
        formula: format!("{principal} * ({factor_ceiling} / {factor_base} - 1)"),
        base: principal,
        percent: None,
        factor_base: Some(factor_base),
        factor_ceiling: Some(factor_ceiling),
        amount,
    }
}

fn legacy_interest_stage(
    resolver: &IndexResolver<'_>,
    principal: Money,
    base_month: YearMonth,
) -> CorrectionStage {
    let pct: Percent = YearMonth::iter_inclusive(base_month, FACTOR_CEILING_MONTH)
        .map(|ym| resolver.legacy_monthly_interest(ym))
        .sum();
    percent_stage(
        principal,
        pct,
        "juros legados",
        base_month,
        FACTOR_CEILING_MONTH,
    )
}

fn percent_stage(
    base: Money,
    pct: Percent,
    index_name: &str,
    from: YearMonth,
    to: YearMonth,
) -> CorrectionStage {
    CorrectionStage {
        formula: format!("{base} * {pct}% / 100 ({index_name} {from} a {to})"),
        base,
        percent: Some(pct),
        factor_base: None,
        factor_ceiling: None,
        amount: base * pct / dec!(100),
    }
}

fn finish(
    start: Instant,
    input: &CorrectionInput,
    warnings: Vec<String>,
    result: CorrectionOutput,
) -> ComputationOutput<CorrectionOutput> {
    let assumptions = serde_json::json!({
        "principal": input.principal.to_string(),
        "base_date": input.base_date.to_string(),
        "final_date": input.final_date.to_string(),
        "factor_ceiling_month": FACTOR_CEILING_MONTH.to_string(),
        "selic_window": format!("{SELIC_WINDOW_START} a {SELIC_WINDOW_END}"),
        "ipca_e_window_start": IPCA_E_WINDOW_START.to_string(),
    });

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "Monetary correction partitioned by regime: legacy factor table to Nov/2021, \
         summed SELIC 2022-2024, summed IPCA-E from 2025",
        &assumptions,
        warnings,
        elapsed,
        result,
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indices::tables::MonthlyIndexTable;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn synthetic_tables() -> IndexTables {
        IndexTables::from_parts(
            MonthlyIndexTable::from_rows(&[
                (2020, 1, dec!(2.000000)),
                (2020, 2, dec!(2.040000)),
                (2021, 11, dec!(2.500000)),
            ]),
            MonthlyIndexTable::from_rows(&[
                (2022, 1, dec!(1.00)),
                (2022, 2, dec!(2.00)),
                (2022, 3, dec!(0.50)),
            ]),
            MonthlyIndexTable::from_rows(&[(2025, 1, dec!(0.40)), (2025, 2, dec!(0.60))]),
            MonthlyIndexTable::from_rows(&[]),
        )
    }

    #[test]
    fn test_legacy_factor_correction() {
        let tables = synthetic_tables();
        let input = CorrectionInput {
            principal: dec!(1000),
            base_date: date(2020, 1, 15),
            final_date: date(2021, 11, 30),
        };
        let out = correct_value(&input, &tables).unwrap().result;

        let stage = out.legacy_factor.unwrap();
        // 1000 * (2.5 / 2.0 - 1) = 250
        assert_eq!(stage.amount, dec!(250));
        assert_eq!(stage.factor_base, Some(dec!(2.000000)));
        assert_eq!(stage.factor_ceiling, Some(dec!(2.500000)));
        assert!(out.selic.is_none());
        assert!(out.ipca_e.is_none());
    }

    #[test]
    fn test_legacy_interest_summed_from_factor_ratios() {
        let tables = synthetic_tables();
        let input = CorrectionInput {
            principal: dec!(1000),
            base_date: date(2020, 1, 1),
            final_date: date(2021, 11, 1),
        };
        let out = correct_value(&input, &tables).unwrap().result;

        let stage = out.legacy_interest.unwrap();
        // Only 2020-02 has both neighbors: 2.04/2.00 - 1 = 2%
        assert_eq!(stage.percent, Some(dec!(2.00)));
        assert_eq!(stage.amount, dec!(20.0000));
    }

    #[test]
    fn test_selic_window_clamped_to_case_period() {
        let tables = synthetic_tables();
        let input = CorrectionInput {
            principal: dec!(10000),
            base_date: date(2022, 2, 10),
            final_date: date(2022, 3, 20),
        };
        let out = correct_value(&input, &tables).unwrap().result;

        assert!(out.legacy_factor.is_none());
        assert!(out.legacy_interest.is_none());
        let stage = out.selic.unwrap();
        // 2.00 + 0.50 over Feb..Mar
        assert_eq!(stage.percent, Some(dec!(2.50)));
        assert_eq!(stage.amount, dec!(250.0000));
        assert_eq!(out.corrected_value, dec!(10250.0000));
    }

    #[test]
    fn test_ipca_e_window() {
        let tables = synthetic_tables();
        let input = CorrectionInput {
            principal: dec!(5000),
            base_date: date(2025, 1, 1),
            final_date: date(2025, 2, 28),
        };
        let out = correct_value(&input, &tables).unwrap().result;

        let stage = out.ipca_e.unwrap();
        assert_eq!(stage.percent, Some(dec!(1.00)));
        assert_eq!(stage.amount, dec!(50.0000));
    }

    #[test]
    fn test_inverted_range_yields_zero_correction() {
        let tables = synthetic_tables();
        let input = CorrectionInput {
            principal: dec!(1000),
            base_date: date(2025, 6, 1),
            final_date: date(2020, 1, 1),
        };
        let out = correct_value(&input, &tables).unwrap();

        assert_eq!(out.result.corrected_value, dec!(1000));
        assert!(out.result.stages().next().is_none());
        assert!(out.warnings.iter().any(|w| w.contains("after final month")));
    }

    #[test]
    fn test_missing_base_factor_contributes_zero_with_warning() {
        let tables = synthetic_tables();
        let input = CorrectionInput {
            principal: dec!(1000),
            base_date: date(2019, 6, 1),
            final_date: date(2021, 11, 1),
        };
        let out = correct_value(&input, &tables).unwrap();

        let stage = out.result.legacy_factor.unwrap();
        assert_eq!(stage.amount, dec!(0));
        assert!(out
            .warnings
            .iter()
            .any(|w| w.contains("No correction factor")));
    }

    #[test]
    fn test_non_positive_principal_rejected() {
        let tables = synthetic_tables();
        let input = CorrectionInput {
            principal: dec!(0),
            base_date: date(2022, 1, 1),
            final_date: date(2022, 3, 1),
        };
        let err = correct_value(&input, &tables).unwrap_err();
        match err {
            PrecatorioError::InvalidInput { field, .. } => assert_eq!(field, "principal"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_day_of_month_does_not_matter() {
        let tables = synthetic_tables();
        let first = CorrectionInput {
            principal: dec!(10000),
            base_date: date(2022, 2, 1),
            final_date: date(2022, 3, 1),
        };
        let last = CorrectionInput {
            principal: dec!(10000),
            base_date: date(2022, 2, 28),
            final_date: date(2022, 3, 31),
        };
        let a = correct_value(&first, &tables).unwrap().result;
        let b = correct_value(&last, &tables).unwrap().result;
        assert_eq!(a.corrected_value, b.corrected_value);
    }
}
