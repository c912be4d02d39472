//! Regime-aware lookups over the index tables.
//!
//! The resolver is the only place that knows which table answers which
//! question: factors for the legacy regime, derived month-over-month
//! variation for legacy interest, summed percentages for the SELIC and
//! IPCA-E windows. Missing months always resolve to zero contribution.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::indices::tables::IndexTables;
use crate::types::{Factor, Percent, YearMonth};

pub struct IndexResolver<'a> {
    tables: &'a IndexTables,
}

impl<'a> IndexResolver<'a> {
    pub fn new(tables: &'a IndexTables) -> Self {
        IndexResolver { tables }
    }

    /// Correction factor for a legacy-regime month, 0 when outside the table.
    pub fn legacy_factor(&self, ym: YearMonth) -> Factor {
        self.tables.legacy_factor.get(ym).unwrap_or(Decimal::ZERO)
    }

    /// Implied monthly variation of the legacy factor table, in percentage
    /// points: `(factor[m] / factor[m-1] - 1) * 100`. A January reaches back
    /// to the previous year's December. Returns 0 when either factor is
    /// missing or zero.
    pub fn legacy_monthly_interest(&self, ym: YearMonth) -> Percent {
        let current = self.tables.legacy_factor.get(ym);
        let previous = self.tables.legacy_factor.get(ym.pred());
        match (current, previous) {
            (Some(cur), Some(prev)) if !cur.is_zero() && !prev.is_zero() => {
                (cur / prev - Decimal::ONE) * dec!(100)
            }
            _ => Decimal::ZERO,
        }
    }

    /// Sum of SELIC monthly percentages over an inclusive month range.
    /// Months outside the table add 0; an inverted range sums to 0.
    pub fn sum_selic(&self, start: YearMonth, end: YearMonth) -> Percent {
        YearMonth::iter_inclusive(start, end)
            .map(|ym| self.tables.selic_monthly.get(ym).unwrap_or(Decimal::ZERO))
            .sum()
    }

    /// Sum of IPCA-E monthly percentages over an inclusive month range.
    /// Months absent from the consolidated series fall back to the
    /// supplement table; months in neither add 0.
    pub fn sum_ipca_e(&self, start: YearMonth, end: YearMonth) -> Percent {
        YearMonth::iter_inclusive(start, end)
            .map(|ym| {
                self.tables
                    .ipca_e_monthly
                    .get(ym)
                    .or_else(|| self.tables.ipca_e_supplement.get(ym))
                    .unwrap_or(Decimal::ZERO)
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indices::tables::MonthlyIndexTable;

    fn synthetic_tables() -> IndexTables {
        IndexTables::from_parts(
            MonthlyIndexTable::from_rows(&[
                (2020, 12, dec!(1.00)),
                (2021, 1, dec!(1.01)),
                (2021, 2, dec!(1.0302)),
                (2021, 11, dec!(2.02)),
            ]),
            MonthlyIndexTable::from_rows(&[
                (2022, 1, dec!(1.00)),
                (2022, 2, dec!(0.50)),
                // 2022-03 deliberately missing
                (2022, 4, dec!(0.25)),
            ]),
            MonthlyIndexTable::from_rows(&[(2025, 1, dec!(0.40)), (2025, 2, dec!(0.60))]),
            MonthlyIndexTable::from_rows(&[(2025, 3, dec!(0.20))]),
        )
    }

    #[test]
    fn test_legacy_factor_missing_is_zero() {
        let tables = synthetic_tables();
        let resolver = IndexResolver::new(&tables);
        assert_eq!(resolver.legacy_factor(YearMonth::of(2021, 11)), dec!(2.02));
        assert_eq!(resolver.legacy_factor(YearMonth::of(1999, 1)), dec!(0));
    }

    #[test]
    fn test_legacy_monthly_interest_january_uses_prior_december() {
        let tables = synthetic_tables();
        let resolver = IndexResolver::new(&tables);
        // 1.01 / 1.00 - 1 = 1%
        assert_eq!(
            resolver.legacy_monthly_interest(YearMonth::of(2021, 1)),
            dec!(1.00)
        );
    }

    #[test]
    fn test_legacy_monthly_interest_consecutive_months() {
        let tables = synthetic_tables();
        let resolver = IndexResolver::new(&tables);
        // 1.0302 / 1.01 - 1 = 2%
        assert_eq!(
            resolver.legacy_monthly_interest(YearMonth::of(2021, 2)),
            dec!(2.00)
        );
    }

    #[test]
    fn test_legacy_monthly_interest_missing_neighbor_is_zero() {
        let tables = synthetic_tables();
        let resolver = IndexResolver::new(&tables);
        // 2021-11 present but 2021-10 missing
        assert_eq!(
            resolver.legacy_monthly_interest(YearMonth::of(2021, 11)),
            dec!(0)
        );
        // both missing
        assert_eq!(
            resolver.legacy_monthly_interest(YearMonth::of(2019, 6)),
            dec!(0)
        );
    }

    #[test]
    fn test_sum_selic_skips_missing_months() {
        let tables = synthetic_tables();
        let resolver = IndexResolver::new(&tables);
        assert_eq!(
            resolver.sum_selic(YearMonth::of(2022, 1), YearMonth::of(2022, 4)),
            dec!(1.75)
        );
    }

    #[test]
    fn test_sum_selic_inverted_range_is_zero() {
        let tables = synthetic_tables();
        let resolver = IndexResolver::new(&tables);
        assert_eq!(
            resolver.sum_selic(YearMonth::of(2022, 4), YearMonth::of(2022, 1)),
            dec!(0)
        );
    }

    #[test]
    fn test_sum_ipca_e_uses_supplement_fallback() {
        let tables = synthetic_tables();
        let resolver = IndexResolver::new(&tables);
        // 0.40 + 0.60 from the main series, 0.20 from the supplement
        assert_eq!(
            resolver.sum_ipca_e(YearMonth::of(2025, 1), YearMonth::of(2025, 3)),
            dec!(1.20)
        );
        // month in neither table adds zero
        assert_eq!(
            resolver.sum_ipca_e(YearMonth::of(2025, 1), YearMonth::of(2025, 4)),
            dec!(1.20)
        );
    }
}
