use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use precatorio_core::correction::engine::{correct_value, CorrectionInput};
use precatorio_core::indices::tables::IndexTables;
use precatorio_core::types::YearMonth;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn correct(principal: Decimal, base: NaiveDate, fin: NaiveDate) -> (Decimal, Vec<String>) {
    let tables = IndexTables::brazil();
    let out = correct_value(
        &CorrectionInput {
            principal,
            base_date: base,
            final_date: fin,
        },
        &tables,
    )
    .unwrap();
    (out.result.corrected_value, out.warnings)
}

// ===========================================================================
// Full-span case: every regime window contributes
// ===========================================================================

#[test]
fn test_full_span_case_has_all_four_stages() {
    let tables = IndexTables::brazil();
    let input = CorrectionInput {
        principal: dec!(100_000),
        base_date: date(2020, 1, 1),
        final_date: date(2025, 6, 1),
    };
    let out = correct_value(&input, &tables).unwrap().result;

    assert!(out.legacy_factor.is_some());
    assert!(out.legacy_interest.is_some());
    assert!(out.selic.is_some());
    assert!(out.ipca_e.is_some());
}

#[test]
fn test_full_span_case_matches_reference_sums() {
    let tables = IndexTables::brazil();
    let principal = dec!(100_000);
    let input = CorrectionInput {
        principal,
        base_date: date(2020, 1, 1),
        final_date: date(2025, 6, 1),
    };
    let out = correct_value(&input, &tables).unwrap().result;

    // Factor stage against the table values directly
    let f_base = tables.legacy_factor.get(YearMonth::of(2020, 1)).unwrap();
    let f_teto = tables.legacy_factor.get(YearMonth::of(2021, 11)).unwrap();
    let expected_factor = principal * (f_teto / f_base - Decimal::ONE);
    assert_eq!(out.legacy_factor.as_ref().unwrap().amount, expected_factor);

    // Interest stage against an independent month-by-month walk
    let mut interest_sum = Decimal::ZERO;
    for ym in YearMonth::iter_inclusive(YearMonth::of(2020, 1), YearMonth::of(2021, 11)) {
        if let (Some(cur), Some(prev)) = (
            tables.legacy_factor.get(ym),
            tables.legacy_factor.get(ym.pred()),
        ) {
            if !prev.is_zero() {
                interest_sum += (cur / prev - Decimal::ONE) * dec!(100);
            }
        }
    }
    assert_eq!(
        out.legacy_interest.as_ref().unwrap().amount,
        principal * interest_sum / dec!(100)
    );

    // SELIC stage covers the whole 2022-2024 window: 34.42% summed
    assert_eq!(out.selic.as_ref().unwrap().percent, Some(dec!(34.42)));
    assert_eq!(out.selic.as_ref().unwrap().amount, dec!(34_420));

    // IPCA-E stage covers 2025-01 through 2025-06: 3.03% summed
    assert_eq!(out.ipca_e.as_ref().unwrap().percent, Some(dec!(3.03)));
    assert_eq!(out.ipca_e.as_ref().unwrap().amount, dec!(3_030));
}

// ===========================================================================
// Single-window case
// ===========================================================================

#[test]
fn test_selic_only_case() {
    let tables = IndexTables::brazil();
    let input = CorrectionInput {
        principal: dec!(50_000),
        base_date: date(2023, 3, 1),
        final_date: date(2024, 11, 1),
    };
    let out = correct_value(&input, &tables).unwrap().result;

    assert!(out.legacy_factor.is_none());
    assert!(out.legacy_interest.is_none());
    assert!(out.ipca_e.is_none());

    let selic = out.selic.unwrap();
    assert_eq!(selic.percent, Some(dec!(19.72)));
    assert_eq!(selic.amount, dec!(9_860));
    assert_eq!(out.corrected_value, dec!(59_860));
}

#[test]
fn test_december_2021_base_gets_no_legacy_stage() {
    // EC113 transition gap: December 2021 is past the factor ceiling but
    // before the SELIC window, so it contributes nothing on its own.
    let tables = IndexTables::brazil();
    let input = CorrectionInput {
        principal: dec!(10_000),
        base_date: date(2021, 12, 15),
        final_date: date(2022, 3, 10),
    };
    let out = correct_value(&input, &tables).unwrap().result;

    assert!(out.legacy_factor.is_none());
    assert!(out.legacy_interest.is_none());
    let selic = out.selic.unwrap();
    // Jan + Feb + Mar 2022: 0.73 + 0.76 + 0.93
    assert_eq!(selic.percent, Some(dec!(2.42)));
    assert_eq!(out.corrected_value, dec!(10_242.0000));
}

// ===========================================================================
// Additivity (the breakdown must always reconcile)
// ===========================================================================

#[test]
fn test_corrected_value_is_principal_plus_stage_amounts() {
    let tables = IndexTables::brazil();
    let cases = [
        (dec!(100_000), date(2020, 1, 1), date(2025, 6, 1)),
        (dec!(37_500.55), date(2005, 7, 14), date(2026, 8, 1)),
        (dec!(1_000), date(2023, 3, 1), date(2024, 11, 1)),
        (dec!(250_000), date(2025, 2, 1), date(2026, 6, 30)),
        (dec!(9_999.99), date(2021, 11, 30), date(2022, 1, 1)),
    ];
    for (principal, base, fin) in cases {
        let out = correct_value(
            &CorrectionInput {
                principal,
                base_date: base,
                final_date: fin,
            },
            &tables,
        )
        .unwrap()
        .result;
        let stage_sum: Decimal = out.stages().map(|s| s.amount).sum();
        assert_eq!(
            out.corrected_value,
            principal + stage_sum,
            "additivity broken for base {base} final {fin}"
        );
    }
}

#[test]
fn test_supplement_months_reach_past_consolidated_series() {
    // 2026-07/08 exist only in the supplement table and must still count.
    let tables = IndexTables::brazil();
    let input = CorrectionInput {
        principal: dec!(10_000),
        base_date: date(2026, 7, 1),
        final_date: date(2026, 8, 1),
    };
    let out = correct_value(&input, &tables).unwrap().result;
    let ipca = out.ipca_e.unwrap();
    // 0.31 + 0.22
    assert_eq!(ipca.percent, Some(dec!(0.53)));
}

// ===========================================================================
// Degenerate ranges
// ===========================================================================

#[test]
fn test_inverted_range_is_zero_correction_not_error() {
    let (corrected, warnings) = correct(dec!(5_000), date(2024, 6, 1), date(2022, 1, 1));
    assert_eq!(corrected, dec!(5_000));
    assert!(warnings.iter().any(|w| w.contains("after final month")));
}

#[test]
fn test_months_beyond_every_table_contribute_zero() {
    // Far-future final date: months after the supplement table add nothing.
    let (corrected_known, _) = correct(dec!(10_000), date(2026, 1, 1), date(2026, 8, 1));
    let (corrected_future, _) = correct(dec!(10_000), date(2026, 1, 1), date(2027, 5, 1));
    assert_eq!(corrected_known, corrected_future);
}
