use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PrecatorioError;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Index variations and rates in percentage points (0.62 = 0.62%).
/// Divided by 100 only at the point of multiplication, never stored as a
/// multiplier.
pub type Percent = Decimal;

/// Multiplicative index levels from the legacy factor table (e.g. 3.795610).
/// Never mixed with Percent values without an explicit conversion.
pub type Factor = Decimal;

/// A calendar month, the key type of every index table.
///
/// Ordered by (year, month). Serialized as `"YYYY-MM"`. Dates entering the
/// engine are truncated to their month via [`YearMonth::from_date`], so
/// day-of-month never influences a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    /// Unchecked constructor for table literals and regime cutovers.
    pub const fn of(year: i32, month: u32) -> Self {
        YearMonth { year, month }
    }

    pub fn new(year: i32, month: u32) -> Result<Self, PrecatorioError> {
        if !(1..=12).contains(&month) {
            return Err(PrecatorioError::DateError(format!(
                "month {month} out of range 1..=12"
            )));
        }
        Ok(YearMonth { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        YearMonth {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn succ(self) -> Self {
        if self.month == 12 {
            YearMonth {
                year: self.year + 1,
                month: 1,
            }
        } else {
            YearMonth {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn pred(self) -> Self {
        if self.month == 1 {
            YearMonth {
                year: self.year - 1,
                month: 12,
            }
        } else {
            YearMonth {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Signed month offset from `start` to `end` (exclusive of `start`,
    /// inclusive of `end`): Jan to Mar of the same year is 2.
    pub fn months_between(start: Self, end: Self) -> i64 {
        i64::from(end.year - start.year) * 12 + i64::from(end.month) - i64::from(start.month)
    }

    /// Iterate every month from `start` through `end`, both inclusive.
    /// Empty when `start > end`.
    pub fn iter_inclusive(start: Self, end: Self) -> impl Iterator<Item = Self> {
        let mut next = if start <= end { Some(start) } else { None };
        std::iter::from_fn(move || {
            let current = next?;
            next = if current == end {
                None
            } else {
                Some(current.succ())
            };
            Some(current)
        })
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = PrecatorioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (y, m) = s
            .split_once('-')
            .ok_or_else(|| PrecatorioError::DateError(format!("expected YYYY-MM, got '{s}'")))?;
        let year: i32 = y
            .parse()
            .map_err(|_| PrecatorioError::DateError(format!("invalid year in '{s}'")))?;
        let month: u32 = m
            .parse()
            .map_err(|_| PrecatorioError::DateError(format!("invalid month in '{s}'")))?;
        YearMonth::new(year, month)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = PrecatorioError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<YearMonth> for String {
    fn from(ym: YearMonth) -> Self {
        ym.to_string()
    }
}

/// Standard computation output envelope. The `result` field is what the host
/// persists on the case record; `assumptions` and the per-stage formula
/// strings inside results make up the memória de cálculo shown to auditors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_month_ordering() {
        assert!(YearMonth::of(2021, 12) < YearMonth::of(2022, 1));
        assert!(YearMonth::of(2022, 3) < YearMonth::of(2022, 4));
        assert_eq!(YearMonth::of(2024, 6), YearMonth::of(2024, 6));
    }

    #[test]
    fn test_year_month_display_and_parse() {
        let ym: YearMonth = "2023-07".parse().unwrap();
        assert_eq!(ym, YearMonth::of(2023, 7));
        assert_eq!(ym.to_string(), "2023-07");
        assert!("2023-13".parse::<YearMonth>().is_err());
        assert!("202307".parse::<YearMonth>().is_err());
    }

    #[test]
    fn test_from_date_truncates_day() {
        let d = NaiveDate::from_ymd_opt(2023, 3, 31).unwrap();
        assert_eq!(YearMonth::from_date(d), YearMonth::of(2023, 3));
    }

    #[test]
    fn test_succ_pred_year_boundary() {
        assert_eq!(YearMonth::of(2021, 12).succ(), YearMonth::of(2022, 1));
        assert_eq!(YearMonth::of(2022, 1).pred(), YearMonth::of(2021, 12));
    }

    #[test]
    fn test_months_between() {
        assert_eq!(
            YearMonth::months_between(YearMonth::of(2020, 1), YearMonth::of(2025, 6)),
            65
        );
        assert_eq!(
            YearMonth::months_between(YearMonth::of(2022, 5), YearMonth::of(2022, 5)),
            0
        );
        assert_eq!(
            YearMonth::months_between(YearMonth::of(2022, 5), YearMonth::of(2022, 2)),
            -3
        );
    }

    #[test]
    fn test_iter_inclusive() {
        let months: Vec<YearMonth> =
            YearMonth::iter_inclusive(YearMonth::of(2021, 11), YearMonth::of(2022, 2)).collect();
        assert_eq!(
            months,
            vec![
                YearMonth::of(2021, 11),
                YearMonth::of(2021, 12),
                YearMonth::of(2022, 1),
                YearMonth::of(2022, 2),
            ]
        );

        let empty: Vec<YearMonth> =
            YearMonth::iter_inclusive(YearMonth::of(2022, 2), YearMonth::of(2022, 1)).collect();
        assert!(empty.is_empty());
    }
}
