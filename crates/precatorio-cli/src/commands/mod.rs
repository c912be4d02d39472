pub mod correction;
pub mod indices;
pub mod proposal;
pub mod settlement;
pub mod tax;

use chrono::NaiveDate;

/// Parse a CLI date. Accepts `YYYY-MM-DD`, or `YYYY-MM` as shorthand for the
/// first of the month (the engines truncate to the month anyway).
pub fn parse_date(raw: &str) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d") {
        return Ok(date);
    }
    Err(format!("Invalid date '{raw}': expected YYYY-MM-DD or YYYY-MM").into())
}
