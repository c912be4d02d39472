use clap::Args;
use serde_json::Value;

use precatorio_core::indices::tables::{IndexTables, MonthlyIndexTable};

/// Arguments for index-table coverage
#[derive(Args)]
pub struct IndicesArgs {}

fn coverage(name: &str, table: &MonthlyIndexTable) -> Value {
    serde_json::json!({
        "table": name,
        "first_month": table.first_month().map(|ym| ym.to_string()),
        "last_month": table.last_month().map(|ym| ym.to_string()),
        "months": table.len(),
    })
}

/// Report the coverage of each embedded table. Months outside these ranges
/// contribute zero to any correction, so an operator can see where a
/// calculation would degrade.
pub fn run_indices(_args: IndicesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let tables = IndexTables::brazil();
    Ok(Value::Array(vec![
        coverage("legacy_factor", &tables.legacy_factor),
        coverage("selic_monthly", &tables.selic_monthly),
        coverage("ipca_e_monthly", &tables.ipca_e_monthly),
        coverage("ipca_e_supplement", &tables.ipca_e_supplement),
    ]))
}
