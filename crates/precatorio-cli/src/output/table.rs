use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::render_value;

/// Names of the correction stages, in statement order.
const STAGE_KEYS: [&str; 4] = ["legacy_factor", "legacy_interest", "selic", "ipca_e"];

/// Format output as tables using the tabled crate. Computation envelopes get
/// their result as a field/value table; a correction breakdown additionally
/// gets its stages printed as the line-itemized statement.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result(result, map);
            } else {
                print_flat_object(value);
            }
        }
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", value),
    }
}

fn print_result(result: &Value, envelope: &serde_json::Map<String, Value>) {
    if let Value::Object(res_map) = result {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in res_map {
            // Breakdown objects get their own statement table below
            if key == "correction" || STAGE_KEYS.contains(&key.as_str()) {
                continue;
            }
            builder.push_record([key.as_str(), &render_value(val)]);
        }
        println!("{}", Table::from(builder));

        let breakdown = res_map.get("correction").unwrap_or(result);
        print_statement(breakdown);
    } else {
        println!("{}", render_value(result));
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

/// Print the correction stages as the memória de cálculo: one row per
/// regime sub-period with the exact formula applied.
fn print_statement(breakdown: &Value) {
    let Value::Object(map) = breakdown else {
        return;
    };

    let mut builder = Builder::default();
    builder.push_record(["Stage", "Formula", "Amount"]);
    let mut any = false;
    for key in STAGE_KEYS {
        if let Some(Value::Object(stage)) = map.get(key) {
            any = true;
            let formula = stage.get("formula").map(render_value).unwrap_or_default();
            let amount = stage.get("amount").map(render_value).unwrap_or_default();
            builder.push_record([key, formula.as_str(), amount.as_str()]);
        }
    }
    if any {
        println!("\n{}", Table::from(builder));
    }
}

fn print_flat_object(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &render_value(val)]);
        }
        println!("{}", Table::from(builder));
    }
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(render_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", render_value(item));
        }
    }
}
