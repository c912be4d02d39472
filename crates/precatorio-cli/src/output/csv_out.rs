use serde_json::Value;
use std::io;

use super::render_value;

/// Write output as CSV to stdout. Envelopes flatten to field/value rows;
/// arrays of objects (heir shares, table coverage) get a header row.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => {
            let rows = match map.get("result") {
                Some(Value::Object(result)) => result,
                _ => map,
            };
            let _ = wtr.write_record(["field", "value"]);
            for (key, val) in rows {
                let _ = wtr.write_record([key.as_str(), &render_value(val)]);
            }
        }
        Value::Array(arr) => {
            if let Some(Value::Object(first)) = arr.first() {
                let headers: Vec<String> = first.keys().cloned().collect();
                let _ = wtr.write_record(&headers);
                for item in arr {
                    if let Value::Object(map) = item {
                        let row: Vec<String> = headers
                            .iter()
                            .map(|h| map.get(h.as_str()).map(render_value).unwrap_or_default())
                            .collect();
                        let _ = wtr.write_record(&row);
                    }
                }
            } else {
                for item in arr {
                    let _ = wtr.write_record([render_value(item)]);
                }
            }
        }
        _ => {
            let _ = wtr.write_record([render_value(value)]);
        }
    }

    let _ = wtr.flush();
}
