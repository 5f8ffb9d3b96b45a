use serde_json::{Map, Value};
use std::io::{self, Write};

use super::{flatten, result_of, scalar_text};

/// Write output as CSV to stdout. An amortisation schedule is written as one
/// row per installment; anything else as `field,value` pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    if let Err(e) = write_csv(stdout.lock(), result_of(value)) {
        eprintln!("CSV output error: {}", e);
    }
}

fn write_csv<W: Write>(writer: W, result: &Value) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);

    match result {
        Value::Object(map) => match map.get("rows") {
            Some(Value::Array(rows)) if !rows.is_empty() => write_rows(&mut wtr, rows)?,
            _ => write_fields(&mut wtr, map)?,
        },
        Value::Array(rows) => write_rows(&mut wtr, rows)?,
        other => wtr.write_record([scalar_text(other)])?,
    }

    wtr.flush()?;
    Ok(())
}

fn write_fields<W: Write>(wtr: &mut csv::Writer<W>, map: &Map<String, Value>) -> Result<(), csv::Error> {
    wtr.write_record(["field", "value"])?;
    for (key, val) in flatten(map) {
        wtr.write_record([key.as_str(), &scalar_text(&val)])?;
    }
    Ok(())
}

fn write_rows<W: Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) -> Result<(), csv::Error> {
    let Some(Value::Object(first)) = rows.first() else {
        for item in rows {
            wtr.write_record([scalar_text(item)])?;
        }
        return Ok(());
    };

    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    wtr.write_record(&headers)?;
    for item in rows {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(scalar_text).unwrap_or_default())
                .collect();
            wtr.write_record(&row)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(value: &Value) -> String {
        let mut buf = Vec::new();
        write_csv(&mut buf, result_of(value)).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_schedule_rows_become_csv_rows() {
        let value = json!({
            "result": {
                "emi": "100",
                "rows": [
                    { "period": 1, "installment": "100", "closing_balance": "200" },
                    { "period": 2, "installment": "100", "closing_balance": "100" }
                ]
            }
        });
        let csv = render(&value);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].split(',').any(|h| h == "period"));
        assert!(lines[2].split(',').any(|f| f == "2"));
    }

    #[test]
    fn test_decision_fields_flattened() {
        let value = json!({
            "result": {
                "approved": false,
                "reasons": ["Credit score 650 is below the policy minimum of 700"]
            }
        });
        let csv = render(&value);
        assert!(csv.starts_with("field,value\n"));
        assert!(csv.contains("approved,false"));
        assert!(csv.contains("reasons,Credit score 650"));
    }
}
