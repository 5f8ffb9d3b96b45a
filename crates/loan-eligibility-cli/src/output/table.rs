use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{flatten, result_of, scalar_text};

/// Fields rendered as bullet sections below the main table.
const LIST_SECTIONS: [(&str, &str); 3] = [
    ("reasons", "Reasons"),
    ("applicable_rules", "Policy Rules"),
    ("next_steps", "Next Steps"),
];

/// Print a computation as tables: scalar fields first, then any row arrays
/// (amortisation schedules) and list sections, then warnings.
pub fn print_table(value: &Value) {
    let result = result_of(value);

    match result {
        Value::Object(map) => print_result(map),
        Value::Array(rows) => print_rows(rows),
        other => println!("{}", scalar_text(other)),
    }

    if let Some(envelope) = value.as_object() {
        if let Some(Value::Array(warnings)) = envelope.get("warnings") {
            if !warnings.is_empty() {
                println!("\nWarnings:");
                for w in warnings.iter().filter_map(Value::as_str) {
                    println!("  - {}", w);
                }
            }
        }
        if let Some(Value::String(meth)) = envelope.get("methodology") {
            println!("\nMethodology: {}", meth);
        }
    }
}

fn print_result(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    let mut row_tables: Vec<(String, &Vec<Value>)> = Vec::new();

    for (key, val) in flatten(map) {
        let is_list_section = LIST_SECTIONS.iter().any(|(k, _)| *k == key);
        if is_list_section {
            continue;
        }
        match &val {
            Value::Array(items) if items.first().is_some_and(Value::is_object) => {
                if let Some(Value::Array(rows)) = map.get(&key) {
                    row_tables.push((key.clone(), rows));
                }
            }
            _ => {
                builder.push_record([key.as_str(), &scalar_text(&val)]);
            }
        }
    }
    println!("{}", Table::from(builder));

    for (key, rows) in row_tables {
        println!("\n{}:", key);
        print_rows(rows);
    }

    for (key, title) in LIST_SECTIONS {
        if let Some(Value::Array(items)) = map.get(key) {
            if items.is_empty() {
                continue;
            }
            println!("\n{}:", title);
            for item in items {
                println!("  - {}", scalar_text(item));
            }
        }
    }
}

fn print_rows(rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        for item in rows {
            println!("{}", scalar_text(item));
        }
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);
    for item in rows {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(scalar_text).unwrap_or_default())
                .collect();
            builder.push_record(row);
        }
    }
    println!("{}", Table::from(builder));
}
