use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{format_scalar, payload};

/// Format output as tables: headline fields first, then one table per
/// nested section (e.g. the amortisation schedule).
pub fn print_table(value: &Value) {
    match payload(value) {
        Value::Object(map) => print_object(map),
        Value::Array(rows) => print_rows(rows),
        other => println!("{}", format_scalar(other)),
    }

    let Some(envelope) = value.as_object() else {
        return;
    };

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

fn is_section(value: &Value) -> bool {
    match value {
        Value::Object(_) => true,
        Value::Array(arr) => matches!(arr.first(), Some(Value::Object(_))),
        _ => false,
    }
}

fn print_object(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);

    let mut sections = Vec::new();
    for (key, val) in map {
        if is_section(val) {
            sections.push((key, val));
        } else {
            builder.push_record([key.as_str(), &format_scalar(val)]);
        }
    }
    println!("{}", Table::from(builder));

    for (key, val) in sections {
        println!("\n{}:", key);
        match val {
            Value::Object(inner) => print_object(inner),
            Value::Array(rows) => print_rows(rows),
            _ => {}
        }
    }
}

fn print_rows(rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        for item in rows {
            println!("{}", format_scalar(item));
        }
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);

    for row in rows.iter().filter_map(Value::as_object) {
        builder.push_record(
            headers
                .iter()
                .map(|h| row.get(h).map(format_scalar).unwrap_or_default()),
        );
    }

    println!("{}", Table::from(builder));
}
