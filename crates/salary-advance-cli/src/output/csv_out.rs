use serde_json::{Map, Value};
use std::io;

use super::{find_schedule, format_scalar, payload};

/// Write output as CSV to stdout.
///
/// Results carrying an amortisation schedule are written one row per month;
/// anything else becomes a two-column `field,value` listing with nested
/// fields flattened to dotted names.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());
    if let Err(e) = write_csv(&mut wtr, value) {
        eprintln!("CSV output error: {}", e);
    }
}

fn write_csv<W: io::Write>(wtr: &mut csv::Writer<W>, value: &Value) -> csv::Result<()> {
    let result = payload(value);

    if let Some(rows) = find_schedule(result) {
        write_rows(wtr, rows)?;
    } else if let Value::Object(map) = result {
        wtr.write_record(["field", "value"])?;
        write_fields(wtr, "", map)?;
    } else {
        wtr.write_record([format_scalar(result)])?;
    }

    wtr.flush()?;
    Ok(())
}

fn write_rows<W: io::Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) -> csv::Result<()> {
    let Some(Value::Object(first)) = rows.first() else {
        return Ok(());
    };

    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    wtr.write_record(&headers)?;

    for row in rows.iter().filter_map(Value::as_object) {
        let record: Vec<String> = headers
            .iter()
            .map(|h| row.get(*h).map(format_scalar).unwrap_or_default())
            .collect();
        wtr.write_record(&record)?;
    }
    Ok(())
}

fn write_fields<W: io::Write>(
    wtr: &mut csv::Writer<W>,
    prefix: &str,
    map: &Map<String, Value>,
) -> csv::Result<()> {
    for (key, val) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Object(inner) => write_fields(wtr, &name, inner)?,
            _ => wtr.write_record([name.as_str(), &format_scalar(val)])?,
        }
    }
    Ok(())
}
