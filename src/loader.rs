use anyhow::{Context, Result};
use csv::ReaderBuilder;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;

/// Read the reference data file into the loose JSON shape the assembler takes.
///
/// `.csv` files become an array of string-valued records keyed by header;
/// anything else is parsed as JSON as-is.
pub fn load_rows(path: &str) -> Result<Value> {
    let is_csv = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    if is_csv {
        let file = std::fs::File::open(path).with_context(|| format!("Failed to open {}", path))?;
        read_csv(file).with_context(|| format!("Failed to read CSV {}", path))
    } else {
        let s = std::fs::read_to_string(path).with_context(|| format!("Failed to open {}", path))?;
        serde_json::from_str(&s).with_context(|| format!("Failed to parse JSON {}", path))
    }
}

pub fn read_csv<R: std::io::Read>(reader: R) -> Result<Value> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
    let mut rows = Vec::new();
    let mut parse_errors = 0usize;

    for result in rdr.deserialize::<HashMap<String, String>>() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!("Skipping unreadable CSV record: {}", e);
                parse_errors += 1;
                continue;
            }
        };
        let object: Map<String, Value> = record
            .into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect();
        rows.push(Value::Object(object));
    }

    if parse_errors > 0 {
        tracing::warn!("{} CSV records could not be read", parse_errors);
    }
    Ok(Value::Array(rows))
}
