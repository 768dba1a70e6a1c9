use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::YieldError;

/// Render a response as JSON with sorted keys and a four-space indent.
pub fn format_api_response(value: &Value) -> Result<String, YieldError> {
    let sorted = sort_keys(value);
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    sorted.serialize(&mut ser)?;
    let text = String::from_utf8(buf)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    Ok(text)
}

/// Print a formatted response to stdout.
pub fn print_api_response(value: &Value) -> Result<(), YieldError> {
    println!("{}", format_api_response(value)?);
    Ok(())
}

/// Rows of a `refTable` response (`FIADB_SQL_Output.record`), or an empty
/// list if the response has none.
pub fn response_records(value: &Value) -> Vec<Value> {
    value
        .pointer("/FIADB_SQL_Output/record")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

// serde_json may be built with `preserve_order`, so ordering is explicit.
fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let mut sorted = Map::new();
            for (key, inner) in entries {
                sorted.insert(key.clone(), sort_keys(inner));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}
