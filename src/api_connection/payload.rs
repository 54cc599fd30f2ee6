use csv::{ReaderBuilder, Trim};
use serde_json::Value;

use super::connection::FdaError;
use crate::records::{RawAnalyteRecord, RawPayload, SummaryRecord, ANALYTE_NAME_COL};

const UTF8_BOM: char = '\u{feff}';

fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn json_rows(body: &str) -> Result<Vec<SummaryRecord>, FdaError> {
    let value: Value = serde_json::from_str(body)?;
    let items = match value {
        Value::Array(items) => items,
        Value::Object(map) => {
            // Wrapped responses such as {"items": [...]}; a bare object is a single row.
            let wrapped = map.values().find(|v| v.is_array()).cloned();
            match wrapped {
                Some(Value::Array(items)) => items,
                _ => vec![Value::Object(map)],
            }
        }
        other => {
            return Err(FdaError::UnexpectedFormat(format!(
                "expected a JSON array or object, got {}",
                other
            )))
        }
    };

    Ok(items
        .iter()
        .filter_map(Value::as_object)
        .map(|object| {
            let row: SummaryRecord = object
                .iter()
                .filter_map(|(key, value)| cell_text(value).map(|text| (key.clone(), text)))
                .collect();
            row
        })
        .collect())
}

fn csv_rows(body: &str) -> Result<Vec<SummaryRecord>, FdaError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(body.as_bytes());
    let headers = rdr.headers()?.clone();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let row: SummaryRecord = headers
            .iter()
            .zip(record.iter())
            .map(|(header, cell)| (header.to_string(), cell.to_string()))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

/// Sorts loosely typed rows into long-format analytes or wide-format summaries.
pub fn classify_rows(rows: Vec<SummaryRecord>) -> RawPayload {
    if rows.iter().any(|row| row.contains_key(ANALYTE_NAME_COL)) {
        RawPayload::Analytes(rows.iter().map(RawAnalyteRecord::from_columns).collect())
    } else {
        RawPayload::Summaries(rows)
    }
}

/// Decodes a response body. JSON is recognised by its first character, anything else
/// is read as CSV with a header line.
pub fn parse_payload(body: &str) -> Result<RawPayload, FdaError> {
    // Trailing whitespace belongs to the last CSV cell.
    let body = body.trim_start_matches(UTF8_BOM).trim_start();
    if body.trim().is_empty() {
        return Ok(RawPayload::Analytes(Vec::new()));
    }

    let rows = if body.starts_with('[') || body.starts_with('{') {
        json_rows(body)?
    } else {
        csv_rows(body)?
    };
    Ok(classify_rows(rows))
}
