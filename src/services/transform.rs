use crate::domain::models::{OutputRow, RotaRecord, Settings};
use crate::error::RotaError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

const DATE_FIELD: &str = "date";
const TIMESTAMP_FIELD: &str = "modified";

/// Applies additional fields, drops rows lacking required fields and projects
/// the rest onto the `return_data_set` columns.
pub fn transform(
    settings: &Settings,
    records: Vec<RotaRecord>,
    iso_dates: bool,
) -> Result<Vec<OutputRow>, RotaError> {
    let mut rows = Vec::with_capacity(records.len());
    for mut record in records {
        for (k, v) in &settings.additional_fields {
            record.insert(k.clone(), v.clone());
        }
        if !has_required_fields(&record, &settings.required_fields) {
            continue;
        }
        let mut row = Vec::with_capacity(settings.return_data_set.len());
        for (source, _) in settings.return_data_set.iter() {
            let value = record
                .get(source)
                .ok_or_else(|| RotaError::UnknownReturnKey(source.to_string()))?;
            row.push(render_field(source, value, iso_dates)?);
        }
        rows.push(row);
    }
    Ok(rows)
}

pub fn has_required_fields(record: &RotaRecord, required: &[String]) -> bool {
    required
        .iter()
        .all(|f| record.get(f).map(is_truthy).unwrap_or(false))
}

fn is_truthy(v: &Value) -> bool {
    !render_value(v).is_empty()
}

fn render_value(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn render_field(field: &str, value: &Value, iso_dates: bool) -> Result<String, RotaError> {
    if iso_dates {
        return Ok(render_value(value));
    }
    let pattern = match field {
        DATE_FIELD => "%d/%m/%Y",
        TIMESTAMP_FIELD => "%d/%m/%Y %H:%M:%S",
        _ => return Ok(render_value(value)),
    };
    match value {
        Value::Null => Ok(String::new()),
        Value::String(s) => parse_iso(s)
            .map(|dt| dt.format(pattern).to_string())
            .ok_or_else(|| RotaError::InvalidDate {
                field: field.to_string(),
                value: s.clone(),
            }),
        other => Err(RotaError::InvalidDate {
            field: field.to_string(),
            value: other.to_string(),
        }),
    }
}

/// Accepts `YYYY-MM-DD` and ISO timestamps with optional fractional seconds
/// and UTC offset. Offsets are dropped, keeping the wall-clock time.
fn parse_iso(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt.naive_local());
    }
    for fmt in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
