use crate::domain::models::{Credentials, Department, FieldMap, Settings, SystemKind};
use crate::error::RotaError;
use anyhow::Context;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Deserialize)]
struct RawSettings {
    departments: Vec<RawDepartment>,
    day_range: Value,
    return_data_set: Map<String, Value>,
    #[serde(default)]
    required_fields: Vec<String>,
    #[serde(default)]
    additional_fields: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RawDepartment {
    shortname: String,
    system: String,
    auth: Credentials,
}

pub fn settings_path(dir: Option<&Path>) -> PathBuf {
    dir.unwrap_or_else(|| Path::new("")).join(SETTINGS_FILE)
}

pub fn load_settings(dir: Option<&Path>) -> anyhow::Result<Settings> {
    let path = settings_path(dir);
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read settings file {}", path.display()))?;
    parse_settings(&raw).with_context(|| format!("invalid settings file {}", path.display()))
}

pub fn parse_settings(raw: &str) -> anyhow::Result<Settings> {
    let parsed: RawSettings = serde_json::from_str(raw)?;
    Ok(validate(parsed)?)
}

fn validate(raw: RawSettings) -> Result<Settings, RotaError> {
    let mut departments = Vec::with_capacity(raw.departments.len());
    for d in raw.departments {
        let system = SystemKind::parse(&d.system).ok_or(RotaError::UnknownSystem(d.system))?;
        departments.push(Department {
            shortname: d.shortname,
            system,
            auth: d.auth,
        });
    }

    let mut columns = Vec::with_capacity(raw.return_data_set.len());
    for (source, column) in raw.return_data_set {
        match column {
            Value::String(name) => columns.push((source, name)),
            _ => return Err(RotaError::InvalidColumnName(source)),
        }
    }
    let return_data_set = FieldMap::new(columns);

    if let Some(missing) = raw
        .additional_fields
        .keys()
        .find(|k| !return_data_set.contains_source(k))
    {
        return Err(RotaError::AdditionalFieldNotReturned(missing.clone()));
    }

    let day_range = parse_day_range(&raw.day_range).ok_or(RotaError::InvalidDayRange)?;

    Ok(Settings {
        departments,
        day_range,
        return_data_set,
        required_fields: raw.required_fields,
        additional_fields: raw.additional_fields,
    })
}

fn parse_day_range(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
