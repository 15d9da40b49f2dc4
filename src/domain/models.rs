use crate::error::RotaError;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A single person rota entry as returned by the Public API.
///
/// Field order follows the response body (`serde_json` is built with
/// `preserve_order`).
pub type RotaRecord = Map<String, Value>;

/// Cells of one CSV line, in `return_data_set` order.
pub type OutputRow = Vec<String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemKind {
    Clwrota,
    Medirota,
}

impl SystemKind {
    pub const ALL: [SystemKind; 2] = [SystemKind::Clwrota, SystemKind::Medirota];

    pub fn as_str(&self) -> &'static str {
        match self {
            SystemKind::Clwrota => "clwrota",
            SystemKind::Medirota => "medirota",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == raw)
    }
}

impl fmt::Display for SystemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Department {
    pub shortname: String,
    pub system: SystemKind,
    pub auth: Credentials,
}

impl Department {
    /// Root of the department's Public API, e.g.
    /// `https://acme.clwrota.com/publicapi/`.
    ///
    /// With `host` set the department is addressed by path instead:
    /// `{host}/clwrota/acme/publicapi/`.
    pub fn base_url(&self, host: Option<&str>) -> String {
        match host {
            None => format!("https://{}.{}.com/publicapi/", self.shortname, self.system),
            Some(host) => format!(
                "{}/{}/{}/publicapi/",
                host.trim_end_matches('/'),
                self.system,
                self.shortname
            ),
        }
    }
}

/// Ordered source-field -> output-column projection table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap(Vec<(String, String)>);

impl FieldMap {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn contains_source(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }

    pub fn headers(&self) -> Vec<&str> {
        self.0.iter().map(|(_, v)| v.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Validated contents of `settings.json`.
#[derive(Debug, Clone)]
pub struct Settings {
    pub departments: Vec<Department>,
    pub day_range: i64,
    pub return_data_set: FieldMap,
    pub required_fields: Vec<String>,
    pub additional_fields: Map<String, Value>,
}

/// Cached Public API tokens keyed by system kind, then department shortname.
///
/// Backed by `serde_json::Map` so a saved `tokens.json` keeps the key order it
/// was loaded with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct TokenStore {
    entries: Map<String, Value>,
    modified: bool,
}

impl TryFrom<Map<String, Value>> for TokenStore {
    type Error = RotaError;

    fn try_from(entries: Map<String, Value>) -> Result<Self, Self::Error> {
        for (system, slots) in &entries {
            let well_formed = slots
                .as_object()
                .map(|m| m.values().all(|t| t.is_string() || t.is_null()))
                .unwrap_or(false);
            if !well_formed {
                return Err(RotaError::InvalidTokens(system.clone()));
            }
        }
        Ok(Self {
            entries,
            modified: false,
        })
    }
}

impl From<TokenStore> for Map<String, Value> {
    fn from(store: TokenStore) -> Self {
        store.entries
    }
}

impl TokenStore {
    /// Empty store holding a `null` slot for every configured department.
    pub fn synthesize(departments: &[Department]) -> Self {
        let mut entries = Map::new();
        for kind in SystemKind::ALL {
            let slots: Map<String, Value> = departments
                .iter()
                .filter(|d| d.system == kind)
                .map(|d| (d.shortname.clone(), Value::Null))
                .collect();
            entries.insert(kind.as_str().to_string(), Value::Object(slots));
        }
        Self {
            entries,
            modified: false,
        }
    }

    pub fn get(&self, system: SystemKind, shortname: &str) -> Option<&str> {
        self.entries
            .get(system.as_str())
            .and_then(|m| m.get(shortname))
            .and_then(Value::as_str)
    }

    pub fn set(&mut self, system: SystemKind, shortname: &str, token: String) {
        let slots = self
            .entries
            .entry(system.as_str())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(m) = slots {
            m.insert(shortname.to_string(), Value::String(token));
        }
        self.modified = true;
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn mark_saved(&mut self) {
        self.modified = false;
    }
}

/// Inclusive reporting period shared by every department in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
}

impl DateWindow {
    pub fn starting(from_date: NaiveDate, day_range: i64) -> Result<Self, RotaError> {
        let offset = day_range.saturating_sub(1);
        let to_date = if offset >= 0 {
            from_date.checked_add_days(Days::new(offset.unsigned_abs()))
        } else {
            from_date.checked_sub_days(Days::new(offset.unsigned_abs()))
        }
        .ok_or(RotaError::DayRangeOutOfRange(day_range))?;
        Ok(Self { from_date, to_date })
    }

    pub fn query(&self) -> [(&'static str, String); 2] {
        [
            ("from_date", self.from_date.format("%Y-%m-%d").to_string()),
            ("to_date", self.to_date.format("%Y-%m-%d").to_string()),
        ]
    }
}

/// A department whose token has been confirmed or refreshed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedDepartment {
    pub shortname: String,
    pub system: SystemKind,
    /// `{base_url}{token}`
    pub endpoint: String,
}

/// Result of a single Public API call once the transport succeeded.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiOutcome<T> {
    Success(T),
    AuthRequired,
    Rejected(String),
}

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub fetched: usize,
    pub written: usize,
    /// `None` when the CSV went to stdout.
    pub output: Option<std::path::PathBuf>,
    pub tokens_saved: bool,
}
