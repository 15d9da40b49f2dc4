#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use rota_export::commands::ExportOptions;
use rota_export::domain::models::{
    ApiOutcome, AuthenticatedDepartment, DateWindow, Department, RotaRecord,
};
use rota_export::services::api::RotaApi;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnv {
    _tmp: TempDir,
    pub settings_dir: PathBuf,
    pub tokens_dir: PathBuf,
    pub csv_dir: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let settings_dir = tmp.path().join("config");
        let tokens_dir = tmp.path().join("tokens");
        let csv_dir = tmp.path().join("out");
        for d in [&settings_dir, &tokens_dir, &csv_dir] {
            fs::create_dir_all(d).expect("create fixture dir");
        }
        Self {
            _tmp: tmp,
            settings_dir,
            tokens_dir,
            csv_dir,
        }
    }

    pub fn write_settings(&self, settings: &Value) {
        fs::write(
            self.settings_dir.join("settings.json"),
            serde_json::to_string_pretty(settings).expect("serialize settings"),
        )
        .expect("write settings");
    }

    pub fn write_tokens(&self, tokens: &Value) {
        fs::write(self.tokens_path(), tokens.to_string()).expect("write tokens");
    }

    pub fn tokens_path(&self) -> PathBuf {
        self.tokens_dir.join("tokens.json")
    }

    pub fn read_tokens(&self) -> Value {
        let raw = fs::read_to_string(self.tokens_path()).expect("read tokens");
        serde_json::from_str(&raw).expect("valid tokens json")
    }

    /// The single CSV produced in `csv_dir`.
    pub fn read_csv(&self) -> String {
        let files: Vec<_> = fs::read_dir(&self.csv_dir)
            .expect("list csv dir")
            .map(|e| e.expect("dir entry").path())
            .collect();
        assert_eq!(files.len(), 1, "expected one csv file, got {:?}", files);
        fs::read_to_string(&files[0]).expect("read csv")
    }

    pub fn options(&self, iso_dates: bool) -> ExportOptions {
        ExportOptions {
            iso_dates,
            csv_dir: Some(self.csv_dir.clone()),
            tokens_dir: Some(self.tokens_dir.clone()),
            settings_dir: Some(self.settings_dir.clone()),
        }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = self.cmd_to_stdout();
        cmd.arg("--csv").arg(&self.csv_dir);
        cmd
    }

    /// Same as `cmd` but without `--csv`, so the export goes to stdout.
    pub fn cmd_to_stdout(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("rota-export");
        cmd.arg("--settings")
            .arg(&self.settings_dir)
            .arg("--tokens")
            .arg(&self.tokens_dir)
            .env_remove("RUST_LOG");
        cmd
    }
}

pub fn settings_fixture() -> Value {
    serde_json::json!({
        "departments": [
            {"shortname": "acme", "system": "clwrota", "auth": {"username": "jane", "password": "pw1"}},
            {"shortname": "north", "system": "medirota", "auth": {"username": "sam", "password": "pw2"}}
        ],
        "day_range": 1,
        "return_data_set": {"name": "Name", "date": "Date"},
        "required_fields": ["name"]
    })
}

/// In-memory Public API keyed by department shortname.
#[derive(Default)]
pub struct FakeApi {
    pub valid_tokens: HashMap<String, String>,
    pub rejected_logins: HashMap<String, String>,
    pub rota: HashMap<String, Value>,
    pub logins: RefCell<Vec<String>>,
    pub reads: RefCell<Vec<(String, DateWindow)>>,
}

impl FakeApi {
    pub fn with_rota(mut self, shortname: &str, rows: Value) -> Self {
        self.rota.insert(shortname.to_string(), rows);
        self
    }

    pub fn with_valid_token(mut self, shortname: &str, token: &str) -> Self {
        self.valid_tokens
            .insert(shortname.to_string(), token.to_string());
        self
    }

    pub fn rejecting_login(mut self, shortname: &str, message: &str) -> Self {
        self.rejected_logins
            .insert(shortname.to_string(), message.to_string());
        self
    }
}

impl RotaApi for FakeApi {
    fn check_token(&self, d: &Department, token: &str) -> anyhow::Result<ApiOutcome<()>> {
        match self.valid_tokens.get(&d.shortname) {
            Some(t) if t == token => Ok(ApiOutcome::Success(())),
            _ => Ok(ApiOutcome::AuthRequired),
        }
    }

    fn login(&self, d: &Department) -> anyhow::Result<ApiOutcome<String>> {
        self.logins.borrow_mut().push(d.shortname.clone());
        if let Some(message) = self.rejected_logins.get(&d.shortname) {
            return Ok(ApiOutcome::Rejected(message.clone()));
        }
        Ok(ApiOutcome::Success(format!("fresh-{}", d.shortname)))
    }

    fn person_rota(
        &self,
        d: &AuthenticatedDepartment,
        window: &DateWindow,
    ) -> anyhow::Result<ApiOutcome<Vec<RotaRecord>>> {
        self.reads
            .borrow_mut()
            .push((d.shortname.clone(), *window));
        let rows = self
            .rota
            .get(&d.shortname)
            .cloned()
            .unwrap_or_else(|| serde_json::json!([]));
        Ok(ApiOutcome::Success(serde_json::from_value(rows)?))
    }
}
