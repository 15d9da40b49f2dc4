mod common;

use common::{settings_fixture, TestEnv};
use predicates::prelude::*;
use predicates::str::contains;
use serde_json::json;

#[test]
fn help_lists_every_flag() {
    let env = TestEnv::new();
    env.cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("--verbose"))
        .stdout(contains("--iso-dates"))
        .stdout(contains("--csv"))
        .stdout(contains("--tokens"))
        .stdout(contains("--settings"));
}

#[test]
fn missing_settings_file_exits_one() {
    let env = TestEnv::new();
    env.cmd()
        .assert()
        .code(1)
        .stderr(contains("settings.json"));
}

#[test]
fn malformed_settings_file_exits_one() {
    let env = TestEnv::new();
    std::fs::write(env.settings_dir.join("settings.json"), "{\"departments\": [").unwrap();
    env.cmd()
        .assert()
        .code(1)
        .stderr(contains("invalid settings file"));
}

#[test]
fn unknown_system_is_rejected_with_one_line() {
    let env = TestEnv::new();
    let mut settings = settings_fixture();
    settings["departments"][1]["system"] = json!("rotaplus");
    env.write_settings(&settings);
    env.cmd()
        .assert()
        .code(1)
        .stderr(contains("System must be one of: clwrota, medirota"))
        .stderr(predicate::function(|s: &str| s.trim_end().lines().count() == 1));
}

#[test]
fn additional_fields_must_be_returned() {
    let env = TestEnv::new();
    let mut settings = settings_fixture();
    settings["additional_fields"] = json!({"grade": "FY1"});
    env.write_settings(&settings);
    env.cmd()
        .assert()
        .code(1)
        .stderr(contains("All additional_fields keys must be in return_data_set"));
}

#[test]
fn non_integer_day_range_is_rejected() {
    let env = TestEnv::new();
    let mut settings = settings_fixture();
    settings["day_range"] = json!("a week");
    env.write_settings(&settings);
    env.cmd()
        .assert()
        .code(1)
        .stderr(contains("Ensure day_range is an integer"));
}

#[test]
fn malformed_tokens_file_exits_one() {
    let env = TestEnv::new();
    env.write_settings(&settings_fixture());
    std::fs::write(env.tokens_path(), "not json").unwrap();
    env.cmd()
        .assert()
        .code(1)
        .stderr(contains("invalid tokens file"));
}

#[test]
fn positional_arguments_are_refused() {
    let env = TestEnv::new();
    env.cmd().arg("extra").assert().failure();
}

fn settings_without_departments() -> serde_json::Value {
    let mut settings = settings_fixture();
    settings["departments"] = json!([]);
    settings
}

fn stdout_lines(expected: &'static [&'static str]) -> impl Predicate<str> {
    predicate::function(move |s: &str| s.lines().collect::<Vec<_>>() == expected)
}

#[test]
fn without_csv_dir_writes_to_stdout_and_stays_quiet() {
    let env = TestEnv::new();
    env.write_settings(&settings_without_departments());
    env.cmd_to_stdout()
        .assert()
        .success()
        .stdout(stdout_lines(&["Name,Date"]))
        .stderr(predicate::str::is_empty());
    assert!(!env.tokens_path().exists());
    assert!(std::fs::read_dir(&env.csv_dir).unwrap().next().is_none());
}

#[test]
fn verbose_reports_progress_on_stderr_without_colour() {
    let env = TestEnv::new();
    env.write_settings(&settings_without_departments());
    env.cmd_to_stdout()
        .arg("-v")
        .assert()
        .success()
        .stdout(stdout_lines(&["Name,Date"]))
        .stderr(contains("Writing CSV to stdout"))
        .stderr(contains("Export complete!"))
        .stderr(contains("\u{1b}[").not());
}

#[test]
fn csv_dir_gets_timestamped_file() {
    let env = TestEnv::new();
    env.write_settings(&settings_without_departments());
    env.cmd().assert().success().stdout(predicate::str::is_empty());
    assert_eq!(env.read_csv().lines().collect::<Vec<_>>(), vec!["Name,Date"]);
}
