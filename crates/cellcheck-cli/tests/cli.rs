use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

fn cellcheck() -> Command {
    let mut cmd = Command::cargo_bin("cellcheck").unwrap();
    cmd.env_remove("CONFIG_FILE").env_remove("RUST_LOG");
    cmd
}

fn sheet_fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../cellcheck-sheet/tests/fixtures")
        .join(name)
}

#[test]
fn extract_announces_default_sheet() {
    cellcheck()
        .arg("extract")
        .arg(sheet_fixture("snapshot.json"))
        .args(["A1", "B4", "A9", "9A"])
        .assert()
        .success()
        .stdout(
            "Using sheet: \"Summary\" (2 sheets available)\n\
             \n\
             A1: Region\n\
             B4: =SUM(B2:B3) (evaluates to: 10)\n\
             A9: [ERROR] Row out of bounds\n\
             9A: [ERROR] Invalid cell reference: 9A\n",
        );
}

#[test]
fn extract_named_sheet_skips_banner() {
    cellcheck()
        .arg("extract")
        .arg(sheet_fixture("snapshot.json"))
        .args(["A1", "--sheet", "Raw"])
        .assert()
        .success()
        .stdout("A1: 1\n");
}

#[test]
fn extract_rejects_unknown_sheet_and_missing_file() {
    cellcheck()
        .arg("extract")
        .arg(sheet_fixture("snapshot.json"))
        .args(["A1", "--sheet", "Nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sheet `Nope` not found"));

    cellcheck()
        .args(["extract", "no-such-file.json", "A1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load snapshot"));
}

#[test]
fn snapshot_writes_pretty_json() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("spreadsheet.json");
    cellcheck()
        .arg("snapshot")
        .arg(sheet_fixture("sheets_api.json"))
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout("");

    let written = fs::read_to_string(&out).unwrap();
    assert!(written.starts_with("{\n  \"Summary\": {"));
    assert!(written.contains("\"formula\": \"=SUM(B1:B2)\""));

    cellcheck()
        .arg("extract")
        .arg(&out)
        .args(["B3", "--sheet", "Summary"])
        .assert()
        .success()
        .stdout("B3: =SUM(B1:B2) (evaluates to: 30)\n");
}

#[test]
fn embed_url_adds_minimal_mode() {
    cellcheck()
        .args([
            "embed-url",
            "https://docs.google.com/spreadsheets/d/abc123/edit#gid=9",
        ])
        .assert()
        .success()
        .stdout("https://docs.google.com/spreadsheets/d/abc123/edit?gid=9&rm=minimal\n");
}

#[test]
fn config_edit_cycle_persists_canonical_form() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.yaml");
    let run = |args: &[&str]| {
        let mut cmd = cellcheck();
        cmd.arg("--config").arg(&config).args(args);
        cmd.assert()
    };

    run(&["config", "url", "https://docs.google.com/spreadsheets/d/abc/edit"]).success();
    run(&["config", "add", "--cell", "A1", "--value", "10"])
        .success()
        .stdout("0\n");
    run(&["config", "add", "--cell", "B2", "--function", "=A1*2"])
        .success()
        .stdout("1\n");
    run(&["config", "add"]).success().stdout("2\n");
    run(&["config", "set", "2", "cellName", "C3"]).success();
    run(&["config", "kind", "0", "function", "--expect", "=5+5"]).success();
    run(&["config", "remove", "1"]).success();

    let yaml = fs::read_to_string(&config).unwrap();
    assert!(yaml.contains("https://docs.google.com/spreadsheets/d/abc/edit"));
    assert!(yaml.contains("expectedFunction:"));
    assert!(yaml.contains("=5+5"));
    assert!(!yaml.contains("B2"));
    assert!(!yaml.contains("verificationKind"));

    run(&["config", "show", "--json"]).success().stdout(predicate::str::contains(
        "\"cellsToVerify\": [\n    {\n      \"cellName\": \"A1\",\n      \"expectedFunction\": \"=5+5\"\n    },\n    {\n      \"cellName\": \"C3\",\n      \"expectedValue\": \"\"\n    }\n  ]",
    ));
    run(&["config", "lint"])
        .success()
        .stdout(predicate::str::contains("no issues found"));
}

#[test]
fn config_errors_leave_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.yaml");
    fs::write(&config, "spreadsheetURL: ''\ncellsToVerify:\n- cellName: A1\n  expectedValue: '1'\n").unwrap();
    let before = fs::read_to_string(&config).unwrap();

    cellcheck()
        .arg("--config")
        .arg(&config)
        .args(["config", "remove", "4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("index 4 is out of range"));
    assert_eq!(fs::read_to_string(&config).unwrap(), before);

    cellcheck()
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "0", "bogus", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown record field `bogus`"));
}

#[test]
fn config_path_comes_from_env() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("from-env.yaml");
    cellcheck()
        .env("CONFIG_FILE", &config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cellsToVerify: []"));
    assert!(config.exists());
}

#[test]
fn lint_fails_on_issues() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("bad.yaml");
    fs::write(
        &config,
        "spreadsheetURL: https://example.com\ncellsToVerify:\n- cellName: 1A\n  expectedValue: x\n",
    )
    .unwrap();

    cellcheck()
        .arg("--config")
        .arg(&config)
        .args(["config", "lint"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("spreadsheetURL: expected a Google Sheets URL"))
        .stdout(predicate::str::contains(
            "cellsToVerify[0].cellName: Invalid cell reference: 1A",
        ))
        .stderr(predicate::str::contains("config validation failed with 2 issue(s)"));
}

#[test]
fn kind_switch_without_expectation_keeps_stored_value() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.yaml");
    fs::write(&config, "spreadsheetURL: ''\ncellsToVerify:\n- cellName: A1\n  expectedValue: '10'\n").unwrap();
    let before = fs::read_to_string(&config).unwrap();
    let run = |args: &[&str]| {
        let mut cmd = cellcheck();
        cmd.arg("--config").arg(&config).args(args);
        cmd.assert()
    };

    run(&["config", "kind", "0", "function"])
        .failure()
        .stderr(predicate::str::contains("record 0: `expectedFunction` is empty"));
    run(&["config", "kind", "0", "function", "--expect", ""])
        .failure()
        .stderr(predicate::str::contains("needs a non-empty expectedFunction"));
    assert_eq!(fs::read_to_string(&config).unwrap(), before);

    run(&["config", "kind", "0", "value"]).success();
    run(&["config", "show", "--json"])
        .success()
        .stdout(predicate::str::contains("\"expectedValue\": \"10\""));
}

#[test]
fn setting_an_inactive_field_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.yaml");
    fs::write(&config, "spreadsheetURL: ''\ncellsToVerify:\n- cellName: A1\n  expectedValue: '10'\n").unwrap();
    let before = fs::read_to_string(&config).unwrap();

    cellcheck()
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "0", "expectedFunction", "=B1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "`expectedFunction` is inactive for a value check",
        ));
    assert_eq!(fs::read_to_string(&config).unwrap(), before);

    cellcheck()
        .arg("--config")
        .arg(&config)
        .args(["config", "add", "--cell", "B1", "--function", ""])
        .assert()
        .failure();
    assert_eq!(fs::read_to_string(&config).unwrap(), before);
}
