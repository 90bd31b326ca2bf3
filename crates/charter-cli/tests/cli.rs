use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn charter(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("charter").unwrap();
    // Keep every run away from the user's config file.
    cmd.arg("--config").arg(dir.join("config.json"));
    cmd
}

fn write_config(dir: &Path) {
    fs::write(dir.join("config.json"), "{}").unwrap();
}

const NORTHERN_STAR: &str = r#"{
    "vessel_name": "northern star",
    "daily_hire_rate_usd": "$18,500 per day",
    "charter_period_months": "24",
    "year_built": "2018",
    "contract_date": "January 15, 2024"
}"#;

#[test]
fn test_standardize_json() {
    let dir = TempDir::new().unwrap();
    write_config(dir.path());
    let input = dir.path().join("star.json");
    fs::write(&input, NORTHERN_STAR).unwrap();

    let output = charter(dir.path())
        .arg("standardize")
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["vessel_name"], "M/V NORTHERN STAR");
    assert_eq!(value["contract_date"], "2024-01-15");
    assert_eq!(value["charter_period_months"], 24);
    assert_eq!(value["year_built"], 2018);
    assert_eq!(value["daily_hire_rate_usd"], 18500.0);
}

#[test]
fn test_standardize_csv_flat_view() {
    let dir = TempDir::new().unwrap();
    write_config(dir.path());
    let input = dir.path().join("star.json");
    fs::write(
        &input,
        "```json\n{\"vessel_name\": \"Atlas Glory\", \"imo_number\": null}\n```",
    )
    .unwrap();

    charter(dir.path())
        .args(["standardize", "--format", "csv"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Field,Value"))
        .stdout(predicate::str::contains("Vessel Name,ATLAS GLORY"))
        .stdout(predicate::str::contains("Imo Number,N/A"));
}

#[test]
fn test_standardize_report() {
    let dir = TempDir::new().unwrap();
    write_config(dir.path());
    let input = dir.path().join("star.json");
    fs::write(&input, r#"{"vessel_name": "Star", "contract_date": "TBA", "cargo": "coal"}"#).unwrap();

    charter(dir.path())
        .args(["standardize", "--report"])
        .arg(&input)
        .assert()
        .success()
        .stderr(predicate::str::contains("1/33 fields populated"))
        .stderr(predicate::str::contains("Unparsed (1):"))
        .stderr(predicate::str::contains("cargo"));
}

#[test]
fn test_standardize_rejects_empty_reply() {
    let dir = TempDir::new().unwrap();
    write_config(dir.path());
    let input = dir.path().join("empty.json");
    fs::write(&input, "{}").unwrap();

    charter(dir.path())
        .arg("standardize")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no contract data found"));
}

#[test]
fn test_standardize_missing_file() {
    let dir = TempDir::new().unwrap();
    write_config(dir.path());

    charter(dir.path())
        .args(["standardize", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_extended_schema_override() {
    let dir = TempDir::new().unwrap();
    write_config(dir.path());
    let input = dir.path().join("row.json");
    fs::write(&input, r#"{"VESSEL NAME": "pacific dawn", "ICE CLASS": "-"}"#).unwrap();

    let output = charter(dir.path())
        .args(["standardize", "--schema", "extended"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["VESSEL NAME"], "PACIFIC DAWN");
    assert_eq!(value["ICE CLASS"], "-");
}

#[test]
fn test_batch_and_query() {
    let dir = TempDir::new().unwrap();
    write_config(dir.path());
    let raw_dir = dir.path().join("raw");
    fs::create_dir(&raw_dir).unwrap();

    fs::write(raw_dir.join("a.json"), NORTHERN_STAR).unwrap();
    fs::write(
        raw_dir.join("b.json"),
        r#"{"vessel_name": "MV Northern Star", "contract_date": "03/04/2023"}"#,
    )
    .unwrap();
    fs::write(
        raw_dir.join("c.json"),
        r#"{"vessel_name": "Pacific Dawn", "contract_date": "2022-05-01"}"#,
    )
    .unwrap();

    let table = dir.path().join("contracts.csv");
    let store = dir.path().join("contracts.json");

    charter(dir.path())
        .arg("batch")
        .arg(format!("{}/*.json", raw_dir.display()))
        .arg("--output")
        .arg(&table)
        .arg("--store")
        .arg(&store)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 successful, 0 failed"));

    let csv = fs::read_to_string(&table).unwrap();
    let header = csv.lines().next().unwrap();
    assert!(header.starts_with("contract_date,vessel_name,year_built"));
    assert!(header.ends_with("_source_file,_processed_at"));
    assert_eq!(csv.lines().count(), 4);

    charter(dir.path())
        .args(["query", "--format", "json"])
        .arg(&store)
        .arg("northern")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"contract_date\": \"2024-01-15\""))
        .stdout(predicate::str::contains("\"contract_date\": \"2023-04-03\""))
        .stdout(predicate::str::contains("PACIFIC DAWN").not());

    charter(dir.path())
        .arg("query")
        .arg(&store)
        .arg("northern")
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 contracts"))
        .stdout(predicate::str::contains("3 contracts stored, 2 unique vessels"));
}

#[test]
fn test_batch_continue_on_error() {
    let dir = TempDir::new().unwrap();
    write_config(dir.path());
    let raw_dir = dir.path().join("raw");
    fs::create_dir(&raw_dir).unwrap();
    fs::write(raw_dir.join("good.json"), NORTHERN_STAR).unwrap();
    fs::write(raw_dir.join("bad.json"), "not json").unwrap();
    let pattern = format!("{}/*.json", raw_dir.display());
    let table = dir.path().join("out.csv");

    charter(dir.path())
        .arg("batch")
        .arg(&pattern)
        .arg("-o")
        .arg(&table)
        .assert()
        .failure()
        .stderr(predicate::str::contains("bad.json"));

    charter(dir.path())
        .arg("batch")
        .arg(&pattern)
        .arg("-o")
        .arg(&table)
        .arg("--continue-on-error")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 successful, 1 failed"));

    assert_eq!(fs::read_to_string(&table).unwrap().lines().count(), 2);
}

#[test]
fn test_schema_listing() {
    let dir = TempDir::new().unwrap();
    write_config(dir.path());

    charter(dir.path())
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("Schema: compact (33 fields"))
        .stdout(predicate::str::contains("daily_hire_rate_usd"));

    charter(dir.path())
        .args(["schema", "--schema", "extended", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"search_field\": \"VESSEL NAME\""));
}

#[test]
fn test_config_set_and_get() {
    let dir = TempDir::new().unwrap();

    charter(dir.path())
        .args(["config", "init"])
        .assert()
        .success();

    charter(dir.path())
        .args(["config", "set", "output.absent_marker", "n.a."])
        .assert()
        .success();

    charter(dir.path())
        .args(["config", "get", "output.absent_marker"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"n.a.\""));

    charter(dir.path())
        .args(["config", "get", "output.nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration key not found"));
}

#[test]
fn test_text_rejects_non_pdf() {
    let dir = TempDir::new().unwrap();
    write_config(dir.path());
    let input = dir.path().join("contract.txt");
    fs::write(&input, "TIME CHARTER").unwrap();

    charter(dir.path())
        .arg("text")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format"));
}
