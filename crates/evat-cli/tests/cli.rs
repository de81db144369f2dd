use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const ADOPTION_CSV: &str = "\
State,Year,Vehicle_Segment,EV_Count,ICE_Count
Delhi,2020,2W,20,980
Delhi,2021,2W,40,960
Delhi,2022,2W,60,940
Goa,2021,2W,30,170
Goa,2022,2W,60,140
Assam,2022,2W,5,495
";

const POLICY_CSV: &str = "\
State,FAME_II_Incentive_Amount
Delhi,15000
Goa,5000
";

fn write_fixture(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn trend_prints_table_and_summary() {
    let tmp = tempdir().unwrap();
    let csv = write_fixture(tmp.path(), "adoption.csv", ADOPTION_CSV);
    let mut cmd = Command::cargo_bin("evat").unwrap();
    cmd.args(["trend", "--csv", csv.to_str().unwrap(), "--state", "Delhi"])
        .assert()
        .success()
        .stdout(predicate::str::contains("EV share trend — Delhi"))
        .stdout(predicate::str::contains("2022"))
        .stdout(predicate::str::contains("Latest (2022): 6.00% EV share"));
}

#[test]
fn readiness_ranks_states_within_bounds() {
    let tmp = tempdir().unwrap();
    let csv = write_fixture(tmp.path(), "adoption.csv", ADOPTION_CSV);
    let mut cmd = Command::cargo_bin("evat").unwrap();
    let output = cmd
        .args(["readiness", "--csv", csv.to_str().unwrap(), "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let scores = report["scores"].as_array().unwrap();
    assert_eq!(scores.len(), 3);
    for entry in scores {
        let score = entry["score"].as_f64().unwrap();
        assert!((0.0..=100.0).contains(&score));
    }
    // Goa leads on both penetration and momentum
    assert_eq!(scores[0]["state"], "Goa");
    assert!((scores[0]["score"].as_f64().unwrap() - 100.0).abs() < 1e-9);
}

#[test]
fn readiness_accepts_custom_weights() {
    let tmp = tempdir().unwrap();
    let csv = write_fixture(tmp.path(), "adoption.csv", ADOPTION_CSV);
    let mut cmd = Command::cargo_bin("evat").unwrap();
    cmd.args([
        "readiness",
        "--csv",
        csv.to_str().unwrap(),
        "--weights",
        "0.5,0.5",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("EV Readiness Index"));
}

#[test]
fn readiness_rejects_invalid_weights() {
    let tmp = tempdir().unwrap();
    let csv = write_fixture(tmp.path(), "adoption.csv", ADOPTION_CSV);
    let mut cmd = Command::cargo_bin("evat").unwrap();
    cmd.args([
        "readiness",
        "--csv",
        csv.to_str().unwrap(),
        "--weights",
        "0.9,0.5",
    ])
    .assert()
    .failure();
}

#[test]
fn readiness_with_policy_csv_uses_three_factors() {
    let tmp = tempdir().unwrap();
    let csv = write_fixture(tmp.path(), "adoption.csv", ADOPTION_CSV);
    let policy = write_fixture(tmp.path(), "policy.csv", POLICY_CSV);
    let mut cmd = Command::cargo_bin("evat").unwrap();
    let output = cmd
        .args([
            "readiness",
            "--csv",
            csv.to_str().unwrap(),
            "--policy-csv",
            policy.to_str().unwrap(),
            "--format",
            "json",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["weights"]["policy"].as_f64().unwrap(), 0.3);
}

#[test]
fn forecast_exact_linear_series() {
    let tmp = tempdir().unwrap();
    let csv = write_fixture(tmp.path(), "adoption.csv", ADOPTION_CSV);
    let mut cmd = Command::cargo_bin("evat").unwrap();
    // Delhi: 2% -> 4% -> 6%, so 2023 predicts 8.00
    cmd.args([
        "forecast",
        "--csv",
        csv.to_str().unwrap(),
        "--state",
        "Delhi",
        "--year",
        "2023",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("r_squared = 1.000"))
    .stdout(predicate::str::contains("8.00"));
}

#[test]
fn forecast_horizon_lists_each_year() {
    let tmp = tempdir().unwrap();
    let csv = write_fixture(tmp.path(), "adoption.csv", ADOPTION_CSV);
    let mut cmd = Command::cargo_bin("evat").unwrap();
    cmd.args([
        "forecast",
        "--csv",
        csv.to_str().unwrap(),
        "--state",
        "Delhi",
        "--year",
        "2023",
        "--horizon",
        "2",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("2023"))
    .stdout(predicate::str::contains("2025"));
}

#[test]
fn forecast_single_year_reports_insufficient_data() {
    let tmp = tempdir().unwrap();
    let csv = write_fixture(tmp.path(), "adoption.csv", ADOPTION_CSV);
    let mut cmd = Command::cargo_bin("evat").unwrap();
    cmd.args([
        "forecast",
        "--csv",
        csv.to_str().unwrap(),
        "--state",
        "Assam",
        "--year",
        "2030",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("Not enough data"));
}

#[test]
fn drivers_compares_policy_support() {
    let tmp = tempdir().unwrap();
    let csv = write_fixture(tmp.path(), "adoption.csv", ADOPTION_CSV);
    let policy = write_fixture(tmp.path(), "policy.csv", POLICY_CSV);
    let mut cmd = Command::cargo_bin("evat").unwrap();
    cmd.args([
        "drivers",
        "--csv",
        csv.to_str().unwrap(),
        "--policy-csv",
        policy.to_str().unwrap(),
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("EV penetration vs market size"))
    .stdout(predicate::str::contains("Policy support vs adoption"));
}

#[test]
fn out_flag_writes_report_and_run_manifest() {
    let tmp = tempdir().unwrap();
    let csv = write_fixture(tmp.path(), "adoption.csv", ADOPTION_CSV);
    let out = tmp.path().join("results").join("trend.json");
    let mut cmd = Command::cargo_bin("evat").unwrap();
    cmd.args([
        "trend",
        "--csv",
        csv.to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("Recorded run manifest"));
    assert!(out.exists());

    let manifests: Vec<_> = fs::read_dir(out.parent().unwrap())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().starts_with("run-"))
        .collect();
    assert_eq!(manifests.len(), 1);
    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(manifests[0].path()).unwrap()).unwrap();
    assert_eq!(manifest["command"], "trend");
    assert_eq!(manifest["status"], "success");
}

#[test]
fn completions_generate_for_bash() {
    let mut cmd = Command::cargo_bin("evat").unwrap();
    cmd.args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("evat"));
}
