use serde_json::{Value, json};
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn stitch_binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_stitch1d-rs"))
}

fn reference_job(config: Value) -> Value {
    json!({
        "lhs": {
            "x": [0.0, 1.0, 2.0, 3.0, 4.0],
            "y": [1.0, 1.0, 1.0, 1.0],
            "e": [0.0, 0.0, 0.0, 0.0]
        },
        "rhs": {
            "x": [2.0, 3.0, 4.0, 5.0, 6.0],
            "y": [2.0, 2.0, 2.0, 2.0],
            "e": [0.0, 0.0, 0.0, 0.0]
        },
        "config": config
    })
}

fn write_job(dir: &Path, job: &Value) -> std::path::PathBuf {
    let path = dir.join("job.json");
    fs::write(&path, job.to_string()).expect("job file should be written");
    path
}

fn run_with_job(job: &Value, extra_args: &[&str]) -> (Output, TempDir) {
    let temp = TempDir::new().expect("tempdir should be created");
    let job_path = write_job(temp.path(), job);
    let output = stitch_binary()
        .arg("run")
        .arg(&job_path)
        .args(extra_args)
        .output()
        .expect("binary should run");
    (output, temp)
}

#[test]
fn run_reports_the_merged_histogram_and_scale_factor() {
    let job = reference_job(json!({
        "rebinParams": [1.0],
        "useManualScaleFactor": true,
        "manualScaleFactor": 1.0
    }));
    let (output, _temp) = run_with_job(&job, &[]);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let report: Value =
        serde_json::from_slice(&output.stdout).expect("stdout should hold the JSON report");

    assert_eq!(report["scaleFactor"].as_f64(), Some(1.0));
    assert_eq!(report["overlap"]["startBin"].as_u64(), Some(2));
    assert_eq!(report["overlap"]["endBin"].as_u64(), Some(4));

    let merged: Vec<f64> = report["merged"]["y"]
        .as_array()
        .expect("merged signal should be an array")
        .iter()
        .map(|value| value.as_f64().expect("signal values are numbers"))
        .collect();
    assert_eq!(merged, vec![1.0, 1.0, 1.5, 1.5, 2.0, 2.0]);
}

#[test]
fn run_computes_the_automatic_scale_factor_by_default() {
    let job = reference_job(json!({ "rebinParams": [1.0] }));
    let (output, _temp) = run_with_job(&job, &[]);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let report: Value = serde_json::from_slice(&output.stdout).expect("report should parse");
    assert_eq!(report["scaleFactor"].as_f64(), Some(0.5));
}

#[test]
fn run_writes_the_report_to_the_requested_path() {
    let job = reference_job(json!({ "rebinParams": [1.0] }));
    let temp = TempDir::new().expect("tempdir should be created");
    let job_path = write_job(temp.path(), &job);
    let report_path = temp.path().join("reports/stitched.json");

    let output = stitch_binary()
        .arg("run")
        .arg(&job_path)
        .arg("--output")
        .arg(&report_path)
        .output()
        .expect("binary should run");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let report: Value = serde_json::from_str(
        &fs::read_to_string(&report_path).expect("report file should exist"),
    )
    .expect("report file should parse");
    assert_eq!(report["scaleFactor"].as_f64(), Some(0.5));
}

#[test]
fn an_unresolvable_overlap_exits_with_the_resolution_code() {
    let job = json!({
        "lhs": {
            "x": [0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
            "y": [1.0, 1.0, 1.0, 1.0, 1.0],
            "e": [0.0, 0.0, 0.0, 0.0, 0.0]
        },
        "rhs": {
            "x": [0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
            "y": [2.0, 2.0, 2.0, 2.0, 2.0],
            "e": [0.0, 0.0, 0.0, 0.0, 0.0]
        },
        "config": {
            "startOverlap": 2.1,
            "endOverlap": 2.9,
            "rebinParams": [0.0, 1.0, 5.0]
        }
    });
    let (output, _temp) = run_with_job(&job, &[]);

    assert_eq!(output.status.code(), Some(4));
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("finer rebin parameters"),
        "stderr should explain the resolution failure"
    );
}

#[test]
fn malformed_histograms_exit_with_the_shape_code() {
    let job = json!({
        "lhs": { "x": [0.0, 1.0, 2.0], "y": [1.0, 1.0, 1.0], "e": [0.0, 0.0, 0.0] },
        "rhs": { "x": [2.0, 3.0, 4.0], "y": [2.0, 2.0], "e": [0.0, 0.0] }
    });
    let (output, _temp) = run_with_job(&job, &[]);
    assert_eq!(output.status.code(), Some(5));
}

#[test]
fn unknown_subcommands_exit_with_the_usage_code() {
    let output = stitch_binary()
        .arg("merge")
        .output()
        .expect("binary should run");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn inspect_reports_the_resolved_bounds_and_notices() {
    let job = reference_job(json!({ "rebinParams": [1.0] }));
    let temp = TempDir::new().expect("tempdir should be created");
    let job_path = write_job(temp.path(), &job);

    let output = stitch_binary()
        .arg("inspect")
        .arg(&job_path)
        .output()
        .expect("binary should run");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let report: Value = serde_json::from_slice(&output.stdout).expect("report should parse");
    assert_eq!(report["startOverlap"].as_f64(), Some(2.0));
    assert_eq!(report["endOverlap"].as_f64(), Some(4.0));
    assert_eq!(report["gridBinCount"].as_u64(), Some(6));

    let notices = report["notices"].as_array().expect("notices array");
    assert_eq!(notices.len(), 2);
    assert_eq!(notices[0]["kind"].as_str(), Some("startDefaulted"));
    assert_eq!(notices[1]["kind"].as_str(), Some("endDefaulted"));
}
