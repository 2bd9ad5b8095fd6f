//! CLI integration tests for the `rollup` binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const CSV_REPORT: &str = "\
월별 납품 현황,,,,
작성일: 2024-03-02,,,,
납품일,규 격,단위,수량,합계금액
2024-01-05,A,EA,\"1,000\",\"10,000\"
,A,EA,500,\"5,000\"
2024-02-01,합계,EA,999,999
";

fn rollup() -> Command {
    Command::cargo_bin("rollup").unwrap()
}

#[test]
fn test_no_args_shows_usage() {
    rollup()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_help_lists_commands() {
    rollup()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("summarize"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("watch"));
}

#[test]
fn test_summarize_writes_workbook() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("report.csv");
    let output = temp_dir.path().join("summary.xlsx");
    fs::write(&input, CSV_REPORT).unwrap();

    rollup()
        .arg("summarize")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-01"));

    assert!(output.exists(), "summary workbook should be written");
}

#[test]
fn test_summarize_json_output() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("report.csv");
    let output = temp_dir.path().join("summary.xlsx");
    fs::write(&input, CSV_REPORT).unwrap();

    rollup()
        .arg("summarize")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"period\": \"2024-01\""))
        .stdout(predicate::str::contains("\"specification\": \"A\""));
}

#[test]
fn test_summarize_nonexistent_file_fails() {
    rollup()
        .arg("summarize")
        .arg("nonexistent.csv")
        .assert()
        .failure();
}

#[test]
fn test_summarize_missing_columns_fails() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("report.csv");
    fs::write(&input, "제목,,\n,,\n품명,수량,금액\n부품,1,10\n").unwrap();

    rollup().arg("summarize").arg(&input).assert().failure();
}

#[test]
fn test_check_passes_on_valid_report() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("report.csv");
    fs::write(&input, CSV_REPORT).unwrap();

    rollup()
        .arg("check")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("summarizable"));
}

#[test]
fn test_check_fails_on_unreadable_file() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("garbage.bin");
    fs::write(&input, [0xffu8; 16]).unwrap();

    rollup().arg("check").arg(&input).assert().failure();
}

#[test]
fn test_check_verbose_reports_format() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("report.csv");
    fs::write(&input, CSV_REPORT).unwrap();

    rollup()
        .arg("check")
        .arg(&input)
        .arg("--verbose")
        .assert()
        .success()
        .stdout(predicate::str::contains("csv(utf-8)"));
}
