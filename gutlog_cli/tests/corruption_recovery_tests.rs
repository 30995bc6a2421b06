//! Corruption recovery tests for gutlog.
//!
//! A damaged journal line or trigger table must never brick the CLI:
//! corrupt lines are skipped, a corrupt table restarts empty.

use assert_cmd::Command;
use chrono::{Duration, Utc};
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn cli() -> Command {
    Command::cargo_bin("gutlog").expect("Failed to find gutlog binary")
}

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

fn corrupt_append(path: &Path, garbage: &str) {
    let mut contents = std::fs::read_to_string(path).unwrap_or_default();
    contents.push_str(garbage);
    contents.push('\n');
    std::fs::write(path, contents).unwrap();
}

#[test]
fn test_corrupt_meal_line_does_not_break_attribution() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .arg("meal")
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--foods")
        .arg("Garlic")
        .arg("--raw")
        .arg("--at")
        .arg(&(Utc::now() - Duration::hours(1)).to_rfc3339())
        .assert()
        .success();

    corrupt_append(&data_dir.join("users/default/meals.jsonl"), "{ truncated");

    // Attribution still sees the valid meal
    cli()
        .arg("moment")
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--bloating")
        .assert()
        .success();

    let table: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(data_dir.join("users/default/triggers.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(table["Garlic"]["bad_occurrences"], 1);
}

#[test]
fn test_corrupt_trigger_table_restarts_empty() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    let user_dir = data_dir.join("users/default");
    std::fs::create_dir_all(&user_dir).unwrap();
    std::fs::write(user_dir.join("triggers.json"), "not json at all").unwrap();

    cli()
        .arg("triggers")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("No trigger foods"));
}

#[test]
fn test_corrupt_moment_line_does_not_break_score() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .arg("moment")
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--bristol")
        .arg("4")
        .assert()
        .success();

    corrupt_append(&data_dir.join("users/default/moments.jsonl"), "xxxx");

    cli()
        .arg("score")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Gut health score:"));
}

#[test]
fn test_corrupt_profile_falls_back_to_default_baseline() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    let user_dir = data_dir.join("users/default");
    std::fs::create_dir_all(&user_dir).unwrap();
    std::fs::write(user_dir.join("profile.json"), "{ bad json").unwrap();

    cli()
        .arg("score")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Gut health score: 50"));
}
