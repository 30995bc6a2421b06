//! Concurrency tests for gutlog.
//!
//! These tests verify that repeated and interleaved invocations can safely:
//! - Append to the journals (file locking)
//! - Run trigger attribution without losing increments

use assert_cmd::Command;
use chrono::{Duration, Utc};
use tempfile::TempDir;

fn cli() -> Command {
    Command::cargo_bin("gutlog").expect("Failed to find gutlog binary")
}

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

#[test]
fn test_repeated_moment_logging_appends_all() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    for _ in 0..5 {
        cli()
            .arg("moment")
            .arg("--data-dir")
            .arg(data_dir)
            .arg("--gas")
            .assert()
            .success();
    }

    let journal = std::fs::read_to_string(data_dir.join("users/default/moments.jsonl"))
        .expect("Failed to read moments journal");
    assert_eq!(journal.lines().count(), 5);
}

#[test]
fn test_attribution_never_loses_increments() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    // One meal covering all five moments' windows
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

    // Each moment is a separate correlation event
    for _ in 0..5 {
        cli()
            .arg("moment")
            .arg("--data-dir")
            .arg(data_dir)
            .arg("--cramping")
            .assert()
            .success();
    }

    let table: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(data_dir.join("users/default/triggers.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(table["Garlic"]["bad_occurrences"], 5);
    // 5 bad, 0 good clears the Medium thresholds
    assert_eq!(table["Garlic"]["confidence"], "medium");
}

#[test]
fn test_interleaved_users_do_not_clobber() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    for user in ["alice", "bob", "alice", "bob"] {
        cli()
            .arg("meal")
            .arg("--data-dir")
            .arg(data_dir)
            .arg("--user")
            .arg(user)
            .arg("--foods")
            .arg("Rice")
            .assert()
            .success();
    }

    for user in ["alice", "bob"] {
        let journal =
            std::fs::read_to_string(data_dir.join(format!("users/{}/meals.jsonl", user)))
                .expect("Failed to read meals journal");
        assert_eq!(journal.lines().count(), 2, "user {}", user);
    }
}
