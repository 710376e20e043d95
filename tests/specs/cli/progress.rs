// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rust specs for progress aggregation across scopes.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn wp() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("wp").unwrap()
}

fn init_temp() -> TempDir {
    let temp = TempDir::new().unwrap();
    wp().arg("init")
        .arg("--prefix")
        .arg("test")
        .current_dir(temp.path())
        .assert()
        .success();
    temp
}

fn create_item(temp: &TempDir, title: &str, extra: &[&str]) -> String {
    let output = wp()
        .arg("new")
        .arg(title)
        .args(extra)
        .current_dir(temp.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout.split_whitespace().nth(1).unwrap().to_string()
}

#[test]
fn empty_project_has_no_data_not_zero_percent() {
    let temp = init_temp();
    wp().arg("progress")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("no items"))
        .stdout(predicate::str::contains("0%").not());
}

#[test]
fn two_of_four_done_is_fifty_percent() {
    let temp = init_temp();
    create_item(&temp, "Done one", &["-s", "DONE"]);
    create_item(&temp, "Done two", &["-s", "DONE"]);
    create_item(&temp, "Stuck", &["-s", "BLOCKED"]);
    create_item(&temp, "Active", &["-s", "IN_PROGRESS"]);

    wp().arg("progress")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("2/4 done (50%)"));
}

#[test]
fn progress_updates_when_items_move() {
    let temp = init_temp();
    let id = create_item(&temp, "Almost there", &[]);
    wp().arg("progress")
        .current_dir(temp.path())
        .assert()
        .stdout(predicate::str::contains("0/1 done (0%)"));

    wp().args(["move", &id, "DONE", "0"])
        .current_dir(temp.path())
        .assert()
        .success();

    wp().arg("progress")
        .current_dir(temp.path())
        .assert()
        .stdout(predicate::str::contains("1/1 done (100%)"));
}

#[test]
fn sprint_progress_reports_items_and_time() {
    let temp = init_temp();
    wp().args(["sprint", "new", "Sprint 1", "--start", "2026-01-05"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("2026-01-05 to 2026-01-19"));

    create_item(&temp, "Committed", &["--sprint", "1", "-s", "DONE"]);
    create_item(&temp, "Also committed", &["--sprint", "1"]);

    // The sprint window is long past: time progress is capped at 100%.
    wp().args(["progress", "--sprint", "1"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("items 1/2 done (50%)"))
        .stdout(predicate::str::contains("time 100% elapsed"));
}

#[test]
fn sprint_progress_json_is_machine_readable() {
    let temp = init_temp();
    wp().args(["sprint", "new", "Sprint 1", "--start", "2026-01-05"])
        .current_dir(temp.path())
        .assert()
        .success();
    create_item(&temp, "Committed", &["--sprint", "1", "-s", "DONE"]);

    let output = wp()
        .args(["progress", "--sprint", "1", "-f", "json"])
        .current_dir(temp.path())
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(json["items"]["completed"], 1);
    assert_eq!(json["items"]["total"], 1);
    assert_eq!(json["items"]["percent"], 100);
    assert_eq!(json["time_percent"], 100);
}

#[test]
fn milestone_progress_counts_only_its_items() {
    let temp = init_temp();
    wp().args(["milestone", "new", "Phase 1"])
        .current_dir(temp.path())
        .assert()
        .success();

    create_item(&temp, "In phase", &["--milestone", "1", "-s", "DONE"]);
    create_item(&temp, "Outside phase", &[]);

    wp().args(["progress", "--milestone", "1"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1/1 done (100%)"));
}

#[test]
fn unknown_sprint_scope_fails_cleanly() {
    let temp = init_temp();
    wp().args(["progress", "--sprint", "9"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("sprint not found"));
}
