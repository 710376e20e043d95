// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rust specs for the weekly change-request window.

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

#[test]
fn first_submission_is_accepted() {
    let temp = init_temp();
    wp().args(["request", "new", "Add PDF export", "-a", "client@acme"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Submitted change request #1"));
}

#[test]
fn second_submission_in_same_week_is_blocked_with_next_date() {
    let temp = init_temp();
    wp().args(["request", "new", "Add PDF export"])
        .current_dir(temp.path())
        .assert()
        .success();

    // Both submissions share the calendar week of "now".
    wp().args(["request", "new", "Even more scope"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already submitted this week"))
        .stderr(predicate::str::contains("next submission opens"));

    // The blocked request must not be stored.
    let output = wp()
        .args(["request", "list", "-f", "json"])
        .current_dir(temp.path())
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 1);
}

#[test]
fn status_reflects_the_window() {
    let temp = init_temp();
    wp().args(["request", "status"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("can be submitted now"));

    wp().args(["request", "new", "Add PDF export"])
        .current_dir(temp.path())
        .assert()
        .success();

    wp().args(["request", "status"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Weekly limit used"));
}

#[test]
fn triage_decisions_are_recorded() {
    let temp = init_temp();
    wp().args(["request", "new", "Add PDF export", "--hours", "12"])
        .current_dir(temp.path())
        .assert()
        .success();

    wp().args(["request", "approve", "1"])
        .current_dir(temp.path())
        .assert()
        .success();

    wp().args(["request", "list"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("[APPROVED] Add PDF export"))
        .stdout(predicate::str::contains("est 12h"));
}

#[test]
fn submissions_survive_process_restarts() {
    // The window is evaluated against live rows, not an in-memory counter.
    let temp = init_temp();
    wp().args(["request", "new", "Add PDF export"])
        .current_dir(temp.path())
        .assert()
        .success();

    // A fresh process sees the same week as used.
    wp().args(["request", "new", "Second try"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already submitted this week"));
}
