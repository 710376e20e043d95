// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rust specs for the board: create, move, reorder.

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
    // "Created {id} ({status}[{index}])"
    stdout.split_whitespace().nth(1).unwrap().to_string()
}

#[test]
fn board_on_empty_workspace() {
    let temp = init_temp();
    wp().arg("board")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("BACKLOG (0)"))
        .stdout(predicate::str::contains("DONE (0)"));
}

#[test]
fn new_items_land_in_backlog_in_creation_order() {
    let temp = init_temp();
    create_item(&temp, "First", &[]);
    create_item(&temp, "Second", &[]);

    let output = wp()
        .arg("board")
        .current_dir(temp.path())
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("BACKLOG (2)"));
    let first = stdout.find("First").unwrap();
    let second = stdout.find("Second").unwrap();
    assert!(first < second);
}

#[test]
fn quick_add_into_a_column() {
    let temp = init_temp();
    create_item(&temp, "Hotfix", &["-s", "IN_PROGRESS"]);

    wp().arg("board")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("IN_PROGRESS (1)"));
}

#[test]
fn move_lands_item_at_requested_position() {
    let temp = init_temp();
    let id = create_item(&temp, "Mover", &[]);
    for title in ["Done one", "Done two", "Done three"] {
        create_item(&temp, title, &["-s", "DONE"]);
    }

    wp().args(["move", &id, "DONE", "0"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Moved {id} to DONE[0]")));

    let output = wp()
        .args(["board", "-f", "json"])
        .current_dir(temp.path())
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let titles: Vec<&str> = json["DONE"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["title"].as_str().unwrap())
        .collect();
    similar_asserts::assert_eq!(titles, ["Mover", "Done one", "Done two", "Done three"]);
}

#[test]
fn move_rejects_out_of_range_index() {
    let temp = init_temp();
    let id = create_item(&temp, "Mover", &[]);

    wp().args(["move", &id, "DONE", "3"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn move_rejects_unknown_item() {
    let temp = init_temp();
    wp().args(["move", "test-ghost", "DONE", "0"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("work item not found"));
}

#[test]
fn done_to_backlog_is_permitted() {
    let temp = init_temp();
    let id = create_item(&temp, "Reopen me", &["-s", "DONE"]);

    wp().args(["move", &id, "BACKLOG", "0"])
        .current_dir(temp.path())
        .assert()
        .success();
}

#[test]
fn board_json_exposes_columns() {
    let temp = init_temp();
    create_item(&temp, "First", &[]);

    let output = wp()
        .args(["board", "-f", "json"])
        .current_dir(temp.path())
        .output()
        .unwrap();
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("board -f json must emit valid JSON");

    assert_eq!(json["BACKLOG"].as_array().unwrap().len(), 1);
    assert_eq!(json["BACKLOG"][0]["title"], "First");
    assert_eq!(json["DONE"].as_array().unwrap().len(), 0);
}

#[test]
fn delete_removes_item_from_board() {
    let temp = init_temp();
    let id = create_item(&temp, "Short lived", &[]);

    wp().args(["delete", &id])
        .current_dir(temp.path())
        .assert()
        .success();

    wp().arg("board")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("BACKLOG (0)"));
}

#[test]
fn commands_fail_cleanly_outside_a_workspace() {
    let temp = TempDir::new().unwrap();
    wp().arg("board")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not initialized"));
}
