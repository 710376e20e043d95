// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rust specs for comment threads: nesting, retrieval, highlighting.

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

fn create_item(temp: &TempDir, title: &str) -> String {
    let output = wp()
        .arg("new")
        .arg(title)
        .current_dir(temp.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout.split_whitespace().nth(1).unwrap().to_string()
}

/// Add a comment and return its id, parsed from "Added comment #N ...".
fn add_comment(temp: &TempDir, item: &str, content: &str, reply_to: Option<&str>) -> String {
    let mut cmd = wp();
    cmd.args(["comment", item, content, "-a", "sam"]);
    if let Some(parent) = reply_to {
        cmd.args(["-r", parent]);
    }
    let output = cmd.current_dir(temp.path()).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let tag = stdout
        .split_whitespace()
        .find(|word| word.starts_with('#'))
        .unwrap()
        .to_string();
    tag.trim_start_matches('#').to_string()
}

#[test]
fn comment_starts_a_thread() {
    let temp = init_temp();
    let item = create_item(&temp, "Design homepage");

    add_comment(&temp, &item, "First pass looks good", None);

    wp().args(["show", &item])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Comments"))
        .stdout(predicate::str::contains("First pass looks good"));
}

#[test]
fn three_level_chain_is_retrievable() {
    let temp = init_temp();
    let item = create_item(&temp, "Design homepage");

    let root = add_comment(&temp, &item, "root comment", None);
    let reply = add_comment(&temp, &item, "first reply", Some(&root));
    add_comment(&temp, &item, "reply to reply", Some(&reply));

    let output = wp()
        .args(["show", &item, "-f", "json"])
        .current_dir(temp.path())
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    let roots = json["comments"].as_array().unwrap();
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0]["replies"][0]["replies"][0]["content"], "reply to reply");
}

#[test]
fn highlight_marks_the_located_comment() {
    let temp = init_temp();
    let item = create_item(&temp, "Design homepage");

    let root = add_comment(&temp, &item, "root comment", None);
    let reply = add_comment(&temp, &item, "buried reply", Some(&root));

    let output = wp()
        .args(["show", &item, "--comment", &reply])
        .current_dir(temp.path())
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);

    let marked: Vec<&str> = stdout.lines().filter(|l| l.starts_with('>')).collect();
    assert_eq!(marked.len(), 1);
    assert!(marked[0].contains(&format!("#{reply}")));
}

#[test]
fn highlighting_a_missing_comment_is_not_an_error() {
    let temp = init_temp();
    let item = create_item(&temp, "Design homepage");
    add_comment(&temp, &item, "only comment", None);

    let output = wp()
        .args(["show", &item, "--comment", "999"])
        .current_dir(temp.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.lines().any(|l| l.starts_with('>')));
}

#[test]
fn replies_interleave_in_creation_order() {
    let temp = init_temp();
    let item = create_item(&temp, "Design homepage");
    let root = add_comment(&temp, &item, "root", None);

    add_comment(&temp, &item, "first reply", Some(&root));
    add_comment(&temp, &item, "second reply", Some(&root));

    let output = wp()
        .args(["show", &item, "-f", "json"])
        .current_dir(temp.path())
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let replies = json["comments"][0]["replies"].as_array().unwrap();

    assert_eq!(replies[0]["content"], "first reply");
    assert_eq!(replies[1]["content"], "second reply");
}

#[test]
fn reply_to_unknown_comment_fails() {
    let temp = init_temp();
    let item = create_item(&temp, "Design homepage");

    wp().args(["comment", &item, "dangling", "-r", "42"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("comment not found"));
}

#[test]
fn deleting_the_item_deletes_the_forest() {
    let temp = init_temp();
    let item = create_item(&temp, "Design homepage");
    add_comment(&temp, &item, "soon gone", None);

    wp().args(["delete", &item])
        .current_dir(temp.path())
        .assert()
        .success();

    wp().args(["show", &item])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("work item not found"));
}
