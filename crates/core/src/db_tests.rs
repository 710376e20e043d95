// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use super::*;
use crate::board::NewWorkItem;
use crate::event::Action;
use crate::item::Priority;
use chrono::{Duration, TimeZone};

fn test_db() -> Database {
    Database::open_in_memory().unwrap()
}

fn add(db: &mut Database, id: &str, title: &str) -> WorkItem {
    db.create_item(NewWorkItem::new(id.to_string(), title.to_string()), Utc::now())
        .unwrap()
}

fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).single().unwrap()
}

#[test]
fn create_and_get_item() {
    let mut db = test_db();
    add(&mut db, "web-a1b2", "Ship login");

    let item = db.get_item("web-a1b2").unwrap();
    assert_eq!(item.title, "Ship login");
    assert_eq!(item.status, Status::Backlog);
    assert_eq!(item.priority, Priority::Med);
}

#[test]
fn get_missing_item_is_not_found() {
    let db = test_db();
    assert!(matches!(
        db.get_item("web-ghost"),
        Err(Error::WorkItemNotFound(_))
    ));
}

#[test]
fn item_exists() {
    let mut db = test_db();
    assert!(!db.item_exists("web-a1b2").unwrap());
    add(&mut db, "web-a1b2", "Ship login");
    assert!(db.item_exists("web-a1b2").unwrap());
}

#[test]
fn database_persists_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("portal.db");

    {
        let mut db = Database::open(&path).unwrap();
        add(&mut db, "web-a1b2", "Ship login");
    }

    let db = Database::open(&path).unwrap();
    assert_eq!(db.get_item("web-a1b2").unwrap().title, "Ship login");
}

#[test]
fn update_item_applies_partial_fields() {
    let mut db = test_db();
    add(&mut db, "web-a1b2", "Ship login");

    let patch = WorkItemPatch {
        title: Some("Ship login flow".to_string()),
        priority: Some(Priority::High),
        owner: Some(Some("sam".to_string())),
        estimate: Some(Some(8.0)),
        ..Default::default()
    };
    let updated = db.update_item("web-a1b2", &patch).unwrap();

    assert_eq!(updated.title, "Ship login flow");
    assert_eq!(updated.priority, Priority::High);
    assert_eq!(updated.owner.as_deref(), Some("sam"));
    assert_eq!(updated.estimate, Some(8.0));
    // Untouched fields stay put.
    assert_eq!(updated.status, Status::Backlog);
}

#[test]
fn update_item_can_clear_nullable_fields() {
    let mut db = test_db();
    add(&mut db, "web-a1b2", "Ship login");
    db.update_item(
        "web-a1b2",
        &WorkItemPatch {
            owner: Some(Some("sam".to_string())),
            ..Default::default()
        },
    )
    .unwrap();

    let cleared = db
        .update_item(
            "web-a1b2",
            &WorkItemPatch {
                owner: Some(None),
                ..Default::default()
            },
        )
        .unwrap();
    assert!(cleared.owner.is_none());
}

#[test]
fn update_item_rejects_blank_title() {
    let mut db = test_db();
    add(&mut db, "web-a1b2", "Ship login");

    let patch = WorkItemPatch {
        title: Some("  ".to_string()),
        ..Default::default()
    };
    assert!(matches!(
        db.update_item("web-a1b2", &patch),
        Err(Error::TitleRequired)
    ));
}

#[test]
fn update_missing_item_is_not_found() {
    let mut db = test_db();
    let patch = WorkItemPatch {
        title: Some("New".to_string()),
        ..Default::default()
    };
    assert!(matches!(
        db.update_item("web-ghost", &patch),
        Err(Error::WorkItemNotFound(_))
    ));
}

#[test]
fn delete_item_cascades_to_attachments() {
    let mut db = test_db();
    add(&mut db, "web-a1b2", "Ship login");
    let now = Utc::now();
    db.add_comment("web-a1b2", "sam", "first", None, now).unwrap();
    db.add_task("web-a1b2", "Write tests", now).unwrap();

    db.delete_item("web-a1b2").unwrap();

    assert!(!db.item_exists("web-a1b2").unwrap());
    let orphaned_comments: i64 = db
        .conn
        .query_row("SELECT COUNT(*) FROM comments", [], |row| row.get(0))
        .unwrap();
    let orphaned_tasks: i64 = db
        .conn
        .query_row("SELECT COUNT(*) FROM tasks", [], |row| row.get(0))
        .unwrap();
    let orphaned_events: i64 = db
        .conn
        .query_row("SELECT COUNT(*) FROM events", [], |row| row.get(0))
        .unwrap();
    assert_eq!(orphaned_comments, 0);
    assert_eq!(orphaned_tasks, 0);
    assert_eq!(orphaned_events, 0);
}

#[test]
fn delete_missing_item_is_not_found() {
    let mut db = test_db();
    assert!(matches!(
        db.delete_item("web-ghost"),
        Err(Error::WorkItemNotFound(_))
    ));
}

// ── Sprints ─────────────────────────────────────────────────────────────

#[test]
fn create_sprint_derives_end_date() {
    let db = test_db();
    let start = utc(2026, 3, 2, 0);
    let sprint = db.create_sprint("Sprint 7", start).unwrap();

    assert_eq!(sprint.end_date, start + Duration::days(14));
    let reloaded = db.get_sprint(sprint.id).unwrap();
    assert_eq!(reloaded.end_date, sprint.end_date);
}

#[test]
fn sprint_items_filters_by_reference() {
    let mut db = test_db();
    let sprint = db.create_sprint("Sprint 7", utc(2026, 3, 2, 0)).unwrap();
    add(&mut db, "web-in", "In sprint");
    add(&mut db, "web-out", "Not in sprint");
    db.update_item(
        "web-in",
        &WorkItemPatch {
            sprint_id: Some(Some(sprint.id)),
            ..Default::default()
        },
    )
    .unwrap();

    let items = db.sprint_items(sprint.id).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, "web-in");
}

#[test]
fn active_sprint_via_database() {
    let db = test_db();
    db.create_sprint("Past", utc(2026, 1, 5, 0)).unwrap();
    let current = db.create_sprint("Current", utc(2026, 3, 2, 0)).unwrap();

    let active = db.active_sprint(utc(2026, 3, 10, 0)).unwrap();
    assert_eq!(active.map(|s| s.id), Some(current.id));
}

// ── Milestones ──────────────────────────────────────────────────────────

#[test]
fn milestones_order_by_creation() {
    let db = test_db();
    let first = db.create_milestone("Discovery", false).unwrap();
    let second = db.create_milestone("Build", true).unwrap();

    assert_eq!(first.order_index, 0);
    assert_eq!(second.order_index, 1);
    assert_eq!(second.approval_status, ApprovalStatus::Pending);

    let listed = db.list_milestones().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].title, "Discovery");
}

#[test]
fn milestone_approval_round_trip() {
    let mut db = test_db();
    let milestone = db.create_milestone("Build", true).unwrap();

    db.set_milestone_approval(
        milestone.id,
        ApprovalStatus::ChangesRequested,
        Some("Logo is wrong"),
    )
    .unwrap();

    let reloaded = db.get_milestone(milestone.id).unwrap();
    assert_eq!(reloaded.approval_status, ApprovalStatus::ChangesRequested);
    assert_eq!(reloaded.approval_notes.as_deref(), Some("Logo is wrong"));
}

#[test]
fn milestone_progress_recounts_items() {
    let mut db = test_db();
    let milestone = db.create_milestone("Build", false).unwrap();
    for (id, status) in [
        ("web-a", Status::Done),
        ("web-b", Status::Done),
        ("web-c", Status::Blocked),
        ("web-d", Status::InProgress),
    ] {
        let mut new = NewWorkItem::new(id.to_string(), format!("Item {id}"));
        new.status = status;
        new.milestone_id = Some(milestone.id);
        db.create_item(new, Utc::now()).unwrap();
    }

    let progress = db.milestone_progress(milestone.id).unwrap();
    assert_eq!(progress.completed, 2);
    assert_eq!(progress.total, 4);
    assert_eq!(progress.percent, Some(50));
}

#[test]
fn project_progress_over_empty_board() {
    let db = test_db();
    let progress = db.project_progress().unwrap();
    assert_eq!(progress.total, 0);
    assert_eq!(progress.percent, None);
}

// ── Change requests ─────────────────────────────────────────────────────

#[test]
fn first_submission_of_week_is_allowed() {
    let mut db = test_db();
    let request = db
        .create_change_request("client@acme", "Add PDF export", None, None, utc(2026, 8, 5, 9))
        .unwrap();

    assert_eq!(request.status, RequestStatus::Pending);
    assert_eq!(db.list_change_requests().unwrap().len(), 1);
}

#[test]
fn second_submission_same_week_is_limited() {
    let mut db = test_db();
    db.create_change_request("client@acme", "Add PDF export", None, None, utc(2026, 8, 3, 0))
        .unwrap();

    let err = db
        .create_change_request("client@acme", "More scope", None, None, utc(2026, 8, 9, 23))
        .unwrap_err();

    match err {
        Error::SubmissionLimited { next_available_at } => {
            assert_eq!(next_available_at, utc(2026, 8, 10, 0));
        }
        other => panic!("expected SubmissionLimited, got {other}"),
    }
    // The blocked insert must not have landed.
    assert_eq!(db.list_change_requests().unwrap().len(), 1);
}

#[test]
fn submission_allowed_next_week() {
    let mut db = test_db();
    db.create_change_request("client@acme", "Add PDF export", None, None, utc(2026, 8, 3, 0))
        .unwrap();

    let request = db
        .create_change_request("client@acme", "More scope", None, None, utc(2026, 8, 10, 0))
        .unwrap();
    assert_eq!(request.title, "More scope");
}

#[test]
fn check_submission_reports_window() {
    let mut db = test_db();
    let window = db.check_submission_allowed(utc(2026, 8, 5, 9)).unwrap();
    assert!(window.allowed);

    db.create_change_request("client@acme", "Add PDF export", None, None, utc(2026, 8, 5, 9))
        .unwrap();
    let window = db.check_submission_allowed(utc(2026, 8, 6, 9)).unwrap();
    assert!(!window.allowed);
    assert_eq!(window.next_available_at, Some(utc(2026, 8, 10, 0)));
}

#[test]
fn request_triage_updates_status() {
    let mut db = test_db();
    let request = db
        .create_change_request("client@acme", "Add PDF export", Some(12.0), None, utc(2026, 8, 5, 9))
        .unwrap();

    db.set_request_status(request.id, RequestStatus::Approved).unwrap();

    let listed = db.list_change_requests().unwrap();
    assert_eq!(listed[0].status, RequestStatus::Approved);
    assert_eq!(listed[0].estimate_hours, Some(12.0));
}

// ── Comments ────────────────────────────────────────────────────────────

#[test]
fn add_comment_and_reply() {
    let mut db = test_db();
    add(&mut db, "web-a1b2", "Ship login");
    let now = Utc::now();

    let root = db.add_comment("web-a1b2", "sam", "Looks off", None, now).unwrap();
    let reply = db
        .add_comment("web-a1b2", "alex", "Fixed now", Some(root.id), now + Duration::seconds(1))
        .unwrap();

    assert_eq!(reply.parent_id, Some(root.id));
    let forest = db.comment_forest("web-a1b2").unwrap();
    assert_eq!(forest.len(), 1);
    assert_eq!(forest[0].replies.len(), 1);
    assert_eq!(forest[0].replies[0].comment.author, "alex");
}

#[test]
fn comment_on_missing_item_is_not_found() {
    let mut db = test_db();
    assert!(matches!(
        db.add_comment("web-ghost", "sam", "hello", None, Utc::now()),
        Err(Error::WorkItemNotFound(_))
    ));
}

#[test]
fn reply_to_missing_parent_is_not_found() {
    let mut db = test_db();
    add(&mut db, "web-a1b2", "Ship login");
    assert!(matches!(
        db.add_comment("web-a1b2", "sam", "hello", Some(42), Utc::now()),
        Err(Error::CommentNotFound(42))
    ));
}

#[test]
fn reply_must_target_same_work_item() {
    let mut db = test_db();
    add(&mut db, "web-a1b2", "Ship login");
    add(&mut db, "web-c3d4", "Other item");
    let other = db
        .add_comment("web-c3d4", "sam", "elsewhere", None, Utc::now())
        .unwrap();

    assert!(matches!(
        db.add_comment("web-a1b2", "sam", "cross-item reply", Some(other.id), Utc::now()),
        Err(Error::CommentNotFound(_))
    ));
}

#[test]
fn blank_comment_is_rejected() {
    let mut db = test_db();
    add(&mut db, "web-a1b2", "Ship login");
    assert!(matches!(
        db.add_comment("web-a1b2", "sam", "  \n", None, Utc::now()),
        Err(Error::ContentRequired)
    ));
}

#[test]
fn comment_forest_for_missing_item_is_not_found() {
    let db = test_db();
    assert!(matches!(
        db.comment_forest("web-ghost"),
        Err(Error::WorkItemNotFound(_))
    ));
}

// ── Tasks ───────────────────────────────────────────────────────────────

#[test]
fn tasks_follow_the_ordering_pattern() {
    let mut db = test_db();
    add(&mut db, "web-a1b2", "Ship login");
    let now = Utc::now();

    let t0 = db.add_task("web-a1b2", "Write tests", now).unwrap();
    let t1 = db.add_task("web-a1b2", "Update docs", now).unwrap();
    assert_eq!(t0.order_index, 0);
    assert_eq!(t1.order_index, 1);

    // Moving a task appends it to the destination group.
    db.set_task_status(t0.id, Status::Done).unwrap();
    let tasks = db.tasks_for_item("web-a1b2").unwrap();
    let done: Vec<_> = tasks.iter().filter(|t| t.status == Status::Done).collect();
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].order_index, 0);
}

#[test]
fn task_on_missing_item_is_not_found() {
    let mut db = test_db();
    assert!(matches!(
        db.add_task("web-ghost", "Write tests", Utc::now()),
        Err(Error::WorkItemNotFound(_))
    ));
}

#[test]
fn set_status_of_missing_task_is_not_found() {
    let mut db = test_db();
    assert!(matches!(
        db.set_task_status(42, Status::Done),
        Err(Error::TaskNotFound(42))
    ));
}

// ── Activity log ────────────────────────────────────────────────────────

#[test]
fn events_accumulate_in_order() {
    let mut db = test_db();
    add(&mut db, "web-a1b2", "Ship login");
    db.add_comment("web-a1b2", "sam", "note", None, Utc::now() + Duration::seconds(1))
        .unwrap();

    let events = db.events_for_item("web-a1b2").unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].action, Action::Created);
    assert_eq!(events[1].action, Action::Commented);
}

#[test]
fn recent_events_respects_limit() {
    let mut db = test_db();
    for i in 0..5 {
        add(&mut db, &format!("web-i{i}"), "Item");
    }
    let events = db.recent_events(3).unwrap();
    assert_eq!(events.len(), 3);
}
