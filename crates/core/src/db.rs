// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! SQLite-backed store for the delivery portal.
//!
//! The [`Database`] struct provides all data access operations for work
//! items, tasks, sprints, milestones, change requests, comments, and the
//! activity log. One database is one project workspace; the project is the
//! partition, not a column.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use crate::comment::Comment;
use crate::error::{Error, Result};
use crate::event::Event;
use crate::item::{Status, Task, WorkItem};
use crate::request::{ChangeRequest, RequestStatus};
use crate::sprint::{ApprovalStatus, Milestone, Sprint};
use crate::thread::{build_forest, CommentNode};
use crate::week::{can_submit, SubmissionWindow};

/// SQL schema for the portal database.
pub const SCHEMA: &str = r#"
-- Board items. order_index is the position key within the status group.
CREATE TABLE IF NOT EXISTS work_items (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    description TEXT,
    status TEXT NOT NULL DEFAULT 'BACKLOG',
    priority TEXT NOT NULL DEFAULT 'MED',
    owner TEXT,
    due_date TEXT,
    estimate REAL,
    sprint_id INTEGER REFERENCES sprints(id),
    milestone_id INTEGER REFERENCES milestones(id),
    order_index INTEGER NOT NULL DEFAULT 0,
    client_visible INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Sub-items, same status/ordering pattern at smaller scale
CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    work_item_id TEXT NOT NULL,
    title TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'BACKLOG',
    order_index INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    FOREIGN KEY (work_item_id) REFERENCES work_items(id)
);

-- Fixed two-week windows; end_date is derived, never edited
CREATE TABLE IF NOT EXISTS sprints (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    start_date TEXT NOT NULL,
    end_date TEXT NOT NULL
);

-- Delivery phases with an optional client approval gate
CREATE TABLE IF NOT EXISTS milestones (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    order_index INTEGER NOT NULL DEFAULT 0,
    requires_client_approval INTEGER NOT NULL DEFAULT 0,
    approval_status TEXT NOT NULL DEFAULT 'PENDING',
    approval_notes TEXT
);

-- Client scope-change submissions, one per calendar week
CREATE TABLE IF NOT EXISTS change_requests (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    author TEXT NOT NULL,
    title TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'PENDING',
    estimate_hours REAL,
    estimate_notes TEXT,
    created_at TEXT NOT NULL
);

-- Flat comment rows; the reply forest is assembled on read
CREATE TABLE IF NOT EXISTS comments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    work_item_id TEXT NOT NULL,
    author TEXT NOT NULL,
    content TEXT NOT NULL,
    parent_id INTEGER REFERENCES comments(id),
    created_at TEXT NOT NULL,
    FOREIGN KEY (work_item_id) REFERENCES work_items(id)
);

-- Activity log (audit trail)
CREATE TABLE IF NOT EXISTS events (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    work_item_id TEXT NOT NULL,
    action TEXT NOT NULL,
    old_value TEXT,
    new_value TEXT,
    created_at TEXT NOT NULL,
    FOREIGN KEY (work_item_id) REFERENCES work_items(id)
);

-- Indexes
CREATE INDEX IF NOT EXISTS idx_items_status ON work_items(status, order_index);
CREATE INDEX IF NOT EXISTS idx_items_sprint ON work_items(sprint_id);
CREATE INDEX IF NOT EXISTS idx_items_milestone ON work_items(milestone_id);
CREATE INDEX IF NOT EXISTS idx_tasks_item ON tasks(work_item_id);
CREATE INDEX IF NOT EXISTS idx_comments_item ON comments(work_item_id);
CREATE INDEX IF NOT EXISTS idx_events_item ON events(work_item_id);
CREATE INDEX IF NOT EXISTS idx_requests_created ON change_requests(created_at);
"#;

/// Column list for work-item SELECTs, kept in one place so row mapping
/// stays aligned.
const ITEM_COLUMNS: &str = "id, title, description, status, priority, owner, due_date, estimate, \
     sprint_id, milestone_id, order_index, client_visible, created_at, updated_at";

/// Parse a string value from the database, returning a rusqlite error on parse failure.
fn parse_db<T: std::str::FromStr>(
    value: &str,
    column: &str,
) -> std::result::Result<T, rusqlite::Error> {
    value.parse().map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(Error::CorruptedData(format!(
                "invalid value '{value}' in column '{column}'"
            ))),
        )
    })
}

/// Parse an RFC3339 timestamp from the database.
fn parse_timestamp(
    value: &str,
    column: &str,
) -> std::result::Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(Error::CorruptedData(format!(
                    "invalid timestamp '{value}' in column '{column}'"
                ))),
            )
        })
}

/// Parse an optional `YYYY-MM-DD` date from the database.
fn parse_date_opt(
    value: Option<String>,
    column: &str,
) -> std::result::Result<Option<NaiveDate>, rusqlite::Error> {
    match value {
        None => Ok(None),
        Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d").map(Some).map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(Error::CorruptedData(format!(
                    "invalid date '{s}' in column '{column}'"
                ))),
            )
        }),
    }
}

/// Map a work-item row selected with [`ITEM_COLUMNS`].
fn item_from_row(row: &rusqlite::Row<'_>) -> std::result::Result<WorkItem, rusqlite::Error> {
    let status_str: String = row.get(3)?;
    let priority_str: String = row.get(4)?;
    let due_str: Option<String> = row.get(6)?;
    let created_str: String = row.get(12)?;
    let updated_str: String = row.get(13)?;

    Ok(WorkItem {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        status: parse_db(&status_str, "status")?,
        priority: parse_db(&priority_str, "priority")?,
        owner: row.get(5)?,
        due_date: parse_date_opt(due_str, "due_date")?,
        estimate: row.get(7)?,
        sprint_id: row.get(8)?,
        milestone_id: row.get(9)?,
        order_index: row.get(10)?,
        client_visible: row.get(11)?,
        created_at: parse_timestamp(&created_str, "created_at")?,
        updated_at: parse_timestamp(&updated_str, "updated_at")?,
    })
}

/// Map a comment row.
fn comment_from_row(row: &rusqlite::Row<'_>) -> std::result::Result<Comment, rusqlite::Error> {
    let created_str: String = row.get(5)?;
    Ok(Comment {
        id: row.get(0)?,
        work_item_id: row.get(1)?,
        author: row.get(2)?,
        content: row.get(3)?,
        parent_id: row.get(4)?,
        created_at: parse_timestamp(&created_str, "created_at")?,
    })
}

/// Map an event row.
fn event_from_row(row: &rusqlite::Row<'_>) -> std::result::Result<Event, rusqlite::Error> {
    let action_str: String = row.get(2)?;
    let created_str: String = row.get(5)?;
    Ok(Event {
        id: row.get(0)?,
        work_item_id: row.get(1)?,
        action: parse_db(&action_str, "action")?,
        old_value: row.get(3)?,
        new_value: row.get(4)?,
        created_at: parse_timestamp(&created_str, "created_at")?,
    })
}

/// Run schema creation and all migrations on a database connection.
///
/// This is the single migration path for every consumer of the store. It
/// applies the canonical schema and runs idempotent migrations to upgrade
/// older databases that may be missing columns.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    migrate_add_client_visible(conn)?;
    Ok(())
}

/// Migration: add the client_visible column to databases created before the
/// client portal gained per-item visibility.
fn migrate_add_client_visible(conn: &Connection) -> Result<()> {
    let has_column: bool = conn
        .query_row(
            "SELECT COUNT(*) > 0 FROM pragma_table_info('work_items') WHERE name = 'client_visible'",
            [],
            |row| row.get(0),
        )
        .unwrap_or(false);

    if !has_column {
        conn.execute(
            "ALTER TABLE work_items ADD COLUMN client_visible INTEGER NOT NULL DEFAULT 0",
            [],
        )?;
    }
    Ok(())
}

/// SQLite database connection with portal store operations.
pub struct Database {
    /// The underlying SQLite connection.
    pub conn: Connection,
}

impl Database {
    /// Open a database connection at the given path, creating and migrating if needed.
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        // Enable foreign keys and WAL mode for concurrent editors
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )?;

        let db = Database { conn };
        run_migrations(&db.conn)?;
        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let db = Database { conn };
        run_migrations(&db.conn)?;
        Ok(db)
    }

    // ── Work items ──────────────────────────────────────────────────────

    /// Insert a work item row as-is.
    ///
    /// Callers wanting count-based order assignment and validation should go
    /// through [`Database::create_item`](crate::board) instead.
    pub fn insert_item(&self, item: &WorkItem) -> Result<()> {
        self.conn.execute(
            "INSERT INTO work_items (id, title, description, status, priority, owner,
             due_date, estimate, sprint_id, milestone_id, order_index, client_visible,
             created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            params![
                item.id,
                item.title,
                item.description,
                item.status.as_str(),
                item.priority.as_str(),
                item.owner,
                item.due_date.map(|d| d.to_string()),
                item.estimate,
                item.sprint_id,
                item.milestone_id,
                item.order_index,
                item.client_visible,
                item.created_at.to_rfc3339(),
                item.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Get a work item by ID.
    pub fn get_item(&self, id: &str) -> Result<WorkItem> {
        let item = self
            .conn
            .query_row(
                &format!("SELECT {ITEM_COLUMNS} FROM work_items WHERE id = ?1"),
                params![id],
                item_from_row,
            )
            .optional()?;

        item.ok_or_else(|| Error::WorkItemNotFound(id.to_string()))
    }

    /// Check if a work item exists.
    pub fn item_exists(&self, id: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM work_items WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// All work items, board order (status column, then position).
    pub fn list_items(&self) -> Result<Vec<WorkItem>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ITEM_COLUMNS} FROM work_items ORDER BY status, order_index"
        ))?;
        let items = stmt
            .query_map([], item_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(items)
    }

    /// Work items in one status column, position order.
    pub fn status_group(&self, status: Status) -> Result<Vec<WorkItem>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ITEM_COLUMNS} FROM work_items WHERE status = ?1 ORDER BY order_index"
        ))?;
        let items = stmt
            .query_map(params![status.as_str()], item_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(items)
    }

    /// Apply a partial field update to a work item.
    ///
    /// Status and position are deliberately absent from [`WorkItemPatch`]:
    /// they only change through [`Database::move_item`](crate::board), which
    /// keeps the group ordering consistent.
    pub fn update_item(&mut self, id: &str, patch: &WorkItemPatch) -> Result<WorkItem> {
        let mut sets: Vec<&str> = Vec::new();
        let mut values: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(title) = &patch.title {
            sets.push("title = ?");
            values.push(Box::new(title.clone()));
        }
        if let Some(description) = &patch.description {
            sets.push("description = ?");
            values.push(Box::new(description.clone()));
        }
        if let Some(priority) = patch.priority {
            sets.push("priority = ?");
            values.push(Box::new(priority.as_str()));
        }
        if let Some(owner) = &patch.owner {
            sets.push("owner = ?");
            values.push(Box::new(owner.clone()));
        }
        if let Some(due_date) = patch.due_date {
            sets.push("due_date = ?");
            values.push(Box::new(due_date.map(|d| d.to_string())));
        }
        if let Some(estimate) = patch.estimate {
            sets.push("estimate = ?");
            values.push(Box::new(estimate));
        }
        if let Some(sprint_id) = patch.sprint_id {
            sets.push("sprint_id = ?");
            values.push(Box::new(sprint_id));
        }
        if let Some(milestone_id) = patch.milestone_id {
            sets.push("milestone_id = ?");
            values.push(Box::new(milestone_id));
        }
        if let Some(client_visible) = patch.client_visible {
            sets.push("client_visible = ?");
            values.push(Box::new(client_visible));
        }

        if sets.is_empty() {
            return self.get_item(id);
        }

        if patch.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(Error::TitleRequired);
        }

        sets.push("updated_at = ?");
        values.push(Box::new(Utc::now().to_rfc3339()));
        values.push(Box::new(id.to_string()));

        let sql = format!(
            "UPDATE work_items SET {} WHERE id = ?",
            sets.join(", ")
        );
        let affected = self
            .conn
            .execute(&sql, rusqlite::params_from_iter(values))?;
        if affected == 0 {
            return Err(Error::WorkItemNotFound(id.to_string()));
        }

        let updated = self.get_item(id)?;
        self.log_event(
            &Event::new(id.to_string(), crate::event::Action::Edited, updated.updated_at),
        )?;
        Ok(updated)
    }

    /// Delete a work item and everything attached to it: comments, tasks,
    /// and activity events, in one transaction.
    pub fn delete_item(&mut self, id: &str) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM events WHERE work_item_id = ?1", params![id])?;
        tx.execute("DELETE FROM comments WHERE work_item_id = ?1", params![id])?;
        tx.execute("DELETE FROM tasks WHERE work_item_id = ?1", params![id])?;
        let affected = tx.execute("DELETE FROM work_items WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(Error::WorkItemNotFound(id.to_string()));
        }
        tx.commit()?;
        Ok(())
    }

    // ── Tasks ───────────────────────────────────────────────────────────

    /// Add a sub-item to a work item; it enters the backlog group at the
    /// end, like any freshly created item.
    pub fn add_task(&mut self, work_item_id: &str, title: &str, now: DateTime<Utc>) -> Result<Task> {
        if title.trim().is_empty() {
            return Err(Error::TitleRequired);
        }
        if !self.item_exists(work_item_id)? {
            return Err(Error::WorkItemNotFound(work_item_id.to_string()));
        }

        let tx = self.conn.transaction()?;
        let order_index: i64 = tx.query_row(
            "SELECT COUNT(*) FROM tasks WHERE work_item_id = ?1 AND status = ?2",
            params![work_item_id, Status::Backlog.as_str()],
            |row| row.get(0),
        )?;
        tx.execute(
            "INSERT INTO tasks (work_item_id, title, status, order_index, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                work_item_id,
                title,
                Status::Backlog.as_str(),
                order_index,
                now.to_rfc3339()
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.execute(
            "INSERT INTO events (work_item_id, action, old_value, new_value, created_at)
             VALUES (?1, ?2, NULL, ?3, ?4)",
            params![
                work_item_id,
                crate::event::Action::TaskAdded.as_str(),
                title,
                now.to_rfc3339()
            ],
        )?;
        tx.commit()?;

        Ok(Task {
            id,
            work_item_id: work_item_id.to_string(),
            title: title.to_string(),
            status: Status::Backlog,
            order_index,
            created_at: now,
        })
    }

    /// All tasks for a work item, board order.
    pub fn tasks_for_item(&self, work_item_id: &str) -> Result<Vec<Task>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, work_item_id, title, status, order_index, created_at
             FROM tasks WHERE work_item_id = ?1 ORDER BY status, order_index",
        )?;
        let tasks = stmt
            .query_map(params![work_item_id], |row| {
                let status_str: String = row.get(3)?;
                let created_str: String = row.get(5)?;
                Ok(Task {
                    id: row.get(0)?,
                    work_item_id: row.get(1)?,
                    title: row.get(2)?,
                    status: parse_db(&status_str, "status")?,
                    order_index: row.get(4)?,
                    created_at: parse_timestamp(&created_str, "created_at")?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(tasks)
    }

    /// Move a task to another status; it lands at the end of the
    /// destination group.
    pub fn set_task_status(&mut self, task_id: i64, status: Status) -> Result<()> {
        let work_item_id: Option<String> = self
            .conn
            .query_row(
                "SELECT work_item_id FROM tasks WHERE id = ?1",
                params![task_id],
                |row| row.get(0),
            )
            .optional()?;
        let work_item_id = work_item_id.ok_or(Error::TaskNotFound(task_id))?;

        let tx = self.conn.transaction()?;
        let order_index: i64 = tx.query_row(
            "SELECT COUNT(*) FROM tasks WHERE work_item_id = ?1 AND status = ?2 AND id != ?3",
            params![work_item_id, status.as_str(), task_id],
            |row| row.get(0),
        )?;
        tx.execute(
            "UPDATE tasks SET status = ?1, order_index = ?2 WHERE id = ?3",
            params![status.as_str(), order_index, task_id],
        )?;
        tx.commit()?;
        Ok(())
    }

    // ── Sprints ─────────────────────────────────────────────────────────

    /// Create a sprint; the end date is derived from the fixed duration.
    pub fn create_sprint(&self, name: &str, start_date: DateTime<Utc>) -> Result<Sprint> {
        if name.trim().is_empty() {
            return Err(Error::TitleRequired);
        }
        let sprint = Sprint::new(0, name.to_string(), start_date);
        self.conn.execute(
            "INSERT INTO sprints (name, start_date, end_date) VALUES (?1, ?2, ?3)",
            params![
                sprint.name,
                sprint.start_date.to_rfc3339(),
                sprint.end_date.to_rfc3339()
            ],
        )?;
        Ok(Sprint {
            id: self.conn.last_insert_rowid(),
            ..sprint
        })
    }

    /// Get a sprint by ID.
    pub fn get_sprint(&self, id: i64) -> Result<Sprint> {
        let sprint = self
            .conn
            .query_row(
                "SELECT id, name, start_date, end_date FROM sprints WHERE id = ?1",
                params![id],
                |row| {
                    let start_str: String = row.get(2)?;
                    let end_str: String = row.get(3)?;
                    Ok(Sprint {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        start_date: parse_timestamp(&start_str, "start_date")?,
                        end_date: parse_timestamp(&end_str, "end_date")?,
                    })
                },
            )
            .optional()?;
        sprint.ok_or(Error::SprintNotFound(id))
    }

    /// All sprints, oldest first.
    pub fn list_sprints(&self) -> Result<Vec<Sprint>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, start_date, end_date FROM sprints ORDER BY start_date, id")?;
        let sprints = stmt
            .query_map([], |row| {
                let start_str: String = row.get(2)?;
                let end_str: String = row.get(3)?;
                Ok(Sprint {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    start_date: parse_timestamp(&start_str, "start_date")?,
                    end_date: parse_timestamp(&end_str, "end_date")?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(sprints)
    }

    /// Work items committed to a sprint, board order.
    pub fn sprint_items(&self, sprint_id: i64) -> Result<Vec<WorkItem>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ITEM_COLUMNS} FROM work_items WHERE sprint_id = ?1 ORDER BY status, order_index"
        ))?;
        let items = stmt
            .query_map(params![sprint_id], item_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(items)
    }

    // ── Milestones ──────────────────────────────────────────────────────

    /// Create a milestone at the end of the project's milestone order.
    pub fn create_milestone(&self, title: &str, requires_client_approval: bool) -> Result<Milestone> {
        if title.trim().is_empty() {
            return Err(Error::TitleRequired);
        }
        let order_index: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM milestones", [], |row| row.get(0))?;
        self.conn.execute(
            "INSERT INTO milestones (title, order_index, requires_client_approval, approval_status)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                title,
                order_index,
                requires_client_approval,
                ApprovalStatus::Pending.as_str()
            ],
        )?;
        Ok(Milestone {
            id: self.conn.last_insert_rowid(),
            title: title.to_string(),
            order_index,
            requires_client_approval,
            approval_status: ApprovalStatus::Pending,
            approval_notes: None,
        })
    }

    /// Get a milestone by ID.
    pub fn get_milestone(&self, id: i64) -> Result<Milestone> {
        let milestone = self
            .conn
            .query_row(
                "SELECT id, title, order_index, requires_client_approval, approval_status,
                        approval_notes
                 FROM milestones WHERE id = ?1",
                params![id],
                milestone_from_row,
            )
            .optional()?;
        milestone.ok_or(Error::MilestoneNotFound(id))
    }

    /// All milestones, project order.
    pub fn list_milestones(&self) -> Result<Vec<Milestone>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, order_index, requires_client_approval, approval_status,
                    approval_notes
             FROM milestones ORDER BY order_index",
        )?;
        let milestones = stmt
            .query_map([], milestone_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(milestones)
    }

    /// Record a client approval decision on a milestone gate.
    pub fn set_milestone_approval(
        &mut self,
        id: i64,
        status: ApprovalStatus,
        notes: Option<&str>,
    ) -> Result<()> {
        let affected = self.conn.execute(
            "UPDATE milestones SET approval_status = ?1, approval_notes = ?2 WHERE id = ?3",
            params![status.as_str(), notes, id],
        )?;
        if affected == 0 {
            return Err(Error::MilestoneNotFound(id));
        }
        Ok(())
    }

    /// Work items rolled up into a milestone, board order.
    pub fn milestone_items(&self, milestone_id: i64) -> Result<Vec<WorkItem>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ITEM_COLUMNS} FROM work_items WHERE milestone_id = ?1 ORDER BY status, order_index"
        ))?;
        let items = stmt
            .query_map(params![milestone_id], item_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(items)
    }

    // ── Change requests ─────────────────────────────────────────────────

    /// Timestamps of every change request ever submitted.
    pub fn submission_times(&self) -> Result<Vec<DateTime<Utc>>> {
        let mut stmt = self
            .conn
            .prepare("SELECT created_at FROM change_requests ORDER BY created_at")?;
        let times = stmt
            .query_map([], |row| {
                let created_str: String = row.get(0)?;
                parse_timestamp(&created_str, "created_at")
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(times)
    }

    /// Evaluate the weekly submission window against live data.
    pub fn check_submission_allowed(&self, now: DateTime<Utc>) -> Result<SubmissionWindow> {
        let times = self.submission_times()?;
        Ok(can_submit(&times, now))
    }

    /// Submit a change request, enforcing the one-per-calendar-week rule.
    ///
    /// The check and the insert run in one transaction so two racing
    /// submitters cannot both land in the same week.
    pub fn create_change_request(
        &mut self,
        author: &str,
        title: &str,
        estimate_hours: Option<f64>,
        estimate_notes: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<ChangeRequest> {
        if title.trim().is_empty() {
            return Err(Error::TitleRequired);
        }

        let tx = self.conn.transaction()?;
        let times = {
            let mut stmt = tx.prepare("SELECT created_at FROM change_requests")?;
            let times = stmt
                .query_map([], |row| {
                    let created_str: String = row.get(0)?;
                    parse_timestamp(&created_str, "created_at")
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            times
        };
        let window = can_submit(&times, now);
        if !window.allowed {
            let next_available_at = window.next_available_at.unwrap_or(now);
            return Err(Error::SubmissionLimited { next_available_at });
        }

        tx.execute(
            "INSERT INTO change_requests (author, title, status, estimate_hours, estimate_notes,
             created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                author,
                title,
                RequestStatus::Pending.as_str(),
                estimate_hours,
                estimate_notes,
                now.to_rfc3339()
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(ChangeRequest {
            id,
            author: author.to_string(),
            title: title.to_string(),
            status: RequestStatus::Pending,
            estimate_hours,
            estimate_notes: estimate_notes.map(str::to_string),
            created_at: now,
        })
    }

    /// All change requests, oldest first.
    pub fn list_change_requests(&self) -> Result<Vec<ChangeRequest>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, author, title, status, estimate_hours, estimate_notes, created_at
             FROM change_requests ORDER BY created_at, id",
        )?;
        let requests = stmt
            .query_map([], |row| {
                let status_str: String = row.get(3)?;
                let created_str: String = row.get(6)?;
                Ok(ChangeRequest {
                    id: row.get(0)?,
                    author: row.get(1)?,
                    title: row.get(2)?,
                    status: parse_db(&status_str, "status")?,
                    estimate_hours: row.get(4)?,
                    estimate_notes: row.get(5)?,
                    created_at: parse_timestamp(&created_str, "created_at")?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(requests)
    }

    /// Record a triage decision on a change request.
    pub fn set_request_status(&mut self, id: i64, status: RequestStatus) -> Result<()> {
        let affected = self.conn.execute(
            "UPDATE change_requests SET status = ?1 WHERE id = ?2",
            params![status.as_str(), id],
        )?;
        if affected == 0 {
            return Err(Error::ChangeRequestNotFound(id));
        }
        Ok(())
    }

    // ── Comments ────────────────────────────────────────────────────────

    /// Add a comment to a work item.
    ///
    /// With `parent_id`, the new comment becomes the last reply of that
    /// parent; the parent must be a comment on the *same* work item.
    /// Without it, the comment starts a new top-level thread.
    pub fn add_comment(
        &mut self,
        work_item_id: &str,
        author: &str,
        content: &str,
        parent_id: Option<i64>,
        now: DateTime<Utc>,
    ) -> Result<Comment> {
        if content.trim().is_empty() {
            return Err(Error::ContentRequired);
        }
        if !self.item_exists(work_item_id)? {
            return Err(Error::WorkItemNotFound(work_item_id.to_string()));
        }
        if let Some(parent) = parent_id {
            let parent_item: Option<String> = self
                .conn
                .query_row(
                    "SELECT work_item_id FROM comments WHERE id = ?1",
                    params![parent],
                    |row| row.get(0),
                )
                .optional()?;
            match parent_item {
                Some(item_id) if item_id == work_item_id => {}
                _ => return Err(Error::CommentNotFound(parent)),
            }
        }

        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO comments (work_item_id, author, content, parent_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![work_item_id, author, content, parent_id, now.to_rfc3339()],
        )?;
        let id = tx.last_insert_rowid();
        tx.execute(
            "INSERT INTO events (work_item_id, action, old_value, new_value, created_at)
             VALUES (?1, ?2, NULL, ?3, ?4)",
            params![
                work_item_id,
                crate::event::Action::Commented.as_str(),
                author,
                now.to_rfc3339()
            ],
        )?;
        tx.commit()?;

        Ok(Comment {
            id,
            work_item_id: work_item_id.to_string(),
            author: author.to_string(),
            content: content.to_string(),
            parent_id,
            created_at: now,
        })
    }

    /// All comments on a work item as flat rows, creation order.
    pub fn comments_for_item(&self, work_item_id: &str) -> Result<Vec<Comment>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, work_item_id, author, content, parent_id, created_at
             FROM comments WHERE work_item_id = ?1 ORDER BY created_at, id",
        )?;
        let comments = stmt
            .query_map(params![work_item_id], comment_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(comments)
    }

    /// The assembled reply forest for a work item.
    pub fn comment_forest(&self, work_item_id: &str) -> Result<Vec<CommentNode>> {
        if !self.item_exists(work_item_id)? {
            return Err(Error::WorkItemNotFound(work_item_id.to_string()));
        }
        Ok(build_forest(self.comments_for_item(work_item_id)?))
    }

    // ── Activity log ────────────────────────────────────────────────────

    /// Log an event.
    pub fn log_event(&self, event: &Event) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO events (work_item_id, action, old_value, new_value, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                event.work_item_id,
                event.action.as_str(),
                event.old_value,
                event.new_value,
                event.created_at.to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// All events for a work item, ordered by creation time.
    pub fn events_for_item(&self, work_item_id: &str) -> Result<Vec<Event>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, work_item_id, action, old_value, new_value, created_at
             FROM events WHERE work_item_id = ?1 ORDER BY created_at, id",
        )?;
        let events = stmt
            .query_map(params![work_item_id], event_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(events)
    }

    /// Most recent events across all work items.
    pub fn recent_events(&self, limit: usize) -> Result<Vec<Event>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, work_item_id, action, old_value, new_value, created_at
             FROM events ORDER BY created_at DESC, id DESC LIMIT ?1",
        )?;
        let limit_i64 = i64::try_from(limit).unwrap_or(i64::MAX);
        let events = stmt
            .query_map(params![limit_i64], event_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(events)
    }
}

/// Map a milestone row.
fn milestone_from_row(row: &rusqlite::Row<'_>) -> std::result::Result<Milestone, rusqlite::Error> {
    let approval_str: String = row.get(4)?;
    Ok(Milestone {
        id: row.get(0)?,
        title: row.get(1)?,
        order_index: row.get(2)?,
        requires_client_approval: row.get(3)?,
        approval_status: parse_db(&approval_str, "approval_status")?,
        approval_notes: row.get(5)?,
    })
}

/// Partial field update for a work item. `None` leaves a field untouched;
/// for nullable fields, `Some(None)` clears the stored value.
#[derive(Debug, Clone, Default)]
pub struct WorkItemPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub priority: Option<crate::item::Priority>,
    pub owner: Option<Option<String>>,
    pub due_date: Option<Option<NaiveDate>>,
    pub estimate: Option<Option<f64>>,
    pub sprint_id: Option<Option<i64>>,
    pub milestone_id: Option<Option<i64>>,
    pub client_visible: Option<bool>,
}

#[cfg(test)]
#[path = "db_tests.rs"]
mod tests;
