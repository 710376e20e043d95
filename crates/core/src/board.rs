// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Board state machine: item creation and the move/reorder primitive.
//!
//! Any status may follow any other: the board is not a gated workflow, and
//! DONE back to BACKLOG is as legal as the reverse. The only validated input is
//! the target position. Each move is a single transaction that recomputes
//! shifts from the latest persisted order, so a stale client view cannot
//! corrupt a group: at worst a drag "snaps back".

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, OptionalExtension};

use crate::db::Database;
use crate::error::{Error, Result};
use crate::event::Action;
use crate::item::{Priority, Status, WorkItem};

/// Fields for a new work item. The store assigns the order index.
#[derive(Debug, Clone)]
pub struct NewWorkItem {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    /// Destination column; quick-add within a column sets this.
    pub status: Status,
    pub priority: Priority,
    pub owner: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub estimate: Option<f64>,
    pub sprint_id: Option<i64>,
    pub milestone_id: Option<i64>,
    pub client_visible: bool,
}

impl NewWorkItem {
    /// A backlog item with default fields.
    pub fn new(id: String, title: String) -> Self {
        NewWorkItem {
            id,
            title,
            description: None,
            status: Status::Backlog,
            priority: Priority::Med,
            owner: None,
            due_date: None,
            estimate: None,
            sprint_id: None,
            milestone_id: None,
            client_visible: false,
        }
    }
}

/// The ids of a status group in stored order, read inside the move
/// transaction so shifts are computed against the latest persisted state.
fn group_ids(tx: &rusqlite::Transaction<'_>, status: Status) -> Result<Vec<String>> {
    let mut stmt =
        tx.prepare("SELECT id FROM work_items WHERE status = ?1 ORDER BY order_index")?;
    let ids = stmt
        .query_map(params![status.as_str()], |row| row.get(0))?
        .collect::<std::result::Result<Vec<String>, _>>()?;
    Ok(ids)
}

impl Database {
    /// Create a work item at the end of its status group.
    ///
    /// The order index is the current count of the destination group,
    /// read and written in one transaction.
    pub fn create_item(&mut self, new: NewWorkItem, now: DateTime<Utc>) -> Result<WorkItem> {
        if new.title.trim().is_empty() {
            return Err(Error::TitleRequired);
        }

        let tx = self.conn.transaction()?;
        let order_index: i64 = tx.query_row(
            "SELECT COUNT(*) FROM work_items WHERE status = ?1",
            params![new.status.as_str()],
            |row| row.get(0),
        )?;
        tx.execute(
            "INSERT INTO work_items (id, title, description, status, priority, owner,
             due_date, estimate, sprint_id, milestone_id, order_index, client_visible,
             created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            params![
                new.id,
                new.title,
                new.description,
                new.status.as_str(),
                new.priority.as_str(),
                new.owner,
                new.due_date.map(|d| d.to_string()),
                new.estimate,
                new.sprint_id,
                new.milestone_id,
                order_index,
                new.client_visible,
                now.to_rfc3339(),
                now.to_rfc3339(),
            ],
        )?;
        tx.execute(
            "INSERT INTO events (work_item_id, action, old_value, new_value, created_at)
             VALUES (?1, ?2, NULL, ?3, ?4)",
            params![new.id, Action::Created.as_str(), new.title, now.to_rfc3339()],
        )?;
        tx.commit()?;

        self.get_item(&new.id)
    }

    /// Move a work item to `target_status` at `target_index`.
    ///
    /// `target_index` is zero-based among the *other* items already in the
    /// destination group; the valid range is `[0, others.len()]`. Items at
    /// or after the target shift down; for a same-group move, the items
    /// between the old and new position shift by one.
    ///
    /// Both affected groups are rewritten with dense indices inside the
    /// transaction, so either status and ordering update together or
    /// neither does. Retrying an already-applied move is a no-op.
    pub fn move_item(
        &mut self,
        id: &str,
        target_status: Status,
        target_index: usize,
        now: DateTime<Utc>,
    ) -> Result<WorkItem> {
        let tx = self.conn.transaction()?;

        let current: Option<String> = tx
            .query_row(
                "SELECT status FROM work_items WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()?;
        let current: Status = match current {
            Some(status_str) => status_str.parse().map_err(|_| {
                Error::CorruptedData(format!("invalid status '{status_str}' in column 'status'"))
            })?,
            None => return Err(Error::WorkItemNotFound(id.to_string())),
        };

        let mut destination = group_ids(&tx, target_status)?;
        let old_position = if current == target_status {
            let pos = destination.iter().position(|other| other == id);
            destination.retain(|other| other != id);
            pos
        } else {
            let mut source = group_ids(&tx, current)?;
            let pos = source.iter().position(|other| other == id);
            source.retain(|other| other != id);
            // Compact the group the item leaves behind
            for (index, other) in source.iter().enumerate() {
                tx.execute(
                    "UPDATE work_items SET order_index = ?1 WHERE id = ?2",
                    params![index as i64, other],
                )?;
            }
            pos
        };

        if target_index > destination.len() {
            return Err(Error::IndexOutOfRange {
                index: target_index,
                max: destination.len(),
            });
        }
        destination.insert(target_index, id.to_string());

        for (index, other) in destination.iter().enumerate() {
            tx.execute(
                "UPDATE work_items SET order_index = ?1 WHERE id = ?2",
                params![index as i64, other],
            )?;
        }
        tx.execute(
            "UPDATE work_items SET status = ?1, updated_at = ?2 WHERE id = ?3",
            params![target_status.as_str(), now.to_rfc3339(), id],
        )?;

        let old_value = old_position
            .map(|pos| format!("{current}[{pos}]"))
            .unwrap_or_else(|| current.to_string());
        tx.execute(
            "INSERT INTO events (work_item_id, action, old_value, new_value, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                id,
                Action::Moved.as_str(),
                old_value,
                format!("{target_status}[{target_index}]"),
                now.to_rfc3339()
            ],
        )?;

        tx.commit()?;
        self.get_item(id)
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod tests;
