// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Core work-item types for the waypoint delivery portal.
//!
//! This module contains the fundamental board types: WorkItem, Status,
//! Priority, and Task.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Kanban column a work item currently sits in.
///
/// The string forms are wire constants shared with existing portal data and
/// must be preserved exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// Not yet scheduled. Initial state for new items.
    Backlog,
    /// Committed to an upcoming sprint.
    Planned,
    /// Currently being worked on.
    InProgress,
    /// Awaiting review or verification.
    Qa,
    /// Stalled on an external dependency.
    Blocked,
    /// Delivered.
    Done,
}

impl Status {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Backlog => "BACKLOG",
            Status::Planned => "PLANNED",
            Status::InProgress => "IN_PROGRESS",
            Status::Qa => "QA",
            Status::Blocked => "BLOCKED",
            Status::Done => "DONE",
        }
    }

    /// All statuses in board column order.
    pub fn all() -> [Status; 6] {
        [
            Status::Backlog,
            Status::Planned,
            Status::InProgress,
            Status::Qa,
            Status::Blocked,
            Status::Done,
        ]
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "BACKLOG" => Ok(Status::Backlog),
            "PLANNED" => Ok(Status::Planned),
            "IN_PROGRESS" => Ok(Status::InProgress),
            "QA" => Ok(Status::Qa),
            "BLOCKED" => Ok(Status::Blocked),
            "DONE" => Ok(Status::Done),
            _ => Err(Error::InvalidStatus(s.to_string())),
        }
    }
}

/// Priority of a work item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    Med,
    High,
    Urgent,
}

impl Priority {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Med => "MED",
            Priority::High => "HIGH",
            Priority::Urgent => "URGENT",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "LOW" => Ok(Priority::Low),
            "MED" => Ok(Priority::Med),
            "HIGH" => Ok(Priority::High),
            "URGENT" => Ok(Priority::Urgent),
            _ => Err(Error::InvalidPriority(s.to_string())),
        }
    }
}

/// The primary entity on the board: a client deliverable.
///
/// `order_index` is the item's position key within its current status group.
/// Values are unique per group; gaps are permitted (only relative order
/// matters) and get normalized whenever a move rewrites the group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    /// Unique identifier (format: `{prefix}-{hash}`).
    pub id: String,
    /// Short description of the deliverable.
    pub title: String,
    /// Longer description providing context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Current board column.
    pub status: Status,
    /// Priority of the work.
    pub priority: Priority,
    /// Person responsible (weak reference, free-form).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// Target delivery date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// Effort estimate in hours.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate: Option<f64>,
    /// Sprint this item is committed to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sprint_id: Option<i64>,
    /// Milestone this item rolls up into, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone_id: Option<i64>,
    /// Position within the current status group.
    pub order_index: i64,
    /// Whether client users can see this item.
    pub client_visible: bool,
    /// When the item was created.
    pub created_at: DateTime<Utc>,
    /// When the item was last modified.
    pub updated_at: DateTime<Utc>,
}

impl WorkItem {
    /// Creates a new work item in the backlog with default fields.
    pub fn new(id: String, title: String, created_at: DateTime<Utc>) -> Self {
        WorkItem {
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
            order_index: 0,
            client_visible: false,
            created_at,
            updated_at: created_at,
        }
    }
}

/// A lightweight sub-item of a work item.
///
/// Tasks follow the same status/ordering pattern as work items at smaller
/// scale: `order_index` is unique within the (work item, status) group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Database-assigned identifier.
    pub id: i64,
    /// The work item this task belongs to.
    pub work_item_id: String,
    /// Short description of the step.
    pub title: String,
    /// Current state.
    pub status: Status,
    /// Position within the (work item, status) group.
    pub order_index: i64,
    /// When the task was created.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[path = "item_tests.rs"]
mod tests;
