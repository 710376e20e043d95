// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Activity log entries for work items.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Types of actions recorded in the activity log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Work item was created.
    Created,
    /// Work item moved between or within status columns.
    Moved,
    /// Work item fields were edited.
    Edited,
    /// A comment was added.
    Commented,
    /// A task was added.
    TaskAdded,
}

impl Action {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Created => "created",
            Action::Moved => "moved",
            Action::Edited => "edited",
            Action::Commented => "commented",
            Action::TaskAdded => "task_added",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "created" => Ok(Action::Created),
            "moved" => Ok(Action::Moved),
            "edited" => Ok(Action::Edited),
            "commented" => Ok(Action::Commented),
            "task_added" => Ok(Action::TaskAdded),
            _ => Err(Error::InvalidAction(s.to_string())),
        }
    }
}

/// An audit log entry recording a change to a work item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Database-assigned identifier.
    pub id: i64,
    /// The work item this event belongs to.
    pub work_item_id: String,
    /// What type of change occurred.
    pub action: Action,
    /// Previous value (for edits, moves).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_value: Option<String>,
    /// New value (for edits, moves, comments).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_value: Option<String>,
    /// When the event occurred.
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Creates a new event at the given timestamp.
    pub fn new(work_item_id: String, action: Action, created_at: DateTime<Utc>) -> Self {
        Event {
            id: 0, // Will be set by database
            work_item_id,
            action,
            old_value: None,
            new_value: None,
            created_at,
        }
    }

    /// Sets the old and new values for this event (builder pattern).
    pub fn with_values(mut self, old: Option<String>, new: Option<String>) -> Self {
        self.old_value = old;
        self.new_value = new;
        self
    }
}
