// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for wp-core operations.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// All possible errors that can occur in wp-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("work item not found: {0}")]
    WorkItemNotFound(String),

    #[error("sprint not found: {0}")]
    SprintNotFound(i64),

    #[error("milestone not found: {0}")]
    MilestoneNotFound(i64),

    #[error("comment not found: {0}")]
    CommentNotFound(i64),

    #[error("task not found: {0}")]
    TaskNotFound(i64),

    #[error("change request not found: {0}")]
    ChangeRequestNotFound(i64),

    #[error("target index {index} is out of range for the destination column\n  hint: valid positions are 0 through {max}")]
    IndexOutOfRange { index: usize, max: usize },

    #[error("a change request was already submitted this week\n  hint: next submission opens {next_available_at}")]
    SubmissionLimited { next_available_at: DateTime<Utc> },

    #[error("title is required")]
    TitleRequired,

    #[error("comment content is required")]
    ContentRequired,

    #[error("invalid status: '{0}'\n  hint: valid statuses are: BACKLOG, PLANNED, IN_PROGRESS, QA, BLOCKED, DONE")]
    InvalidStatus(String),

    #[error("invalid priority: '{0}'\n  hint: valid priorities are: LOW, MED, HIGH, URGENT")]
    InvalidPriority(String),

    #[error("invalid approval status: '{0}'\n  hint: valid values are: PENDING, APPROVED, CHANGES_REQUESTED")]
    InvalidApproval(String),

    #[error("invalid request status: '{0}'\n  hint: valid values are: PENDING, APPROVED, DECLINED")]
    InvalidRequestStatus(String),

    #[error("invalid action: '{0}'")]
    InvalidAction(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

/// A specialized Result type for wp-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
