// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sprint and milestone types.
//!
//! Sprints are fixed two-week windows: the end date is always derived from
//! the start date and is not independently editable. Milestones carry an
//! optional client-approval gate. Progress for both is derived on read,
//! never stored.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Fixed sprint length in days. A wire constant shared with existing data.
pub const SPRINT_DURATION_DAYS: i64 = 14;

/// A fixed two-week iteration window owning work items by reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprint {
    /// Database-assigned identifier.
    pub id: i64,
    /// Display name (e.g., "Sprint 7").
    pub name: String,
    /// When the sprint begins.
    pub start_date: DateTime<Utc>,
    /// `start_date + 14 days`, derived at creation.
    pub end_date: DateTime<Utc>,
}

impl Sprint {
    /// Creates a sprint starting at `start_date`; the end date is derived.
    pub fn new(id: i64, name: String, start_date: DateTime<Utc>) -> Self {
        Sprint {
            id,
            name,
            start_date,
            end_date: start_date + Duration::days(SPRINT_DURATION_DAYS),
        }
    }

    /// Whether `now` falls inside this sprint's window (inclusive ends).
    pub fn contains(&self, now: DateTime<Utc>) -> bool {
        self.start_date <= now && now <= self.end_date
    }
}

/// Client approval state of a milestone gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalStatus {
    /// Awaiting a client decision.
    Pending,
    /// The client signed off.
    Approved,
    /// The client asked for revisions.
    ChangesRequested,
}

impl ApprovalStatus {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "PENDING",
            ApprovalStatus::Approved => "APPROVED",
            ApprovalStatus::ChangesRequested => "CHANGES_REQUESTED",
        }
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ApprovalStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "PENDING" => Ok(ApprovalStatus::Pending),
            "APPROVED" => Ok(ApprovalStatus::Approved),
            "CHANGES_REQUESTED" => Ok(ApprovalStatus::ChangesRequested),
            _ => Err(Error::InvalidApproval(s.to_string())),
        }
    }
}

/// A named delivery phase owning work items by reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    /// Database-assigned identifier.
    pub id: i64,
    /// Display title.
    pub title: String,
    /// Position among the project's milestones.
    pub order_index: i64,
    /// Whether this milestone needs client sign-off before it counts as
    /// delivered.
    pub requires_client_approval: bool,
    /// Current approval decision.
    pub approval_status: ApprovalStatus,
    /// Free-form notes attached to the approval decision.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_notes: Option<String>,
}

#[cfg(test)]
#[path = "sprint_tests.rs"]
mod tests;
