// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Change request types.
//!
//! Change requests sit outside the work-item hierarchy but share the project
//! scope. Submission is limited to one per calendar week (see
//! [`crate::week`]); requests are never retracted, so the limit is always
//! evaluated against live rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Review state of a change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    /// Submitted, awaiting triage.
    Pending,
    /// Accepted into the plan.
    Approved,
    /// Rejected.
    Declined,
}

impl RequestStatus {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "PENDING",
            RequestStatus::Approved => "APPROVED",
            RequestStatus::Declined => "DECLINED",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "PENDING" => Ok(RequestStatus::Pending),
            "APPROVED" => Ok(RequestStatus::Approved),
            "DECLINED" => Ok(RequestStatus::Declined),
            _ => Err(Error::InvalidRequestStatus(s.to_string())),
        }
    }
}

/// A client-submitted request for additional or changed scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRequest {
    /// Database-assigned identifier.
    pub id: i64,
    /// Who submitted the request (weak reference, free-form).
    pub author: String,
    /// Summary line of the requested change.
    pub title: String,
    /// Current review decision.
    pub status: RequestStatus,
    /// Estimated effort in hours, once triaged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate_hours: Option<f64>,
    /// Free-form notes accompanying the estimate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate_notes: Option<String>,
    /// When the request was submitted. Drives the weekly window.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
