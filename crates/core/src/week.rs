// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Calendar-week submission window.
//!
//! Change requests are limited to one per calendar week. Weeks start Monday
//! 00:00:00 UTC; a Sunday belongs to the week that began the preceding
//! Monday. The check is evaluated against live submission rows at request
//! time; submissions are never retracted, so there is no counter to
//! decrement or restore.

use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc};
use serde::Serialize;

/// Outcome of a submission-window check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubmissionWindow {
    /// Whether a new submission is allowed right now.
    pub allowed: bool,
    /// When the next submission becomes possible; set only when blocked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_available_at: Option<DateTime<Utc>>,
}

/// The most recent Monday 00:00:00 UTC at or before `now`.
pub fn week_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let days_into_week = i64::from(now.weekday().num_days_from_monday());
    let monday = now.date_naive() - Duration::days(days_into_week);
    monday.and_time(NaiveTime::MIN).and_utc()
}

/// Decide whether a new submission is allowed given the existing submission
/// timestamps.
///
/// Blocked iff any submission falls at or after the start of the current
/// calendar week. When blocked, `next_available_at` is the following Monday
/// 00:00:00 UTC.
pub fn can_submit(submissions: &[DateTime<Utc>], now: DateTime<Utc>) -> SubmissionWindow {
    let start = week_start(now);
    if submissions.iter().any(|created_at| *created_at >= start) {
        SubmissionWindow {
            allowed: false,
            next_available_at: Some(start + Duration::days(7)),
        }
    } else {
        SubmissionWindow {
            allowed: true,
            next_available_at: None,
        }
    }
}

#[cfg(test)]
#[path = "week_tests.rs"]
mod tests;
