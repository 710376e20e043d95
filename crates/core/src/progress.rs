// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Progress aggregation.
//!
//! Completion ratios are always re-derived from the work items in scope.
//! Milestone and project progress filter the full item set and recount;
//! child percentages are never summed, which would compound rounding error.
//! Nothing here mutates state, so every function is safe to recompute
//! freely.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::db::Database;
use crate::error::Result;
use crate::item::{Status, WorkItem};
use crate::sprint::Sprint;

/// Completion counts for a set of work items.
///
/// `percent` is `None` when there is nothing to measure (`total == 0`).
/// Callers must render that distinctly from "0% complete with items
/// present".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    /// Items with status DONE.
    pub completed: usize,
    /// All items in scope.
    pub total: usize,
    /// `round(100 × completed ÷ total)`, or `None` when `total == 0`.
    pub percent: Option<u8>,
}

impl Progress {
    /// Counts completion over the given items.
    pub fn measure<'a, I>(items: I) -> Progress
    where
        I: IntoIterator<Item = &'a WorkItem>,
    {
        let mut completed = 0;
        let mut total = 0;
        for item in items {
            total += 1;
            if item.status == Status::Done {
                completed += 1;
            }
        }
        Progress {
            completed,
            total,
            percent: ratio_percent(completed, total),
        }
    }
}

/// `round(100 × completed ÷ total)` as a percentage, `None` for an empty
/// set.
fn ratio_percent(completed: usize, total: usize) -> Option<u8> {
    if total == 0 {
        return None;
    }
    let pct = (100.0 * completed as f64 / total as f64).round();
    Some(pct as u8)
}

/// How far through its time window a sprint is, clamped to `[0, 100]`.
///
/// Sprints in the future report 0; sprints past their end cap at 100.
pub fn sprint_time_progress(sprint: &Sprint, now: DateTime<Utc>) -> u8 {
    let span = (sprint.end_date - sprint.start_date).num_seconds();
    if span <= 0 {
        return 100;
    }
    let elapsed = (now - sprint.start_date).num_seconds();
    let pct = (100.0 * elapsed as f64 / span as f64).round();
    pct.clamp(0.0, 100.0) as u8
}

/// The sprint whose window contains `now`, ties broken by the most recent
/// start date.
///
/// Overlapping sprints are permitted in storage; "active" is a query-time
/// policy, not a stored flag.
pub fn active_sprint(sprints: &[Sprint], now: DateTime<Utc>) -> Option<&Sprint> {
    sprints
        .iter()
        .filter(|s| s.contains(now))
        .max_by_key(|s| s.start_date)
}

impl Database {
    /// Progress across every work item in the project.
    pub fn project_progress(&self) -> Result<Progress> {
        Ok(Progress::measure(&self.list_items()?))
    }

    /// Completion progress of the items committed to a sprint.
    ///
    /// Always re-derived by filtering the item set on the sprint reference.
    pub fn sprint_items_progress(&self, sprint_id: i64) -> Result<Progress> {
        self.get_sprint(sprint_id)?;
        Ok(Progress::measure(&self.sprint_items(sprint_id)?))
    }

    /// Completion progress of the items rolled up into a milestone.
    pub fn milestone_progress(&self, milestone_id: i64) -> Result<Progress> {
        self.get_milestone(milestone_id)?;
        Ok(Progress::measure(&self.milestone_items(milestone_id)?))
    }

    /// The sprint active at `now`, if any (see [`active_sprint`]).
    pub fn active_sprint(&self, now: DateTime<Utc>) -> Result<Option<Sprint>> {
        let sprints = self.list_sprints()?;
        Ok(active_sprint(&sprints, now).cloned())
    }
}

#[cfg(test)]
#[path = "progress_tests.rs"]
mod tests;
