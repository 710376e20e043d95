// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use wp_core::{Database, Priority, WorkItemPatch};

use super::{open_db, parse_date};
use crate::error::Result;
use crate::validate::validate_and_trim_title;

/// Arguments for editing a work item.
#[derive(Debug, Default)]
pub struct EditArgs {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub owner: Option<String>,
    pub due: Option<String>,
    pub estimate: Option<f64>,
    pub sprint: Option<i64>,
    pub no_sprint: bool,
    pub milestone: Option<i64>,
    pub no_milestone: bool,
    pub client_visible: Option<bool>,
}

pub fn run(id: &str, args: EditArgs) -> Result<()> {
    let (mut db, _config, _work_dir) = open_db()?;
    run_impl(&mut db, id, args)
}

pub(crate) fn run_impl(db: &mut Database, id: &str, args: EditArgs) -> Result<()> {
    let title = args.title.as_deref().map(validate_and_trim_title).transpose()?;
    let priority: Option<Priority> = args.priority.as_deref().map(str::parse).transpose()?;
    let due_date = args.due.as_deref().map(parse_date).transpose()?;

    if let Some(sprint_id) = args.sprint {
        db.get_sprint(sprint_id)?;
    }
    if let Some(milestone_id) = args.milestone {
        db.get_milestone(milestone_id)?;
    }

    let sprint_id = if args.no_sprint {
        Some(None)
    } else {
        args.sprint.map(Some)
    };
    let milestone_id = if args.no_milestone {
        Some(None)
    } else {
        args.milestone.map(Some)
    };

    let patch = WorkItemPatch {
        title,
        description: args.description.map(Some),
        priority,
        owner: args.owner.map(Some),
        due_date: due_date.map(Some),
        estimate: args.estimate.map(Some),
        sprint_id,
        milestone_id,
        client_visible: args.client_visible,
    };
    let item = db.update_item(id, &patch)?;

    println!("Updated {}", item.id);
    Ok(())
}

#[cfg(test)]
#[path = "edit_tests.rs"]
mod tests;
