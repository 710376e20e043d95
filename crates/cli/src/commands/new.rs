// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::Utc;
use wp_core::{Database, NewWorkItem, Priority, Status};

use super::{open_db, parse_date};
use crate::config::Config;
use crate::error::Result;
use crate::id::unique_work_item_id;
use crate::validate::validate_and_trim_title;

/// Arguments for creating a work item.
#[derive(Debug, Default)]
pub struct NewArgs {
    pub title: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub owner: Option<String>,
    pub due: Option<String>,
    pub estimate: Option<f64>,
    pub sprint: Option<i64>,
    pub milestone: Option<i64>,
    pub client_visible: bool,
}

pub fn run(args: NewArgs) -> Result<()> {
    let (mut db, config, _work_dir) = open_db()?;
    run_impl(&mut db, &config, args)
}

/// Internal implementation that accepts db/config for testing.
pub(crate) fn run_impl(db: &mut Database, config: &Config, args: NewArgs) -> Result<()> {
    let title = validate_and_trim_title(&args.title)?;

    let status: Status = match &args.status {
        Some(s) => s.parse()?,
        None => Status::Backlog,
    };
    let priority: Priority = match &args.priority {
        Some(p) => p.parse()?,
        None => Priority::Med,
    };
    let due_date = args.due.as_deref().map(parse_date).transpose()?;

    // Referential checks fail fast with a typed not-found error.
    if let Some(sprint_id) = args.sprint {
        db.get_sprint(sprint_id)?;
    }
    if let Some(milestone_id) = args.milestone {
        db.get_milestone(milestone_id)?;
    }

    let now = Utc::now();
    let id = unique_work_item_id(&config.prefix, &title, &now, |candidate| {
        db.item_exists(candidate).unwrap_or(false)
    });

    let new = NewWorkItem {
        id,
        title,
        description: args.description,
        status,
        priority,
        owner: args.owner,
        due_date,
        estimate: args.estimate,
        sprint_id: args.sprint,
        milestone_id: args.milestone,
        client_visible: args.client_visible,
    };
    let item = db.create_item(new, now)?;

    tracing::debug!(id = %item.id, status = %item.status, "created work item");
    println!("Created {} ({}[{}])", item.id, item.status, item.order_index);
    Ok(())
}

#[cfg(test)]
#[path = "new_tests.rs"]
mod tests;
