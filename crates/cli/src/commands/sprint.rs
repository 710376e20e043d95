// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::Utc;
use wp_core::{sprint_time_progress, Database, Progress};

use super::{open_db, parse_date_utc};
use crate::cli::{OutputFormat, SprintCommand};
use crate::display::{format_percent, format_progress};
use crate::error::Result;

pub fn run(command: SprintCommand) -> Result<()> {
    let (db, _config, _work_dir) = open_db()?;
    match command {
        SprintCommand::New { name, start } => new_impl(&db, &name, &start),
        SprintCommand::List { format } => list_impl(&db, format),
    }
}

pub(crate) fn new_impl(db: &Database, name: &str, start: &str) -> Result<()> {
    let start_date = parse_date_utc(start)?;
    let sprint = db.create_sprint(name, start_date)?;

    println!(
        "Created sprint {} \"{}\" ({} to {})",
        sprint.id,
        sprint.name,
        sprint.start_date.format("%Y-%m-%d"),
        sprint.end_date.format("%Y-%m-%d")
    );
    Ok(())
}

pub(crate) fn list_impl(db: &Database, format: OutputFormat) -> Result<()> {
    let now = Utc::now();
    let sprints = db.list_sprints()?;
    let active_id = db.active_sprint(now)?.map(|s| s.id);

    if let OutputFormat::Json = format {
        let rows = sprints
            .iter()
            .map(|sprint| {
                let items = db.sprint_items_progress(sprint.id)?;
                Ok(serde_json::json!({
                    "sprint": sprint,
                    "active": Some(sprint.id) == active_id,
                    "time_percent": sprint_time_progress(sprint, now),
                    "items": items,
                }))
            })
            .collect::<Result<Vec<_>>>()?;
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for sprint in &sprints {
        let marker = if Some(sprint.id) == active_id { "*" } else { " " };
        let items: Progress = db.sprint_items_progress(sprint.id)?;
        println!(
            "{} {}  {}  {} to {}  time {}  items {}",
            marker,
            sprint.id,
            sprint.name,
            sprint.start_date.format("%Y-%m-%d"),
            sprint.end_date.format("%Y-%m-%d"),
            format_percent(Some(sprint_time_progress(sprint, now))),
            format_progress(&items)
        );
    }
    Ok(())
}
