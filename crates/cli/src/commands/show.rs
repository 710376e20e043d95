// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use wp_core::{locate, Database};

use super::open_db;
use crate::cli::OutputFormat;
use crate::display::{format_forest, format_task_line, wrap_text};
use crate::error::Result;

pub fn run(id: &str, comment: Option<i64>, format: OutputFormat) -> Result<()> {
    let (db, _config, _work_dir) = open_db()?;
    run_impl(&db, id, comment, format)
}

pub(crate) fn run_impl(
    db: &Database,
    id: &str,
    highlight: Option<i64>,
    format: OutputFormat,
) -> Result<()> {
    let item = db.get_item(id)?;
    let tasks = db.tasks_for_item(id)?;
    let forest = db.comment_forest(id)?;

    if let OutputFormat::Json = format {
        let value = serde_json::json!({
            "item": item,
            "tasks": tasks,
            "comments": forest,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}  {}", item.id, item.title);
    println!("  status:    {}[{}]", item.status, item.order_index);
    println!("  priority:  {}", item.priority);
    if let Some(owner) = &item.owner {
        println!("  owner:     {owner}");
    }
    if let Some(due) = item.due_date {
        println!("  due:       {due}");
    }
    if let Some(estimate) = item.estimate {
        println!("  estimate:  {estimate}h");
    }
    if let Some(sprint_id) = item.sprint_id {
        println!("  sprint:    {sprint_id}");
    }
    if let Some(milestone_id) = item.milestone_id {
        println!("  milestone: {milestone_id}");
    }
    println!(
        "  client:    {}",
        if item.client_visible { "visible" } else { "hidden" }
    );
    println!("  created:   {}", item.created_at.format("%Y-%m-%d %H:%M"));

    if let Some(description) = &item.description {
        println!();
        println!("Description");
        for line in wrap_text(description, 96).lines() {
            println!("  {line}");
        }
    }

    if !tasks.is_empty() {
        println!();
        println!("Tasks");
        for task in &tasks {
            println!("{}", format_task_line(task));
        }
    }

    if !forest.is_empty() {
        println!();
        println!("Comments");
        // A missing highlight id is not an error; there is just nothing to
        // emphasize.
        let highlight = highlight.filter(|id| locate(&forest, *id).is_some());
        for line in format_forest(&forest, highlight) {
            println!("{line}");
        }
    }

    Ok(())
}
