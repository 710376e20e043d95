// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::Utc;
use wp_core::{sprint_time_progress, Database};

use super::open_db;
use crate::cli::OutputFormat;
use crate::display::{format_percent, format_progress};
use crate::error::Result;

pub fn run(sprint: Option<i64>, milestone: Option<i64>, format: OutputFormat) -> Result<()> {
    let (db, _config, _work_dir) = open_db()?;
    run_impl(&db, sprint, milestone, format)
}

pub(crate) fn run_impl(
    db: &Database,
    sprint: Option<i64>,
    milestone: Option<i64>,
    format: OutputFormat,
) -> Result<()> {
    if let Some(sprint_id) = sprint {
        let now = Utc::now();
        let sprint = db.get_sprint(sprint_id)?;
        let items = db.sprint_items_progress(sprint_id)?;
        let time_percent = sprint_time_progress(&sprint, now);

        match format {
            OutputFormat::Text => println!(
                "Sprint {} \"{}\": items {}, time {} elapsed",
                sprint.id,
                sprint.name,
                format_progress(&items),
                format_percent(Some(time_percent))
            ),
            OutputFormat::Json => println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "sprint": sprint,
                    "items": items,
                    "time_percent": time_percent,
                }))?
            ),
        }
        return Ok(());
    }

    if let Some(milestone_id) = milestone {
        let milestone = db.get_milestone(milestone_id)?;
        let progress = db.milestone_progress(milestone_id)?;

        match format {
            OutputFormat::Text => println!(
                "Milestone {} \"{}\": {}",
                milestone.id,
                milestone.title,
                format_progress(&progress)
            ),
            OutputFormat::Json => println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "milestone": milestone,
                    "progress": progress,
                }))?
            ),
        }
        return Ok(());
    }

    let progress = db.project_progress()?;
    match format {
        OutputFormat::Text => println!("Project: {}", format_progress(&progress)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&progress)?),
    }
    Ok(())
}

#[cfg(test)]
#[path = "progress_tests.rs"]
mod tests;
