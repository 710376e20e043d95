// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use wp_core::{Database, Status, WorkItem};

use super::open_db;
use crate::cli::OutputFormat;
use crate::display::format_board;
use crate::error::Result;

pub fn run(sprint: Option<i64>, format: OutputFormat) -> Result<()> {
    let (db, _config, _work_dir) = open_db()?;
    run_impl(&db, sprint, format)
}

pub(crate) fn run_impl(db: &Database, sprint: Option<i64>, format: OutputFormat) -> Result<()> {
    let items = match sprint {
        Some(sprint_id) => {
            db.get_sprint(sprint_id)?;
            db.sprint_items(sprint_id)?
        }
        None => db.list_items()?,
    };

    let groups = group_by_status(items);

    match format {
        OutputFormat::Text => {
            for line in format_board(&groups) {
                println!("{line}");
            }
        }
        OutputFormat::Json => {
            let mut columns = serde_json::Map::new();
            for (status, items) in &groups {
                columns.insert(status.as_str().to_string(), serde_json::to_value(items)?);
            }
            println!("{}", serde_json::to_string_pretty(&columns)?);
        }
    }
    Ok(())
}

/// Bucket items into board columns, preserving position order.
pub(crate) fn group_by_status(items: Vec<WorkItem>) -> Vec<(Status, Vec<WorkItem>)> {
    Status::all()
        .into_iter()
        .map(|status| {
            let mut column: Vec<WorkItem> =
                items.iter().filter(|i| i.status == status).cloned().collect();
            column.sort_by_key(|i| i.order_index);
            (status, column)
        })
        .collect()
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod tests;
