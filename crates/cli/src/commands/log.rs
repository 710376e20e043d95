// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use wp_core::{Database, Event};

use super::open_db;
use crate::error::Result;

pub fn run(id: Option<String>, limit: usize) -> Result<()> {
    let (db, _config, _work_dir) = open_db()?;
    run_impl(&db, id.as_deref(), limit)
}

pub(crate) fn run_impl(db: &Database, id: Option<&str>, limit: usize) -> Result<()> {
    let events = match id {
        Some(item_id) => {
            db.get_item(item_id)?;
            db.events_for_item(item_id)?
        }
        None => db.recent_events(limit)?,
    };

    for event in &events {
        println!("{}", format_event(event));
    }
    Ok(())
}

fn format_event(event: &Event) -> String {
    let mut line = format!(
        "{}  {}  {}",
        event.created_at.format("%Y-%m-%d %H:%M"),
        event.work_item_id,
        event.action
    );
    match (&event.old_value, &event.new_value) {
        (Some(old), Some(new)) => line.push_str(&format!("  {old} -> {new}")),
        (None, Some(new)) => line.push_str(&format!("  {new}")),
        _ => {}
    }
    line
}
