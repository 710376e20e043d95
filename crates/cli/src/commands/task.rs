// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::Utc;
use wp_core::{Database, Status};

use super::open_db;
use crate::cli::TaskCommand;
use crate::display::format_task_line;
use crate::error::Result;
use crate::validate::validate_and_trim_title;

pub fn run(command: TaskCommand) -> Result<()> {
    let (mut db, _config, _work_dir) = open_db()?;
    match command {
        TaskCommand::Add { id, title } => add_impl(&mut db, &id, &title),
        TaskCommand::List { id } => list_impl(&db, &id),
        TaskCommand::Move { task_id, status } => move_impl(&mut db, task_id, &status),
    }
}

pub(crate) fn add_impl(db: &mut Database, id: &str, title: &str) -> Result<()> {
    let title = validate_and_trim_title(title)?;
    let task = db.add_task(id, &title, Utc::now())?;
    println!("Added task #{} to {}", task.id, id);
    Ok(())
}

pub(crate) fn list_impl(db: &Database, id: &str) -> Result<()> {
    db.get_item(id)?;
    for task in db.tasks_for_item(id)? {
        println!("{}", format_task_line(&task));
    }
    Ok(())
}

pub(crate) fn move_impl(db: &mut Database, task_id: i64, status: &str) -> Result<()> {
    let status: Status = status.parse()?;
    db.set_task_status(task_id, status)?;
    println!("Moved task #{} to {}", task_id, status);
    Ok(())
}
