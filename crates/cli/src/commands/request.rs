// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::Utc;
use wp_core::{Database, RequestStatus};

use super::open_db;
use crate::cli::{OutputFormat, RequestCommand};
use crate::error::Result;
use crate::validate::validate_and_trim_title;

pub fn run(command: RequestCommand) -> Result<()> {
    let (mut db, _config, _work_dir) = open_db()?;
    match command {
        RequestCommand::New {
            title,
            author,
            hours,
            notes,
        } => new_impl(&mut db, &title, &author, hours, notes.as_deref()),
        RequestCommand::List { format } => list_impl(&db, format),
        RequestCommand::Status => status_impl(&db),
        RequestCommand::Approve { id } => decide_impl(&mut db, id, RequestStatus::Approved),
        RequestCommand::Decline { id } => decide_impl(&mut db, id, RequestStatus::Declined),
    }
}

pub(crate) fn new_impl(
    db: &mut Database,
    title: &str,
    author: &str,
    hours: Option<f64>,
    notes: Option<&str>,
) -> Result<()> {
    let title = validate_and_trim_title(title)?;
    // The weekly window is enforced inside the engine; a blocked submission
    // surfaces here with the next eligible date in the message.
    let request = db.create_change_request(author, &title, hours, notes, Utc::now())?;

    println!("Submitted change request #{} \"{}\"", request.id, request.title);
    Ok(())
}

pub(crate) fn list_impl(db: &Database, format: OutputFormat) -> Result<()> {
    let requests = db.list_change_requests()?;

    match format {
        OutputFormat::Text => {
            for request in &requests {
                let mut line = format!(
                    "{}  [{}] {} by {} ({})",
                    request.id,
                    request.status,
                    request.title,
                    request.author,
                    request.created_at.format("%Y-%m-%d")
                );
                if let Some(hours) = request.estimate_hours {
                    line.push_str(&format!("  est {hours}h"));
                }
                println!("{line}");
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&requests)?),
    }
    Ok(())
}

pub(crate) fn status_impl(db: &Database) -> Result<()> {
    let window = db.check_submission_allowed(Utc::now())?;
    match window.next_available_at {
        None => println!("A change request can be submitted now."),
        Some(next) => println!(
            "Weekly limit used; next submission opens {}",
            next.format("%Y-%m-%d %H:%M UTC")
        ),
    }
    Ok(())
}

pub(crate) fn decide_impl(db: &mut Database, id: i64, status: RequestStatus) -> Result<()> {
    db.set_request_status(id, status)?;
    println!("Change request {} marked {}", id, status);
    Ok(())
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
