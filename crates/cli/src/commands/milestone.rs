// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use wp_core::{ApprovalStatus, Database};

use super::open_db;
use crate::cli::{MilestoneCommand, OutputFormat};
use crate::display::format_progress;
use crate::error::Result;
use crate::validate::validate_and_trim_title;

pub fn run(command: MilestoneCommand) -> Result<()> {
    let (mut db, _config, _work_dir) = open_db()?;
    match command {
        MilestoneCommand::New {
            title,
            requires_approval,
        } => new_impl(&db, &title, requires_approval),
        MilestoneCommand::List { format } => list_impl(&db, format),
        MilestoneCommand::Approve { id, notes } => {
            decide_impl(&mut db, id, ApprovalStatus::Approved, notes.as_deref())
        }
        MilestoneCommand::RequestChanges { id, notes } => decide_impl(
            &mut db,
            id,
            ApprovalStatus::ChangesRequested,
            notes.as_deref(),
        ),
    }
}

pub(crate) fn new_impl(db: &Database, title: &str, requires_approval: bool) -> Result<()> {
    let title = validate_and_trim_title(title)?;
    let milestone = db.create_milestone(&title, requires_approval)?;

    if requires_approval {
        println!(
            "Created milestone {} \"{}\" (client approval required)",
            milestone.id, milestone.title
        );
    } else {
        println!("Created milestone {} \"{}\"", milestone.id, milestone.title);
    }
    Ok(())
}

pub(crate) fn list_impl(db: &Database, format: OutputFormat) -> Result<()> {
    let milestones = db.list_milestones()?;

    if let OutputFormat::Json = format {
        let rows = milestones
            .iter()
            .map(|milestone| {
                let progress = db.milestone_progress(milestone.id)?;
                Ok(serde_json::json!({
                    "milestone": milestone,
                    "progress": progress,
                }))
            })
            .collect::<Result<Vec<_>>>()?;
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for milestone in &milestones {
        let progress = db.milestone_progress(milestone.id)?;
        let gate = if milestone.requires_client_approval {
            format!("  [{}]", milestone.approval_status)
        } else {
            String::new()
        };
        println!(
            "{}  {}{}  {}",
            milestone.id,
            milestone.title,
            gate,
            format_progress(&progress)
        );
    }
    Ok(())
}

pub(crate) fn decide_impl(
    db: &mut Database,
    id: i64,
    status: ApprovalStatus,
    notes: Option<&str>,
) -> Result<()> {
    db.set_milestone_approval(id, status, notes)?;
    println!("Milestone {} marked {}", id, status);
    Ok(())
}
