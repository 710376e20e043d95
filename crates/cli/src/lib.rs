// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! wprs - client-services delivery portal CLI library.
//!
//! This crate provides the functionality for the `wp` CLI tool: a kanban
//! board of client deliverables backed by the wp-core engine and a SQLite
//! database under `.waypoint/`.
//!
//! # Main Components
//!
//! - [`Config`] - Workspace configuration (prefix, database location)
//! - [`cli::Cli`] - Command-line surface
//! - [`Error`] - Error types for all operations
//!
//! The engine itself (board state machine, progress aggregation, weekly
//! change-request window, comment threads) lives in `wp-core`; this crate
//! only parses input, opens the database, and renders output.

pub mod cli;
mod commands;
mod completions;
pub mod config;
pub mod display;
pub mod error;
pub mod id;
mod validate;

pub use cli::{Cli, Command, OutputFormat};
pub use config::{find_work_dir, get_db_path, init_work_dir, Config};
pub use error::{Error, Result};

use commands::new::NewArgs;
use commands::edit::EditArgs;

/// Execute a CLI command. This is the main entry point for library users
/// and provides a testable way to run commands without process execution.
pub fn run(command: Command) -> Result<()> {
    match command {
        Command::Init { prefix, path } => commands::init::run(prefix, path),
        Command::New {
            title,
            description,
            status,
            priority,
            owner,
            due,
            estimate,
            sprint,
            milestone,
            client_visible,
        } => commands::new::run(NewArgs {
            title,
            description,
            status,
            priority,
            owner,
            due,
            estimate,
            sprint,
            milestone,
            client_visible,
        }),
        Command::Move { id, status, index } => commands::mv::run(&id, &status, index),
        Command::Board { sprint, format } => commands::board::run(sprint, format),
        Command::List { status, format } => commands::list::run(status, format),
        Command::Show { id, comment, format } => commands::show::run(&id, comment, format),
        Command::Edit {
            id,
            title,
            description,
            priority,
            owner,
            due,
            estimate,
            sprint,
            no_sprint,
            milestone,
            no_milestone,
            client_visible,
        } => commands::edit::run(
            &id,
            EditArgs {
                title,
                description,
                priority,
                owner,
                due,
                estimate,
                sprint,
                no_sprint,
                milestone,
                no_milestone,
                client_visible,
            },
        ),
        Command::Delete { id } => commands::delete::run(&id),
        Command::Sprint { command } => commands::sprint::run(command),
        Command::Milestone { command } => commands::milestone::run(command),
        Command::Progress {
            sprint,
            milestone,
            format,
        } => commands::progress::run(sprint, milestone, format),
        Command::Comment {
            id,
            content,
            author,
            reply_to,
        } => commands::comment::run(&id, &content, &author, reply_to),
        Command::Request { command } => commands::request::run(command),
        Command::Task { command } => commands::task::run(command),
        Command::Log { id, limit } => commands::log::run(id, limit),
        Command::Completion { shell } => {
            completions::run(shell);
            Ok(())
        }
    }
}
