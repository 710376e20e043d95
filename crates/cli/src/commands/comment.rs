// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::Utc;
use wp_core::Database;

use super::open_db;
use crate::error::Result;
use crate::validate::validate_and_trim_comment;

pub fn run(id: &str, content: &str, author: &str, reply_to: Option<i64>) -> Result<()> {
    let (mut db, _config, _work_dir) = open_db()?;
    run_impl(&mut db, id, content, author, reply_to)
}

/// Internal implementation that accepts a db for testing.
pub(crate) fn run_impl(
    db: &mut Database,
    id: &str,
    content: &str,
    author: &str,
    reply_to: Option<i64>,
) -> Result<()> {
    let content = validate_and_trim_comment(content)?;
    let comment = db.add_comment(id, author, &content, reply_to, Utc::now())?;

    match reply_to {
        Some(parent) => println!("Added reply #{} to comment #{} on {}", comment.id, parent, id),
        None => println!("Added comment #{} to {}", comment.id, id),
    }
    Ok(())
}

#[cfg(test)]
#[path = "comment_tests.rs"]
mod tests;
