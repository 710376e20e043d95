// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::Utc;
use wp_core::{Database, Status};

use super::open_db;
use crate::error::Result;

pub fn run(id: &str, status: &str, index: usize) -> Result<()> {
    let (mut db, _config, _work_dir) = open_db()?;
    run_impl(&mut db, id, status, index)
}

/// Internal implementation that accepts a db for testing.
pub(crate) fn run_impl(db: &mut Database, id: &str, status: &str, index: usize) -> Result<()> {
    let status: Status = status.parse()?;
    let item = db.move_item(id, status, index, Utc::now())?;

    tracing::debug!(id = %item.id, status = %item.status, index, "moved work item");
    println!("Moved {} to {}[{}]", item.id, item.status, index);
    Ok(())
}

#[cfg(test)]
#[path = "mv_tests.rs"]
mod tests;
