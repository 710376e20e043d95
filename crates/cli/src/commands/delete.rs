// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use wp_core::Database;

use super::open_db;
use crate::error::Result;

pub fn run(id: &str) -> Result<()> {
    let (mut db, _config, _work_dir) = open_db()?;
    run_impl(&mut db, id)
}

pub(crate) fn run_impl(db: &mut Database, id: &str) -> Result<()> {
    db.delete_item(id)?;
    println!("Deleted {} (comments and tasks included)", id);
    Ok(())
}
