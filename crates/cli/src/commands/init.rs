// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use wp_core::Database;

use crate::config::{get_db_path, init_work_dir, Config};
use crate::error::Result;

pub fn run(prefix: String, path: Option<PathBuf>) -> Result<()> {
    let base = match path {
        Some(path) => path,
        None => std::env::current_dir()?,
    };

    let work_dir = init_work_dir(&base, &prefix)?;

    // Create the database up front so the first command doesn't race on
    // schema creation.
    let config = Config::load(&work_dir)?;
    let db_path = get_db_path(&work_dir, &config);
    Database::open(&db_path)?;

    println!("Initialized portal workspace in {}", work_dir.display());
    Ok(())
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
