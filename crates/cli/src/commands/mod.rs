// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod board;
pub mod comment;
pub mod delete;
pub mod edit;
pub mod init;
pub mod list;
pub mod log;
pub mod milestone;
pub mod mv;
pub mod new;
pub mod progress;
pub mod request;
pub mod show;
pub mod sprint;
pub mod task;

use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use wp_core::Database;

use crate::config::{find_work_dir, get_db_path, Config};
use crate::error::{Error, Result};

/// Helper to open the database from the current context.
pub fn open_db() -> Result<(Database, Config, PathBuf)> {
    let work_dir = find_work_dir()?;
    let config = Config::load(&work_dir)?;
    let db_path = get_db_path(&work_dir, &config);
    tracing::debug!(path = %db_path.display(), "opening portal database");
    let db = Database::open(&db_path)?;
    Ok((db, config, work_dir))
}

/// Parse a `YYYY-MM-DD` argument.
pub(crate) fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| Error::InvalidDate(input.to_string()))
}

/// Parse a `YYYY-MM-DD` argument as midnight UTC.
pub(crate) fn parse_date_utc(input: &str) -> Result<DateTime<Utc>> {
    Ok(parse_date(input)?.and_time(NaiveTime::MIN).and_utc())
}
