// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use wp_core::{Database, Status};

use super::open_db;
use crate::cli::OutputFormat;
use crate::display::format_item_line;
use crate::error::Result;

pub fn run(status: Option<String>, format: OutputFormat) -> Result<()> {
    let (db, _config, _work_dir) = open_db()?;
    run_impl(&db, status.as_deref(), format)
}

pub(crate) fn run_impl(db: &Database, status: Option<&str>, format: OutputFormat) -> Result<()> {
    let items = match status {
        Some(s) => {
            let status: Status = s.parse()?;
            db.status_group(status)?
        }
        None => db.list_items()?,
    };

    match format {
        OutputFormat::Text => {
            for item in &items {
                println!("{}  {}", item.status, format_item_line(item));
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
    }
    Ok(())
}
