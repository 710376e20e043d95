// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Portal workspace configuration management.
//!
//! Configuration is stored in `.waypoint/config.toml` and includes:
//! - `prefix`: The project-specific prefix for work-item IDs (e.g., "acme" → "acme-a1b2")
//! - `workspace`: Optional path to store the database in a different location

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::id::validate_prefix;

const WORK_DIR_NAME: &str = ".waypoint";
const CONFIG_FILE_NAME: &str = "config.toml";
const DB_FILE_NAME: &str = "portal.db";
const GITIGNORE_FILE_NAME: &str = ".gitignore";

/// Workspace configuration stored in `.waypoint/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Project-specific prefix for work-item IDs (2+ lowercase alphanumeric
    /// with at least one letter).
    pub prefix: String,
    /// Optional path for the database (relative to project root or absolute).
    pub workspace: Option<String>,
}

impl Config {
    /// Creates a new config with the given prefix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPrefix`] if prefix is not 2+ lowercase
    /// alphanumeric with at least one letter.
    pub fn new(prefix: String) -> Result<Self> {
        if !validate_prefix(&prefix) {
            return Err(Error::InvalidPrefix);
        }
        Ok(Config {
            prefix,
            workspace: None,
        })
    }

    /// Loads configuration from the given `.waypoint/` directory.
    pub fn load(work_dir: &Path) -> Result<Self> {
        let config_path = work_dir.join(CONFIG_FILE_NAME);
        let content = fs::read_to_string(&config_path)
            .map_err(|e| Error::Config(format!("failed to read config: {}", e)))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Saves configuration to the given `.waypoint/` directory.
    pub fn save(&self, work_dir: &Path) -> Result<()> {
        let config_path = work_dir.join(CONFIG_FILE_NAME);
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))?;
        fs::write(&config_path, content)?;
        Ok(())
    }
}

/// Find the .waypoint directory by walking up from the current directory.
pub fn find_work_dir() -> Result<PathBuf> {
    let mut current = std::env::current_dir()?;
    loop {
        let work_dir = current.join(WORK_DIR_NAME);
        if work_dir.is_dir() {
            return Ok(work_dir);
        }
        if !current.pop() {
            return Err(Error::NotInitialized);
        }
    }
}

/// Get the database path from config.
pub fn get_db_path(work_dir: &Path, config: &Config) -> PathBuf {
    match &config.workspace {
        Some(workspace) => {
            let workspace_path = Path::new(workspace);
            if workspace_path.is_absolute() {
                workspace_path.join(DB_FILE_NAME)
            } else {
                // Relative to work_dir's parent (the project root)
                work_dir
                    .parent()
                    .unwrap_or(work_dir)
                    .join(workspace)
                    .join(DB_FILE_NAME)
            }
        }
        None => work_dir.join(DB_FILE_NAME),
    }
}

/// Initialize a new .waypoint directory at the given path.
pub fn init_work_dir(path: &Path, prefix: &str) -> Result<PathBuf> {
    let work_dir = path.join(WORK_DIR_NAME);

    if work_dir.exists() {
        return Err(Error::AlreadyInitialized(work_dir.display().to_string()));
    }

    // Validate before touching the filesystem so a bad prefix doesn't leave
    // an empty .waypoint/ that blocks the retry.
    let config = Config::new(prefix.to_string())?;

    fs::create_dir_all(&work_dir)?;
    config.save(&work_dir)?;

    // The database is per-checkout state; keep it out of version control.
    fs::write(
        work_dir.join(GITIGNORE_FILE_NAME),
        "portal.db\nportal.db-journal\nportal.db-wal\nportal.db-shm\n",
    )?;

    Ok(work_dir)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
