// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// All possible errors that can occur in the wprs library.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("not initialized: run 'wp init' first")]
    NotInitialized,

    #[error("already initialized at {0}")]
    AlreadyInitialized(String),

    #[error("invalid prefix: must be 2+ lowercase alphanumeric with at least one letter")]
    InvalidPrefix,

    #[error("invalid date '{0}'\n  hint: expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("{field} is required")]
    FieldRequired { field: &'static str },

    #[error("{field} is too long (max {max} characters)")]
    FieldTooLong { field: &'static str, max: usize },

    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] wp_core::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for wprs operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
