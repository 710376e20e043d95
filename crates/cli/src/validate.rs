// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Input validation for user-supplied text.

use crate::error::{Error, Result};

const MAX_TITLE_LEN: usize = 200;
const MAX_COMMENT_LEN: usize = 4000;

/// Trim a title and reject empty or oversized input.
pub fn validate_and_trim_title(title: &str) -> Result<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(Error::FieldRequired { field: "title" });
    }
    if trimmed.chars().count() > MAX_TITLE_LEN {
        return Err(Error::FieldTooLong {
            field: "title",
            max: MAX_TITLE_LEN,
        });
    }
    Ok(trimmed.to_string())
}

/// Trim comment content and reject empty or oversized input.
pub fn validate_and_trim_comment(content: &str) -> Result<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(Error::FieldRequired { field: "comment" });
    }
    if trimmed.chars().count() > MAX_COMMENT_LEN {
        return Err(Error::FieldTooLong {
            field: "comment",
            max: MAX_COMMENT_LEN,
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
