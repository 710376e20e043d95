// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Comment records.
//!
//! Comments are stored flat with a nullable parent reference; the reply tree
//! is assembled on demand by [`crate::thread`]. Comments are append-only:
//! deleting a work item removes its whole forest, but individual comments
//! are never deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single comment on a work item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Database-assigned identifier.
    pub id: i64,
    /// The work item this comment is attached to.
    pub work_item_id: String,
    /// Who wrote the comment (weak reference, free-form).
    pub author: String,
    /// The comment body.
    pub content: String,
    /// Parent comment for replies; `None` means a top-level thread root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    /// When the comment was written. Insertion order is display order.
    pub created_at: DateTime<Utc>,
}
