// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Comment thread assembly.
//!
//! Comments are stored as flat parent-indexed rows; this module assembles
//! them into an ordered forest on demand and locates single nodes by id.
//! There is no depth limit: replies nest arbitrarily deep.

use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::comment::Comment;

/// A comment with its replies, in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentNode {
    /// The comment itself.
    #[serde(flatten)]
    pub comment: Comment,
    /// Direct replies, oldest first.
    pub replies: Vec<CommentNode>,
}

/// Assemble flat comment rows into parent/children trees.
///
/// `comments` must be in creation order (the store returns them that way);
/// roots and reply lists preserve that order. Rows whose parent row is
/// missing (manual surgery, partial restores) surface as extra roots rather
/// than vanishing.
pub fn build_forest(comments: Vec<Comment>) -> Vec<CommentNode> {
    let ids: HashSet<i64> = comments.iter().map(|c| c.id).collect();

    let mut children: HashMap<i64, Vec<Comment>> = HashMap::new();
    let mut roots: Vec<Comment> = Vec::new();
    for comment in comments {
        match comment.parent_id {
            Some(parent) if ids.contains(&parent) => {
                children.entry(parent).or_default().push(comment);
            }
            _ => roots.push(comment),
        }
    }

    roots
        .into_iter()
        .map(|root| attach_replies(root, &mut children))
        .collect()
}

fn attach_replies(comment: Comment, children: &mut HashMap<i64, Vec<Comment>>) -> CommentNode {
    let replies = children
        .remove(&comment.id)
        .unwrap_or_default()
        .into_iter()
        .map(|reply| attach_replies(reply, children))
        .collect();
    CommentNode { comment, replies }
}

/// Depth-first search of a forest for the comment with the given id.
///
/// Returns `None` when the id does not exist (deleted item, wrong id);
/// callers use that as the "nothing to highlight" signal.
pub fn locate(forest: &[CommentNode], comment_id: i64) -> Option<&CommentNode> {
    for node in forest {
        if node.comment.id == comment_id {
            return Some(node);
        }
        if let Some(found) = locate(&node.replies, comment_id) {
            return Some(found);
        }
    }
    None
}

#[cfg(test)]
#[path = "thread_tests.rs"]
mod tests;
