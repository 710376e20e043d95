// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use wp_core::{CommentNode, Progress, Status, Task, WorkItem};

/// Maximum line width for wrapped text content (excluding indent).
const WRAP_WIDTH: usize = 96;

/// Render a percent that may be absent.
///
/// `None` means "nothing to measure" and must not read as 0%.
pub fn format_percent(percent: Option<u8>) -> String {
    match percent {
        Some(pct) => format!("{pct}%"),
        None => "-".to_string(),
    }
}

/// One-line progress summary, e.g. `2/4 done (50%)`.
pub fn format_progress(progress: &Progress) -> String {
    if progress.total == 0 {
        return "no items".to_string();
    }
    format!(
        "{}/{} done ({})",
        progress.completed,
        progress.total,
        format_percent(progress.percent)
    )
}

/// One board line for a work item, e.g. `acme-a1b2  [HIGH] Fix header (sam)`.
pub fn format_item_line(item: &WorkItem) -> String {
    let mut line = format!("{}  [{}] {}", item.id, item.priority, item.title);
    if let Some(owner) = &item.owner {
        line.push_str(&format!(" ({owner})"));
    }
    if let Some(due) = item.due_date {
        line.push_str(&format!(" due {due}"));
    }
    line
}

/// Render the board as column sections in status order.
pub fn format_board(groups: &[(Status, Vec<WorkItem>)]) -> Vec<String> {
    let mut lines = Vec::new();
    for (status, items) in groups {
        lines.push(format!("{} ({})", status, items.len()));
        for item in items {
            lines.push(format!("  {}", format_item_line(item)));
        }
        lines.push(String::new());
    }
    if lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines
}

/// One line for a sub-task.
pub fn format_task_line(task: &Task) -> String {
    format!("  #{}  [{}] {}", task.id, task.status, task.title)
}

/// Render a comment forest with indentation by reply depth.
///
/// `highlight` marks one comment with a `>` gutter, the terminal analog of
/// "scroll to and emphasize".
pub fn format_forest(forest: &[CommentNode], highlight: Option<i64>) -> Vec<String> {
    let mut lines = Vec::new();
    for node in forest {
        format_node(node, 0, highlight, &mut lines);
    }
    lines
}

fn format_node(node: &CommentNode, depth: usize, highlight: Option<i64>, lines: &mut Vec<String>) {
    let gutter = if highlight == Some(node.comment.id) {
        ">"
    } else {
        " "
    };
    let indent = "  ".repeat(depth);
    lines.push(format!(
        "{gutter} {indent}#{} {} ({})",
        node.comment.id,
        node.comment.author,
        node.comment.created_at.format("%Y-%m-%d %H:%M")
    ));
    for content_line in wrap_text(&node.comment.content, WRAP_WIDTH).lines() {
        lines.push(format!("  {indent}  {content_line}"));
    }
    for reply in &node.replies {
        format_node(reply, depth + 1, highlight, lines);
    }
}

/// Wrap text at word boundaries if it's a single line.
///
/// - If content contains newlines: return as-is (preserve user formatting)
/// - If content is single line >width: wrap at word boundaries
/// - If content is single line <=width: return as-is
pub fn wrap_text(content: &str, width: usize) -> String {
    // If content contains newlines, preserve exactly
    if content.contains('\n') {
        return content.to_string();
    }

    // If fits in width, return as-is
    if content.len() <= width {
        return content.to_string();
    }

    // Wrap at word boundaries
    let mut result = String::new();
    let mut current_line = String::new();

    for word in content.split_whitespace() {
        if current_line.is_empty() {
            current_line = word.to_string();
        } else if current_line.len() + 1 + word.len() <= width {
            current_line.push(' ');
            current_line.push_str(word);
        } else {
            if !result.is_empty() {
                result.push('\n');
            }
            result.push_str(&current_line);
            current_line = word.to_string();
        }
    }

    if !current_line.is_empty() {
        if !result.is_empty() {
            result.push('\n');
        }
        result.push_str(&current_line);
    }

    result
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
