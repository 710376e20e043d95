// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

// Custom help template that groups commands into sections
const HELP_TEMPLATE: &str = "{about-with-newline}
{usage-heading} {usage}

{before-help}Options:
{options}{after-help}";

const COMMANDS_HELP: &str = "\
Board:
  new         Create a work item
  move        Move a work item to a status column position
  board       Show the kanban board
  list        List work items
  show        Show work-item details and comment threads
  edit        Edit a work item's fields
  delete      Delete a work item (and its comments and tasks)

Planning:
  sprint      Manage sprints (fixed two-week windows)
  milestone   Manage milestones and approval gates
  progress    Show completion progress for a scope

Collaboration:
  comment     Comment on a work item, optionally as a reply
  request     Submit and triage change requests (one per week)
  task        Manage sub-tasks of a work item
  log         View the activity log

Setup:
  init        Initialize a portal workspace
  completion  Generate shell completions";

const QUICKSTART_HELP: &str = "\
Get started:
  wp init --prefix acme        Initialize workspace
  wp new \"Design homepage\"     Create a work item
  wp board                     Show the board
  wp move <id> IN_PROGRESS 0   Drag an item to a column position
  wp progress                  Project completion";

#[derive(Parser)]
#[command(name = "wp")]
#[command(about = "A client-services delivery portal: kanban work items, sprints, and milestones")]
#[command(
    long_about = "A client-services delivery portal for the terminal.\n\n\
    Track deliverables across status columns, roll completion up into sprint and\n\
    milestone progress, and keep client change requests to one per week."
)]
#[command(help_template = HELP_TEMPLATE)]
#[command(before_help = COMMANDS_HELP)]
#[command(after_help = QUICKSTART_HELP)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    // ─────────────────────────────────────────────────────────────────────────
    // Board
    // ─────────────────────────────────────────────────────────────────────────
    /// Create a work item
    #[command(after_help = "Examples:\n  \
        wp new \"Design homepage\"                 Create a backlog item\n  \
        wp new \"Fix header\" -s IN_PROGRESS       Quick-add into a column\n  \
        wp new \"Launch prep\" -p URGENT -o sam    Set priority and owner\n  \
        wp new \"API docs\" --sprint 2             Commit to a sprint")]
    New {
        /// Title of the work item
        title: String,

        /// Longer description
        #[arg(long, short = 'd')]
        description: Option<String>,

        /// Destination status column (default: BACKLOG)
        #[arg(long, short = 's')]
        status: Option<String>,

        /// Priority (LOW, MED, HIGH, URGENT)
        #[arg(long, short = 'p')]
        priority: Option<String>,

        /// Owner of the item (e.g., "sam")
        #[arg(long, short = 'o')]
        owner: Option<String>,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,

        /// Effort estimate in hours
        #[arg(long)]
        estimate: Option<f64>,

        /// Sprint to commit the item to
        #[arg(long)]
        sprint: Option<i64>,

        /// Milestone the item rolls up into
        #[arg(long)]
        milestone: Option<i64>,

        /// Make the item visible to client users
        #[arg(long)]
        client_visible: bool,
    },

    /// Move a work item to a status column position
    #[command(after_help = "Examples:\n  \
        wp move acme-a1b2 DONE 0          Move to the top of DONE\n  \
        wp move acme-a1b2 PLANNED 3       Move to position 3 in PLANNED\n\n\
        Any status may follow any other; only the position is validated.")]
    Move {
        /// Work item ID
        id: String,

        /// Destination status column
        status: String,

        /// Zero-based position among the other items in that column
        index: usize,
    },

    /// Show the kanban board
    Board {
        /// Only show items committed to this sprint
        #[arg(long)]
        sprint: Option<i64>,

        /// Output format
        #[arg(long, short = 'f', value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List work items
    List {
        /// Filter by status column
        #[arg(long, short = 's')]
        status: Option<String>,

        /// Output format
        #[arg(long, short = 'f', value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show work-item details and comment threads
    Show {
        /// Work item ID
        id: String,

        /// Highlight a specific comment in the thread view
        #[arg(long)]
        comment: Option<i64>,

        /// Output format
        #[arg(long, short = 'f', value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Edit a work item's fields
    Edit {
        /// Work item ID
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// New priority (LOW, MED, HIGH, URGENT)
        #[arg(long, short = 'p')]
        priority: Option<String>,

        /// New owner
        #[arg(long, short = 'o')]
        owner: Option<String>,

        /// New due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,

        /// New effort estimate in hours
        #[arg(long)]
        estimate: Option<f64>,

        /// Commit to a sprint
        #[arg(long, conflicts_with = "no_sprint")]
        sprint: Option<i64>,

        /// Remove the sprint assignment
        #[arg(long)]
        no_sprint: bool,

        /// Roll up into a milestone
        #[arg(long, conflicts_with = "no_milestone")]
        milestone: Option<i64>,

        /// Remove the milestone assignment
        #[arg(long)]
        no_milestone: bool,

        /// Set client visibility (true/false)
        #[arg(long)]
        client_visible: Option<bool>,
    },

    /// Delete a work item (and its comments and tasks)
    Delete {
        /// Work item ID
        id: String,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // Planning
    // ─────────────────────────────────────────────────────────────────────────
    /// Manage sprints (fixed two-week windows)
    Sprint {
        #[command(subcommand)]
        command: SprintCommand,
    },

    /// Manage milestones and approval gates
    Milestone {
        #[command(subcommand)]
        command: MilestoneCommand,
    },

    /// Show completion progress for a scope
    #[command(after_help = "Examples:\n  \
        wp progress                 Whole project\n  \
        wp progress --sprint 2      One sprint (items + time elapsed)\n  \
        wp progress --milestone 1   One milestone")]
    Progress {
        /// Progress of one sprint
        #[arg(long, conflicts_with = "milestone")]
        sprint: Option<i64>,

        /// Progress of one milestone
        #[arg(long)]
        milestone: Option<i64>,

        /// Output format
        #[arg(long, short = 'f', value_enum, default_value = "text")]
        format: OutputFormat,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // Collaboration
    // ─────────────────────────────────────────────────────────────────────────
    /// Comment on a work item, optionally as a reply
    #[command(after_help = "Examples:\n  \
        wp comment acme-a1b2 \"Looks good\" -a sam        New thread\n  \
        wp comment acme-a1b2 \"Agreed\" -a alex -r 3      Reply to comment 3")]
    Comment {
        /// Work item ID
        id: String,

        /// Comment content
        content: String,

        /// Author of the comment
        #[arg(long, short = 'a', default_value = "me")]
        author: String,

        /// Reply to an existing comment on the same item
        #[arg(long, short = 'r')]
        reply_to: Option<i64>,
    },

    /// Submit and triage change requests (one per week)
    Request {
        #[command(subcommand)]
        command: RequestCommand,
    },

    /// Manage sub-tasks of a work item
    Task {
        #[command(subcommand)]
        command: TaskCommand,
    },

    /// View the activity log
    Log {
        /// Only show events for this work item
        id: Option<String>,

        /// Maximum number of events to show
        #[arg(long, short = 'n', default_value_t = 20)]
        limit: usize,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // Setup
    // ─────────────────────────────────────────────────────────────────────────
    /// Initialize a portal workspace
    Init {
        /// Project prefix for work-item IDs (2+ lowercase alphanumeric)
        #[arg(long)]
        prefix: String,

        /// Directory to initialize (default: current directory)
        #[arg(long)]
        path: Option<std::path::PathBuf>,
    },

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum SprintCommand {
    /// Create a sprint; the end date is always start + 14 days
    New {
        /// Sprint name
        name: String,

        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: String,
    },

    /// List sprints with time and item progress
    List {
        /// Output format
        #[arg(long, short = 'f', value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Subcommand)]
pub enum MilestoneCommand {
    /// Create a milestone
    New {
        /// Milestone title
        title: String,

        /// Require client sign-off before delivery
        #[arg(long)]
        requires_approval: bool,
    },

    /// List milestones with derived progress
    List {
        /// Output format
        #[arg(long, short = 'f', value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Record client approval of a milestone
    Approve {
        /// Milestone ID
        id: i64,

        /// Notes attached to the decision
        #[arg(long)]
        notes: Option<String>,
    },

    /// Record a client request for changes
    RequestChanges {
        /// Milestone ID
        id: i64,

        /// Notes attached to the decision
        #[arg(long)]
        notes: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum RequestCommand {
    /// Submit a change request (limited to one per calendar week)
    New {
        /// Summary of the requested change
        title: String,

        /// Author of the request
        #[arg(long, short = 'a', default_value = "me")]
        author: String,

        /// Estimated effort in hours
        #[arg(long)]
        hours: Option<f64>,

        /// Notes accompanying the estimate
        #[arg(long)]
        notes: Option<String>,
    },

    /// List change requests
    List {
        /// Output format
        #[arg(long, short = 'f', value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Check whether a submission is currently allowed
    Status,

    /// Approve a change request
    Approve {
        /// Change request ID
        id: i64,
    },

    /// Decline a change request
    Decline {
        /// Change request ID
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum TaskCommand {
    /// Add a sub-task to a work item
    Add {
        /// Work item ID
        id: String,

        /// Task title
        title: String,
    },

    /// List a work item's tasks
    List {
        /// Work item ID
        id: String,
    },

    /// Move a task to another status
    Move {
        /// Task ID
        task_id: i64,

        /// Destination status
        status: String,
    },
}
