use std::path::PathBuf;

use clap::{Parser, Subcommand};

use task_cli::model::Status;
use task_cli::paths::TASK_FILE_ENV;

#[derive(Parser)]
#[command(
    name = "task-cli",
    about = "Track what you need to do, what you are working on, and what is done",
    arg_required_else_help = true
)]
pub struct Cli {
    /// Path to the task file [default: ./task_list.json]
    #[arg(long, env = TASK_FILE_ENV, global = true)]
    pub file: Option<PathBuf>,

    /// Log store and operation details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Add a task
    Add {
        /// Task name
        name: String,
    },

    /// Rename a task
    Update {
        /// Task id
        id: u32,
        /// New name
        name: String,
    },

    /// Delete a task
    Delete {
        /// Task id
        id: u32,
    },

    /// Mark a task as in progress
    MarkInProgress {
        /// Task id
        id: u32,
    },

    /// Mark a task as done
    MarkDone {
        /// Task id
        id: u32,
    },

    /// List tasks as JSON
    List {
        /// Only tasks with this status (todo, in-progress, done)
        #[arg(value_parser = Status::parse)]
        status: Option<Status>,
    },
}
