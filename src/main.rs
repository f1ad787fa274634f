mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, LevelFilter};

use cli::{Cli, Command};
use task_cli::store::Store;
use task_cli::{ops, output, paths};

const LOG_ENV: &str = "TASK_CLI_LOG";

fn setup_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_env(LOG_ENV)
        .format_timestamp_secs()
        .init();
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let path = paths::resolve_task_file(cli.file).context("failed to resolve task file path")?;
    let store = Store::new(path);
    debug!("using task file {}", store.path().display());

    match cli.command {
        Command::Add { name } => {
            let task = ops::add_task(&store, &name)?;
            eprintln!("Task added successfully (ID: {})", task.id);
        }

        Command::Update { id, name } => {
            ops::update_task(&store, id, Some(&name), None)?;
            eprintln!("Updated task {id}");
        }

        Command::Delete { id } => {
            ops::delete_task(&store, id)?;
            eprintln!("Deleted task {id}");
        }

        Command::MarkInProgress { id } => {
            ops::mark_in_progress(&store, id)?;
            eprintln!("Marked task {id} as in-progress");
        }

        Command::MarkDone { id } => {
            ops::mark_done(&store, id)?;
            eprintln!("Marked task {id} as done");
        }

        Command::List { status } => {
            let tasks = ops::list_tasks(&store, status)?;
            println!(
                "{}",
                output::to_json(&tasks).context("failed to render task list")?
            );
        }
    }

    Ok(())
}
