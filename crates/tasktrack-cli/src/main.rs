mod commands;
mod session;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tasktrack_store::layout;
use tracing::warn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::session::Session;

#[derive(Parser)]
#[command(name = "tasktrack", about = "Personal command-line task tracker", version)]
struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Log filter for diagnostics on stderr (e.g. "debug", "tasktrack_store=trace")
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Storage root (defaults to $TASKTRACK_HOME, then ~/.task-tracker-cli)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new active task
    #[command(visible_alias = "add")]
    Create {
        /// Task description (remaining words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        description: Vec<String>,
    },

    /// List tasks with the given status
    #[command(visible_alias = "ls")]
    List {
        /// Status to show: active, done or inactive
        #[arg(default_value = "active")]
        status: String,
    },

    /// Change the status of a task
    Mark {
        /// Task id
        id: String,

        /// New status: active, done or inactive
        status: String,
    },

    /// Show a single task
    Show {
        /// Task id
        id: String,
    },

    /// Rebuild the id pool from the task files on disk
    Reindex,
}

fn init_logging(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let root = layout::resolve_root(cli.root.as_deref())?;
    let mut session = Session::open(&root)?;

    let outcome = match cli.command {
        Commands::Create { description } => {
            commands::create::run(&mut session, description, cli.json)
        }
        Commands::List { status } => commands::list::run(&session, status, cli.json),
        Commands::Mark { id, status } => commands::mark::run(&session, id, status, cli.json),
        Commands::Show { id } => commands::show::run(&session, id, cli.json),
        Commands::Reindex => commands::reindex::run(&mut session, cli.json),
    };

    // The pool is written back even when the command failed.
    let saved = session.finish();
    match (outcome, saved) {
        (Err(e), Err(save_err)) => {
            warn!(error = %save_err, "failed to persist id pool");
            Err(e)
        }
        (outcome, saved) => outcome.and(saved),
    }
}

fn main() {
    // Usage errors share exit code 1 with every other failure; help and
    // version output still exit 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };
    init_logging(&cli.log_level);

    if let Err(e) = run(cli) {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}
