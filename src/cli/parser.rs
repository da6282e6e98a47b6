use crate::config::BackendKind;
use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for daily-tasks
#[derive(Parser)]
#[command(
    name = "dtasks",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track daily tasks by category with a single running timer",
    long_about = None
)]
pub struct Cli {
    /// Override the local database path (log, offline backend)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override the configured backend
    #[arg(global = true, long = "backend", value_enum)]
    pub backend: Option<BackendKind>,

    /// User id to act as (defaults to the remembered user)
    #[arg(global = true, long = "user", short = 'u')]
    pub user: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration file and the local database
    Init,

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check the configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields with their defaults")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Editor to use with --edit")]
        editor: Option<String>,

        #[arg(long = "theme", help = "Set the output theme: light or dark")]
        theme: Option<String>,
    },

    /// Create or select the user whose tasks are shown
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Manage categories
    Category {
        #[command(subcommand)]
        action: CategoryAction,
    },

    /// Manage tasks
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },

    /// Start the timer on a task (stops and saves the running one)
    Start {
        /// Task id (or unique prefix)
        task: String,
    },

    /// Stop the timer and save the elapsed time
    Stop,

    /// Show the running timer
    Status {
        #[arg(long = "watch", short = 'w', help = "Keep refreshing every second")]
        watch: bool,
    },

    /// Save the time of a task left running on a previous day
    Resolve {
        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Hours per category per day
    Chart {
        #[arg(long, value_enum, default_value = "table")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE", help = "Write to FILE instead of stdout")]
        file: Option<String>,

        #[arg(long, short = 'f', help = "Overwrite FILE without asking")]
        force: bool,
    },

    /// Total time per category of the visible tasks
    Totals,

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}

#[derive(Subcommand)]
pub enum UserAction {
    /// Create a new user and remember it
    Create,
    /// Remember an existing user id
    Use { id: String },
    /// Show the current user id
    Show,
}

#[derive(Subcommand)]
pub enum CategoryAction {
    /// Add a category
    Add {
        name: String,
        #[arg(long, help = "Color as #rrggbb")]
        color: String,
    },
    /// List categories
    List,
    /// Delete a category (tasks keep referencing it)
    Del {
        /// Category id, id prefix or name
        category: String,
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task for today
    Add {
        description: String,
        #[arg(long)]
        emoji: String,
        #[arg(long, help = "Category id, id prefix or name")]
        category: String,
    },
    /// List tasks
    List {
        #[arg(long = "all", help = "Include hidden tasks from previous days")]
        all: bool,
    },
    /// Edit a task
    Edit {
        task: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        emoji: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long, help = "Replace the accumulated time (minutes)")]
        minutes: Option<i64>,
    },
    /// Toggle the done (strikethrough) flag
    Done { task: String },
    /// Delete a task
    Del {
        task: String,
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },
}
