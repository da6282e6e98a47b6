//! daily-tasks library root.
//! Exposes the CLI parser, the high-level run() function and the internal modules.

pub mod backend;
pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(cli, cfg),
        Commands::User { .. } => cli::commands::user::handle(cli, cfg),
        Commands::Category { .. } => cli::commands::category::handle(&cli.command, cfg),
        Commands::Task { .. } => cli::commands::task::handle(&cli.command, cfg),
        Commands::Start { .. }
        | Commands::Stop
        | Commands::Status { .. }
        | Commands::Resolve { .. } => cli::commands::timer::handle(&cli.command, cfg),
        Commands::Chart { .. } | Commands::Totals => {
            cli::commands::chart::handle(&cli.command, cfg)
        }
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // config is loaded once, then the global flags override it
    let mut cfg = Config::load()?;
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }
    if let Some(backend) = cli.backend {
        cfg.backend = backend;
    }
    if let Some(user) = &cli.user {
        cfg.user_id = Some(user.clone());
    }

    dispatch(&cli, &cfg)
}
