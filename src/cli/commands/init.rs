use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

/// Handle the `init` command
///
/// Creates the config directory and file (skipped in test mode), then opens
/// the local database, which applies any pending migration.
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.clone(), cli.test)?;
    let db_path = cfg.database_path();

    println!("⚙️  Initializing daily-tasks…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Database   : {}", db_path.display());
    println!("🌐 Backend    : {:?}", cfg.backend);

    let pool = DbPool::new(&db_path)?;
    success(format!("Database initialized at {}", db_path.display()));

    if let Err(e) = ttlog(
        &pool.conn,
        "init",
        "database",
        &format!("Database initialized at {}", db_path.display()),
    ) {
        warning(format!("Failed to write internal log: {e}"));
    }

    if cfg.graphql_url.trim().is_empty() && cfg.backend == crate::config::BackendKind::Graphql {
        warning("graphql_url is empty: set it with `dtasks config --edit` or use --backend local");
    }
    Ok(())
}
