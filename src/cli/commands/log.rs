use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;

/// `dtasks log`: the internal log is read from the local file even when
/// tasks live on the GraphQL backend.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Log { print } = cmd else {
        return Ok(());
    };

    if *print {
        let pool = DbPool::new(&cfg.database_path())?;
        LogLogic::print_log(&pool)?;
    } else {
        info("Nothing to do: pass --print to show the internal log.");
    }
    Ok(())
}
