use crate::cli::context::AppContext;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::aggregate::{category_totals, group_by_date_and_category};
use crate::core::store::TaskStore;
use crate::errors::AppResult;
use crate::export::export_chart;
use crate::ui::chart::render_legend;
use crate::ui::messages::{header, info};
use crate::utils::format_hhmm;

const LEGEND_WIDTH: usize = 30;

/// `chart` and `totals`: both read the full task list, hidden tasks included
/// for the chart, visible ones only for the totals.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let ctx = AppContext::open(cfg)?;
    let store = TaskStore::load(ctx.backend(), ctx.user_id()?)?;

    match cmd {
        Commands::Chart {
            format,
            file,
            force,
        } => {
            let chart = group_by_date_and_category(store.tasks());
            export_chart(&chart, *format, file.as_deref(), *force)?;
        }
        Commands::Totals => {
            let totals = category_totals(store.tasks(), store.categories());
            if totals.is_empty() {
                info("No tasks on the list.");
                return Ok(());
            }
            header("Time per category");
            print!("{}", render_legend(&totals, cfg.theme, LEGEND_WIDTH));

            let sum: i64 = totals.iter().map(|t| t.milliseconds).sum();
            println!("Total: {}", format_hhmm(sum));
        }
        _ => {}
    }
    Ok(())
}
