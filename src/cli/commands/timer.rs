//! `start`, `stop`, `status` and `resolve`.

use crate::cli::context::AppContext;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::coordinator::Switched;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use crate::ui::prompt::confirm;
use crate::ui::views::render_timer;
use crate::utils::colors::{RESET, YELLOW, accent_for_theme};
use crate::utils::{format_clock, format_task_time};
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let ctx = AppContext::open(cfg)?;

    match cmd {
        Commands::Start { task } => start(&ctx, task),
        Commands::Stop => stop(&ctx),
        Commands::Status { watch } => status(&ctx, *watch),
        Commands::Resolve { yes } => resolve(&ctx, *yes),
        _ => Ok(()),
    }
}

fn start(ctx: &AppContext, key: &str) -> AppResult<()> {
    let mut dash = ctx.dashboard()?;
    let task = dash.store.find_task(key)?.clone();
    if !task.is_visible {
        return Err(AppError::Validation(format!(
            "task '{}' is from {} and no longer on the list",
            task.description, task.date
        )));
    }

    match dash.coordinator.switch_task(task.clone())? {
        Switched::AlreadyRunning => {
            info(format!("'{}' is already running", task.description));
        }
        Switched::Started { flushed } => {
            if let Some(prev) = flushed {
                ctx.log(
                    "stop",
                    &prev.id,
                    &format!("{} => {}", prev.description, format_task_time(prev.milliseconds)),
                );
                info(format!(
                    "Saved '{}': {}",
                    prev.description,
                    format_task_time(prev.milliseconds)
                ));
            }
            ctx.log("start", &task.id, &task.description);
            success(format!("Started {} {}", task.emoji, task.description));
        }
    }
    Ok(())
}

fn stop(ctx: &AppContext) -> AppResult<()> {
    let mut dash = ctx.dashboard()?;
    let Some(task) = dash.coordinator.stop()? else {
        ctx.log("stop", "", "running task no longer exists; session cleared");
        warning("The running task no longer exists; the timer was stopped without saving.");
        return Ok(());
    };

    ctx.log(
        "stop",
        &task.id,
        &format!("{} => {}", task.description, format_task_time(task.milliseconds)),
    );
    success(format!(
        "Stopped '{}': {}",
        task.description,
        format_task_time(task.milliseconds)
    ));
    Ok(())
}

fn status(ctx: &AppContext, watch: bool) -> AppResult<()> {
    let dash = ctx.dashboard()?;
    let theme = ctx.cfg.theme;

    if !watch {
        print!("{}", render_timer(&dash.coordinator.status()?, theme));
        return Ok(());
    }

    let accent = accent_for_theme(theme);
    let mut out = io::stdout();
    loop {
        // elapsed is recomputed from the stored start on every tick
        let st = dash.coordinator.status()?;
        let label = match &st.task {
            Some(t) if st.stale => format!("{} {} {YELLOW}(stale){RESET}", t.emoji, t.description),
            Some(t) => format!("{} {}", t.emoji, t.description),
            None => "no task running".to_string(),
        };
        write!(
            out,
            "\r{accent}⏱  {}{RESET}  {label}\x1b[K",
            format_clock(st.elapsed_ms)
        )?;
        out.flush()?;
        thread::sleep(Duration::from_secs(1));
    }
}

fn resolve(ctx: &AppContext, yes: bool) -> AppResult<()> {
    let mut dash = ctx.dashboard()?;
    if !dash.coordinator.is_stale()? {
        return Err(AppError::NotStale);
    }

    let st = dash.coordinator.status()?;
    if let Some(task) = &st.task {
        let prompt = format!(
            "'{}' has been running since {} ({}). Add this time to the task?",
            task.description,
            task.date,
            format_task_time(st.elapsed_ms)
        );
        if !yes && !confirm(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }
    }

    let Some(task) = dash.coordinator.resolve_stale()? else {
        ctx.log("resolve", "", "running task no longer exists; session cleared");
        warning("The running task no longer exists; the timer was cleared without saving.");
        return Ok(());
    };
    ctx.log(
        "resolve",
        &task.id,
        &format!("{} => {}", task.description, format_task_time(task.milliseconds)),
    );
    success(format!(
        "Resolved '{}': {}",
        task.description,
        format_task_time(task.milliseconds)
    ));
    Ok(())
}
