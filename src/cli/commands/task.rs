use crate::cli::context::AppContext;
use crate::cli::parser::{Commands, TaskAction};
use crate::config::Config;
use crate::core::coordinator::SessionCoordinator;
use crate::core::store::TaskEdit;
use crate::errors::{AppError, AppResult};
use crate::models::Task;
use crate::ui::messages::{info, success};
use crate::ui::prompt::confirm;
use crate::ui::views::{render_task_list, render_timer, short_id};
use crate::utils::format_task_time;

/// Tasks cannot be changed while their timer runs.
fn ensure_not_running(coordinator: &SessionCoordinator<'_>, task: &Task) -> AppResult<()> {
    if coordinator.running_task_id() == Some(task.id.as_str()) {
        return Err(AppError::TaskRunning(task.description.clone()));
    }
    Ok(())
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Task { action } = cmd else {
        return Ok(());
    };

    let ctx = AppContext::open(cfg)?;
    let mut dash = ctx.dashboard()?;
    let today = dash.coordinator.today()?;

    match action {
        TaskAction::Add {
            description,
            emoji,
            category,
        } => {
            let task = dash.store.add_task(description, emoji, category, &today)?;
            ctx.log("task_add", &task.id, &task.description);
            success(format!(
                "Task '{}' added for {} ({})",
                task.description,
                today,
                short_id(&task.id)
            ));
        }

        TaskAction::List { all } => {
            print!("{}", render_timer(&dash.coordinator.status()?, cfg.theme));
            println!();

            let tasks: Vec<&Task> = if *all {
                dash.store.tasks().iter().collect()
            } else {
                dash.store.visible_tasks()
            };
            print!(
                "{}",
                render_task_list(
                    &tasks,
                    dash.coordinator.running_task_id(),
                    &today,
                    cfg.theme
                )
            );
        }

        TaskAction::Edit {
            task,
            description,
            emoji,
            category,
            minutes,
        } => {
            let found = dash.store.find_task(task)?.clone();
            ensure_not_running(&dash.coordinator, &found)?;

            let edit = TaskEdit {
                description: description.clone(),
                emoji: emoji.clone(),
                category_id: category.clone(),
                minutes: *minutes,
            };
            let updated = dash.store.edit_task(&found.id, &edit)?;
            ctx.log(
                "task_edit",
                &updated.id,
                &format!("{} ({})", updated.description, format_task_time(updated.milliseconds)),
            );
            success(format!(
                "Task '{}' updated: {}",
                updated.description,
                format_task_time(updated.milliseconds)
            ));
        }

        TaskAction::Done { task } => {
            let found = dash.store.find_task(task)?.clone();
            ensure_not_running(&dash.coordinator, &found)?;

            let updated = dash.store.toggle_strikethrough(&found.id)?;
            let state = if updated.strikethrough { "done" } else { "open" };
            ctx.log("task_done", &updated.id, state);
            success(format!("Task '{}' marked as {state}", updated.description));
        }

        TaskAction::Del { task, yes } => {
            let found = dash.store.find_task(task)?.clone();
            ensure_not_running(&dash.coordinator, &found)?;

            let prompt = format!(
                "Delete task '{}' ({})? This action is irreversible.",
                found.description,
                format_task_time(found.milliseconds)
            );
            if !*yes && !confirm(&prompt) {
                info("Operation cancelled.");
                return Ok(());
            }

            let deleted = dash.store.delete_task(&found.id)?;
            ctx.log("task_del", &deleted, &found.description);
            success(format!("Task '{}' deleted", found.description));
        }
    }

    Ok(())
}
