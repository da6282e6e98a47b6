//! Task list and timer views.

use crate::core::coordinator::TimerStatus;
use crate::models::{Task, Theme};
use crate::utils::colors::{
    RESET, YELLOW, accent_for_theme, colorize_duration, decorate_task, swatch,
};
use crate::utils::formatting::{bold, truncate};
use crate::utils::table::{Column, Table};
use crate::utils::{format_clock, format_task_time};

/// Short id shown in lists; any unique prefix is accepted back.
pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

fn task_rgb(task: &Task) -> Option<(u8, u8, u8)> {
    task.category.as_ref().and_then(|c| c.rgb())
}

/// The active list: visible tasks, marker on the running one.
pub fn render_task_list(tasks: &[&Task], running: Option<&str>, today: &str, theme: Theme) -> String {
    if tasks.is_empty() {
        return "No tasks yet. Add one with `dtasks task add`.\n".to_string();
    }

    let mut table = Table::new(vec![
        Column::left(""),
        Column::left("Id"),
        Column::left("Task"),
        Column::left("Category"),
        Column::right("Time"),
        Column::left("Date"),
    ]);

    for t in tasks {
        let is_running = running == Some(t.id.as_str());
        let marker = if is_running {
            format!("{YELLOW}▶{RESET}")
        } else if t.strikethrough {
            "✔".to_string()
        } else {
            " ".to_string()
        };

        let text = format!("{} {}", t.emoji, truncate(&t.description, 40));
        let category = format!("{}●{} {}", swatch(task_rgb(t), theme), RESET, t.category_name());
        let date = if t.date == today {
            t.date.clone()
        } else {
            format!("{YELLOW}{}{RESET}", t.date)
        };

        table.add_row(vec![
            marker,
            short_id(&t.id).to_string(),
            decorate_task(&text, t.strikethrough),
            category,
            colorize_duration(&format_task_time(t.milliseconds)),
            date,
        ]);
    }

    table.render()
}

/// The running clock block.
pub fn render_timer(status: &TimerStatus, theme: Theme) -> String {
    let accent = accent_for_theme(theme);
    match &status.task {
        Some(task) => {
            let mut out = format!(
                "{accent}⏱  {}{RESET}  {} {}\n",
                bold(&format_clock(status.elapsed_ms)),
                task.emoji,
                task.description
            );
            if status.stale {
                out.push_str(&format!(
                    "{YELLOW}⚠️  This task is from {} (today is {}). Run `dtasks resolve` to update it with the elapsed time.{RESET}\n",
                    task.date, status.today
                ));
            }
            out
        }
        None => format!("{accent}⏱  {}{RESET}  no task running\n", format_clock(0)),
    }
}
