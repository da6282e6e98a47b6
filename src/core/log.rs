use crate::db::log::{LogEntry, load_log};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::formatting::{display_width, truncate};
use ansi_term::Colour;

/// Colour of an operation name in the printed log.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "start" => Colour::Green,
        "stop" => Colour::Yellow,
        "resolve" => Colour::RGB(255, 153, 51), // orange
        "carry_over" => Colour::Cyan,
        "task_add" | "category_add" | "user_create" => Colour::Blue,
        "task_edit" | "task_done" => Colour::Yellow,
        "task_del" | "category_del" => Colour::Red,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

pub struct LogLogic;

impl LogLogic {
    /// Lines of the internal log, oldest first, `op (target)` limited to 60 columns.
    pub fn format_log(entries: &[LogEntry]) -> Vec<String> {
        let op_targets: Vec<String> = entries
            .iter()
            .map(|e| {
                let s = if e.target.is_empty() {
                    e.operation.clone()
                } else {
                    format!("{} ({})", e.operation, e.target)
                };
                truncate(&s, 60)
            })
            .collect();

        let op_w = op_targets.iter().map(|s| display_width(s)).max().unwrap_or(10);
        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(10);

        entries
            .iter()
            .zip(op_targets)
            .map(|(e, op_target)| {
                let color = color_for_operation(&e.operation);

                // only the operation word is coloured
                let colored = match op_target.split_once(' ') {
                    Some((op, rest)) => format!("{} {}", color.paint(op), rest),
                    None => color.paint(op_target.as_str()).to_string(),
                };
                let padding = " ".repeat(op_w.saturating_sub(display_width(&op_target)));

                format!(
                    "{:>id_w$}: {:<date_w$} | {}{} => {}",
                    e.id,
                    e.date,
                    colored,
                    padding,
                    e.message,
                    id_w = id_w,
                    date_w = date_w
                )
            })
            .collect()
    }

    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        let entries = load_log(&pool.conn)?;

        println!("📜 Internal log:\n");
        for line in Self::format_log(&entries) {
            println!("{line}");
        }
        Ok(())
    }
}
