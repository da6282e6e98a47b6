/// ANSI color helper utilities for terminal output.
use crate::models::Theme;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const WHITE: &str = "\x1b[37m";
pub const BLACK: &str = "\x1b[30m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";

/// Foreground used for regular text in the given theme.
pub fn text_for_theme(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => BLACK,
        Theme::Dark => WHITE,
    }
}

/// Accent used for headers and the running clock.
pub fn accent_for_theme(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => BLUE,
        Theme::Dark => CYAN,
    }
}

/// 24-bit foreground escape for a category color.
/// Falls back to the theme text color when the color cannot be parsed.
pub fn swatch(rgb: Option<(u8, u8, u8)>, theme: Theme) -> String {
    match rgb {
        Some((r, g, b)) => format!("\x1b[38;2;{r};{g};{b}m"),
        None => text_for_theme(theme).to_string(),
    }
}

/// Strike through and grey out a done task.
pub fn decorate_task(text: &str, done: bool) -> String {
    if done {
        format!("\x1b[9m{GREY}{text}{RESET}")
    } else {
        text.to_string()
    }
}

/// Returns GREY for an empty duration, RESET otherwise.
pub fn colorize_duration(value: &str) -> String {
    if value.trim() == "00hr 00min" || value.trim() == "00:00" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
