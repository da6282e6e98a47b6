//! Duration helpers: everything is stored in milliseconds and shown in
//! hours/minutes.

use crate::errors::{AppError, AppResult};

pub const MS_PER_SECOND: i64 = 1000;
pub const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;

/// `5_400_000` → `"01hr 30min"`
pub fn format_task_time(ms: i64) -> String {
    let total_minutes = ms.max(0) / MS_PER_MINUTE;
    format!("{:02}hr {:02}min", total_minutes / 60, total_minutes % 60)
}

/// `5_400_000` → `"01:30"`
pub fn format_hhmm(ms: i64) -> String {
    let ms = ms.max(0);
    format!(
        "{:02}:{:02}",
        ms / MS_PER_HOUR,
        (ms % MS_PER_HOUR) / MS_PER_MINUTE
    )
}

/// Running clock display: `"HH:MM:SS"`.
pub fn format_clock(ms: i64) -> String {
    let secs = ms.max(0) / MS_PER_SECOND;
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// Milliseconds to hours, rounded to 2 decimals.
pub fn ms_to_hours(ms: i64) -> f64 {
    (ms as f64 / MS_PER_HOUR as f64 * 100.0).round() / 100.0
}

pub fn minutes_to_ms(minutes: i64) -> AppResult<i64> {
    minutes
        .checked_mul(MS_PER_MINUTE)
        .ok_or_else(|| AppError::Validation(format!("{minutes} minutes is out of range")))
}
