pub mod colors;
pub mod date;
pub mod formatting;
pub mod path;
pub mod table;
pub mod time;

// Re-export the helpers used by most commands
pub use formatting::pad_right;
pub use time::{format_clock, format_hhmm, format_task_time};
