//! Interactive yes/no questions on stdin.

use crate::ui::messages::warning;
use std::io::{self, BufRead, Write};

/// Show `prompt` as a warning and read an answer; anything but y/yes is a no.
pub fn confirm(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}
