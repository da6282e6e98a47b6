use serde::{Deserialize, Serialize};

/// Name used when a task references a category that no longer exists.
pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub color: String, // "#rrggbb"
}

/// The category fields embedded in a fetched task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub name: String,
    pub color: String,
}

impl Category {
    /// Accepts `#rrggbb` (the `#` is optional, hex digits in any case).
    pub fn is_valid_color(color: &str) -> bool {
        let hex = color.strip_prefix('#').unwrap_or(color);
        hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit())
    }

    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        parse_hex_color(&self.color)
    }
}

impl CategoryRef {
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        parse_hex_color(&self.color)
    }
}

/// `#rrggbb` → (r, g, b)
pub fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    if !Category::is_valid_color(color) {
        return None;
    }
    let hex = color.trim_start_matches('#');
    let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
    let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
    let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
    Some((r, g, b))
}
