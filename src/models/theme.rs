use serde::{Deserialize, Serialize};

/// Output palette persisted in the config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Helper: convert input from CLI (any case)
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "light" | "l" => Some(Theme::Light),
            "dark" | "d" => Some(Theme::Dark),
            _ => None,
        }
    }
}
