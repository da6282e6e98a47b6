use crate::errors::{AppError, AppResult};
use crate::models::Theme;
use crate::utils::path::expand_tilde;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

pub mod migrate; // use submodule at src/config/migrate.rs

pub const ENV_GRAPHQL_URL: &str = "DAILY_TASKS_GRAPHQL_URL";
pub const ENV_ADMIN_SECRET: &str = "DAILY_TASKS_ADMIN_SECRET";

/// Where tasks, categories and sessions live.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Hosted GraphQL endpoint
    #[default]
    Graphql,
    /// The local SQLite file (offline)
    Local,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default)]
    pub backend: BackendKind,
    #[serde(default)]
    pub graphql_url: String,
    #[serde(default)]
    pub admin_secret: String,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_day_offset")]
    pub day_offset_hours: i64,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

fn default_timeout() -> u64 {
    10
}
fn default_day_offset() -> i64 {
    5
}

impl Default for Config {
    fn default() -> Self {
        let db_path = Self::database_file();
        Self {
            database: db_path.to_string_lossy().to_string(),
            backend: BackendKind::default(),
            graphql_url: String::new(),
            admin_secret: String::new(),
            request_timeout_secs: default_timeout(),
            day_offset_hours: default_day_offset(),
            theme: Theme::default(),
            user_id: None,
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("daily-tasks")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".daily-tasks")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("daily-tasks.conf")
    }

    /// Return the full path of the local SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("daily-tasks.sqlite")
    }

    /// Load configuration from file (defaults if not found),
    /// then apply environment overrides.
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        let mut cfg = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_yaml::from_str(&content)?
        } else {
            Config::default()
        };

        cfg.apply_env();
        Ok(cfg)
    }

    fn apply_env(&mut self) {
        if let Ok(url) = env::var(ENV_GRAPHQL_URL)
            && !url.trim().is_empty()
        {
            self.graphql_url = url;
        }
        if let Ok(secret) = env::var(ENV_ADMIN_SECRET)
            && !secret.trim().is_empty()
        {
            self.admin_secret = secret;
        }
    }

    /// Local database path with `~` expanded.
    pub fn database_path(&self) -> PathBuf {
        expand_tilde(&self.database)
    }

    /// Write the configuration file, creating the directory if needed.
    pub fn save(&self) -> AppResult<()> {
        fs::create_dir_all(Self::config_dir())?;
        let yaml = serde_yaml::to_string(self)?;
        fs::write(Self::config_file(), yaml)?;
        Ok(())
    }

    /// The GraphQL endpoint, or an error telling how to set it.
    pub fn require_graphql_url(&self) -> AppResult<&str> {
        if self.graphql_url.trim().is_empty() {
            return Err(AppError::Config(format!(
                "graphql_url is not set (edit the config file or export {ENV_GRAPHQL_URL})"
            )));
        }
        Ok(&self.graphql_url)
    }

    /// Initialize configuration file and database location.
    /// Returns the configuration that was written (or would have been, in test mode).
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_db {
            let p = expand_tilde(&name);
            if p.is_absolute() { p } else { dir.join(p) }
        } else {
            Self::database_file()
        };

        // Keep settings from an existing file, only the database moves
        let mut config = if Self::config_file().exists() {
            Self::load()?
        } else {
            let mut c = Config::default();
            c.apply_env();
            c
        };
        config.database = db_path.to_string_lossy().to_string();

        if !is_test {
            config.save()?;
        }

        Ok(config)
    }
}
