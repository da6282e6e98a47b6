//! Unified application error type.
//! All modules (db, backend, core, cli, utils) return AppError to keep the
//! error handling consistent and easy to manage.

use std::fmt;
use std::io;
use thiserror::Error;

/// Classification of a failed remote operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteErrorKind {
    /// The endpoint could not be reached (DNS, connect, timeout).
    Unreachable,
    /// The admin secret was rejected.
    Unauthorized,
    /// The server answered with an error not covered by other kinds.
    Server,
    /// The request violated a constraint or the schema.
    Validation,
    /// The addressed record does not exist.
    NotFound,
    /// The response could not be read as the expected shape.
    Malformed,
}

impl fmt::Display for RemoteErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RemoteErrorKind::Unreachable => "server unreachable",
            RemoteErrorKind::Unauthorized => "unauthorized",
            RemoteErrorKind::Server => "server error",
            RemoteErrorKind::Validation => "validation failed",
            RemoteErrorKind::NotFound => "not found",
            RemoteErrorKind::Malformed => "malformed response",
        };
        f.write_str(s)
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Local database
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Remote backend
    // ---------------------------
    #[error("Remote error ({kind}): {message}")]
    Remote {
        kind: RemoteErrorKind,
        message: String,
    },

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Input / validation
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid value: {0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("No user selected: pass --user <id> or run `dtasks user create`")]
    NoUser,

    // ---------------------------
    // Timer state
    // ---------------------------
    #[error("No task is running")]
    NotRunning,

    #[error("The running task is not stale; nothing to resolve")]
    NotStale,

    #[error("The running task '{0}' belongs to a previous day; run `dtasks resolve` first")]
    StaleTask(String),

    #[error("Task '{0}' is running; stop it first")]
    TaskRunning(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),
}

impl AppError {
    pub fn remote(kind: RemoteErrorKind, message: impl Into<String>) -> Self {
        AppError::Remote {
            kind,
            message: message.into(),
        }
    }

    /// The addressed record does not exist, locally or on the server.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AppError::NotFound(_)
                | AppError::Remote {
                    kind: RemoteErrorKind::NotFound,
                    ..
                }
        )
    }

    /// Kind of a remote failure, if this error came from the backend.
    pub fn remote_kind(&self) -> Option<RemoteErrorKind> {
        match self {
            AppError::Remote { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        let kind = if e.is_connect() || e.is_timeout() {
            RemoteErrorKind::Unreachable
        } else if e.is_decode() {
            RemoteErrorKind::Malformed
        } else if let Some(status) = e.status() {
            if status.as_u16() == 401 || status.as_u16() == 403 {
                RemoteErrorKind::Unauthorized
            } else {
                RemoteErrorKind::Server
            }
        } else {
            RemoteErrorKind::Unreachable
        };
        AppError::remote(kind, e.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(e: csv::Error) -> Self {
        AppError::Export(e.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
