//! Remote access layer: the fixed set of operations the application needs
//! from its store, behind one trait with a hosted and a local implementation.

pub mod graphql;

use crate::config::{BackendKind, Config};
use crate::db::local::LocalBackend;
use crate::errors::AppResult;
use crate::models::{Category, NewTask, Session, SessionPatch, Task, TaskPatch, User};
use graphql::GraphqlBackend;

/// Every call is a single request/response. No retry, no caching: callers
/// refetch after mutations and must handle every error.
pub trait Backend {
    fn fetch_tasks(&self, user_id: &str) -> AppResult<Vec<Task>>;
    fn create_task(&self, task: &NewTask) -> AppResult<Task>;
    /// Stored accumulated milliseconds of one task.
    fn find_task_millis(&self, id: &str) -> AppResult<i64>;
    fn update_task(&self, id: &str, patch: &TaskPatch) -> AppResult<Task>;
    /// Returns the id of the deleted task.
    fn delete_task(&self, id: &str) -> AppResult<String>;

    fn fetch_categories(&self) -> AppResult<Vec<Category>>;
    fn create_category(&self, name: &str, color: &str) -> AppResult<Category>;
    fn delete_category(&self, id: &str) -> AppResult<Category>;

    fn create_user(&self) -> AppResult<User>;

    fn fetch_session(&self, user_id: &str) -> AppResult<Option<Session>>;
    fn create_session(&self, user_id: &str, patch: &SessionPatch) -> AppResult<Session>;
    fn update_session(&self, id: &str, patch: &SessionPatch) -> AppResult<Session>;

    /// Short label used in messages and the internal log.
    fn name(&self) -> &'static str;
}

/// Open the backend selected in the configuration.
pub fn open_backend(cfg: &Config) -> AppResult<Box<dyn Backend>> {
    match cfg.backend {
        BackendKind::Graphql => Ok(Box::new(GraphqlBackend::from_config(cfg)?)),
        BackendKind::Local => Ok(Box::new(LocalBackend::open(&cfg.database_path())?)),
    }
}
