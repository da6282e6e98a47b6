//! `Backend` implementation over the local SQLite file.

use crate::backend::Backend;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::{Category, NewTask, Session, SessionPatch, Task, TaskPatch, User};
use std::path::Path;

pub struct LocalBackend {
    pool: DbPool,
}

impl LocalBackend {
    pub fn open(path: &Path) -> AppResult<Self> {
        Ok(Self {
            pool: DbPool::new(path)?,
        })
    }

    pub fn in_memory() -> AppResult<Self> {
        Ok(Self {
            pool: DbPool::in_memory()?,
        })
    }
}

impl Backend for LocalBackend {
    fn fetch_tasks(&self, user_id: &str) -> AppResult<Vec<Task>> {
        queries::load_tasks_by_user(&self.pool.conn, user_id)
    }

    fn create_task(&self, task: &NewTask) -> AppResult<Task> {
        queries::insert_task(&self.pool.conn, task)
    }

    fn find_task_millis(&self, id: &str) -> AppResult<i64> {
        queries::load_task(&self.pool.conn, id)?
            .map(|t| t.milliseconds)
            .ok_or_else(|| AppError::NotFound(format!("task {id}")))
    }

    fn update_task(&self, id: &str, patch: &TaskPatch) -> AppResult<Task> {
        queries::update_task(&self.pool.conn, id, patch)
    }

    fn delete_task(&self, id: &str) -> AppResult<String> {
        queries::delete_task(&self.pool.conn, id)
    }

    fn fetch_categories(&self) -> AppResult<Vec<Category>> {
        queries::load_categories(&self.pool.conn)
    }

    fn create_category(&self, name: &str, color: &str) -> AppResult<Category> {
        queries::insert_category(&self.pool.conn, name, color)
    }

    fn delete_category(&self, id: &str) -> AppResult<Category> {
        queries::delete_category(&self.pool.conn, id)
    }

    fn create_user(&self) -> AppResult<User> {
        queries::insert_user(&self.pool.conn)
    }

    fn fetch_session(&self, user_id: &str) -> AppResult<Option<Session>> {
        queries::load_session(&self.pool.conn, user_id)
    }

    fn create_session(&self, user_id: &str, patch: &SessionPatch) -> AppResult<Session> {
        queries::insert_session(&self.pool.conn, user_id, patch)
    }

    fn update_session(&self, id: &str, patch: &SessionPatch) -> AppResult<Session> {
        queries::update_session(&self.pool.conn, id, patch)
    }

    fn name(&self) -> &'static str {
        "local"
    }
}
