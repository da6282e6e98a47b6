//! Blocking HTTP transport for the GraphQL endpoint.

use super::operations::{self, GraphqlRequest};
use super::response::{decode, decode_first};
use crate::backend::Backend;
use crate::config::Config;
use crate::errors::{AppError, AppResult, RemoteErrorKind};
use crate::models::{Category, NewTask, Session, SessionPatch, Task, TaskPatch, User};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;

const ADMIN_SECRET_HEADER: &str = "x-hasura-admin-secret";

pub struct GraphqlBackend {
    client: Client,
    url: String,
    admin_secret: String,
}

#[derive(Debug, Deserialize)]
struct IdOnly {
    id: String,
}

#[derive(Debug, Deserialize)]
struct MillisOnly {
    milliseconds: i64,
}

impl GraphqlBackend {
    pub fn new(url: &str, admin_secret: &str, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: url.to_string(),
            admin_secret: admin_secret.to_string(),
        })
    }

    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        let url = cfg.require_graphql_url()?;
        Self::new(
            url,
            &cfg.admin_secret,
            Duration::from_secs(cfg.request_timeout_secs.max(1)),
        )
    }

    /// POST one request and return the raw body.
    /// Non-2xx statuses become typed errors before the body is decoded.
    pub fn execute(&self, request: &GraphqlRequest) -> AppResult<String> {
        let response = self
            .client
            .post(&self.url)
            .header(ADMIN_SECRET_HEADER, &self.admin_secret)
            .json(request)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let kind = match status.as_u16() {
                401 | 403 => RemoteErrorKind::Unauthorized,
                404 => RemoteErrorKind::NotFound,
                400 | 422 => RemoteErrorKind::Validation,
                _ => RemoteErrorKind::Server,
            };
            let body = response.text().unwrap_or_default();
            return Err(AppError::remote(
                kind,
                format!("{} returned HTTP {status}: {body}", request.operation_name),
            ));
        }

        Ok(response.text()?)
    }
}

impl Backend for GraphqlBackend {
    fn fetch_tasks(&self, user_id: &str) -> AppResult<Vec<Task>> {
        let body = self.execute(&operations::fetch_tasks(user_id))?;
        decode(&body, "tasks")
    }

    fn create_task(&self, task: &NewTask) -> AppResult<Task> {
        let body = self.execute(&operations::create_task(task))?;
        decode(&body, "insert_tasks_one")
    }

    fn find_task_millis(&self, id: &str) -> AppResult<i64> {
        let body = self.execute(&operations::find_task(id))?;
        decode_first::<MillisOnly>(&body, "tasks")?
            .map(|t| t.milliseconds)
            .ok_or_else(|| AppError::remote(RemoteErrorKind::NotFound, format!("task {id}")))
    }

    fn update_task(&self, id: &str, patch: &TaskPatch) -> AppResult<Task> {
        let body = self.execute(&operations::update_task(id, patch))?;
        decode(&body, "update_tasks_by_pk")
    }

    fn delete_task(&self, id: &str) -> AppResult<String> {
        let body = self.execute(&operations::delete_task(id))?;
        decode::<IdOnly>(&body, "delete_tasks_by_pk").map(|r| r.id)
    }

    fn fetch_categories(&self) -> AppResult<Vec<Category>> {
        let body = self.execute(&operations::fetch_categories())?;
        decode(&body, "categories")
    }

    fn create_category(&self, name: &str, color: &str) -> AppResult<Category> {
        let body = self.execute(&operations::create_category(name, color))?;
        decode(&body, "insert_categories_one")
    }

    fn delete_category(&self, id: &str) -> AppResult<Category> {
        let body = self.execute(&operations::delete_category(id))?;
        decode(&body, "delete_categories_by_pk")
    }

    fn create_user(&self) -> AppResult<User> {
        let body = self.execute(&operations::create_user())?;
        decode(&body, "insert_users_one")
    }

    fn fetch_session(&self, user_id: &str) -> AppResult<Option<Session>> {
        let body = self.execute(&operations::fetch_session(user_id))?;
        decode_first(&body, "session")
    }

    fn create_session(&self, user_id: &str, patch: &SessionPatch) -> AppResult<Session> {
        let body = self.execute(&operations::create_session(user_id, patch))?;
        decode(&body, "insert_session_one")
    }

    fn update_session(&self, id: &str, patch: &SessionPatch) -> AppResult<Session> {
        let body = self.execute(&operations::update_session(id, patch))?;
        decode(&body, "update_session_by_pk")
    }

    fn name(&self) -> &'static str {
        "graphql"
    }
}
