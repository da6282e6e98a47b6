use super::task::Task;
use serde::{Deserialize, Serialize};

/// "What timer is running right now" for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub start_time: Option<i64>, // epoch ms
    pub end_of_day: Option<i64>, // epoch ms
    pub task_in_process: Option<Task>,
}

/// The writable part of a session. Every field is written; `None` stores null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionPatch {
    pub start_time: Option<i64>,
    pub end_of_day: Option<i64>,
    pub task_in_process: Option<Task>,
}

impl SessionPatch {
    pub fn cleared() -> Self {
        Self::default()
    }

    pub fn running(task: &Task, start_time: i64, end_of_day: i64) -> Self {
        Self {
            start_time: Some(start_time),
            end_of_day: Some(end_of_day),
            task_in_process: Some(task.clone()),
        }
    }
}
