//! The fixed query/mutation documents and their variables.

use crate::models::{NewTask, SessionPatch, TaskPatch};
use serde::Serialize;
use serde_json::{Value, json};

/// POST body of one GraphQL call.
#[derive(Debug, Clone, Serialize)]
pub struct GraphqlRequest {
    #[serde(rename = "operationName")]
    pub operation_name: &'static str,
    pub query: &'static str,
    pub variables: Value,
}

impl GraphqlRequest {
    fn new(operation_name: &'static str, query: &'static str, variables: Value) -> Self {
        Self {
            operation_name,
            query,
            variables,
        }
    }
}

const TASKS_BY_USER: &str = r#"
query get_tasks_by_user($user_id: uuid!) {
  tasks(where: {user_id: {_eq: $user_id}}) {
    id
    category_id
    category {
      name
      color
    }
    user_id
    description
    emoji
    milliseconds
    date
    strikethrough
    is_visible
  }
}"#;

const INSERT_TASK: &str = r#"
mutation insert_single_task($object: tasks_insert_input!) {
  insert_tasks_one(object: $object) {
    id
    category_id
    user_id
    description
    emoji
    milliseconds
    date
    strikethrough
    is_visible
  }
}"#;

const TASK_BY_PK: &str = r#"
query get_task_by_pk($id: uuid!) {
  tasks(where: {id: {_eq: $id}}, limit: 1) {
    milliseconds
  }
}"#;

const UPDATE_TASK: &str = r#"
mutation update_single_task($id: uuid!, $_set: tasks_set_input!) {
  update_tasks_by_pk(pk_columns: {id: $id}, _set: $_set) {
    id
    category_id
    category {
      name
      color
    }
    user_id
    description
    emoji
    milliseconds
    date
    strikethrough
    is_visible
  }
}"#;

const DELETE_TASK: &str = r#"
mutation delete_single_task($id: uuid!) {
  delete_tasks_by_pk(id: $id) {
    id
  }
}"#;

const CATEGORIES: &str = r#"
query get_categories {
  categories {
    id
    name
    color
  }
}"#;

const INSERT_CATEGORY: &str = r#"
mutation insert_single_category($name: String!, $color: String!) {
  insert_categories_one(object: {name: $name, color: $color}) {
    id
    name
    color
  }
}"#;

const DELETE_CATEGORY: &str = r#"
mutation delete_single_category($id: uuid!) {
  delete_categories_by_pk(id: $id) {
    id
    name
    color
  }
}"#;

const INSERT_USER: &str = r#"
mutation insert_single_user {
  insert_users_one(object: {}) {
    id
  }
}"#;

const SESSION_BY_USER: &str = r#"
query get_session($user_id: uuid!) {
  session(limit: 1, where: {user_id: {_eq: $user_id}}) {
    id
    start_time
    task_in_process
    end_of_day
    user_id
  }
}"#;

const INSERT_SESSION: &str = r#"
mutation insert_single_session($object: session_insert_input!) {
  insert_session_one(object: $object) {
    end_of_day
    id
    start_time
    task_in_process
    user_id
  }
}"#;

const UPDATE_SESSION: &str = r#"
mutation update_single_session($id: uuid!, $start_time: bigint, $end_of_day: bigint, $task_in_process: jsonb = null) {
  update_session_by_pk(pk_columns: {id: $id}, _set: {start_time: $start_time, end_of_day: $end_of_day, task_in_process: $task_in_process}) {
    id
    end_of_day
    start_time
    task_in_process
    user_id
  }
}"#;

pub fn fetch_tasks(user_id: &str) -> GraphqlRequest {
    GraphqlRequest::new("get_tasks_by_user", TASKS_BY_USER, json!({ "user_id": user_id }))
}

/// New tasks always start at zero, unfinished and visible.
pub fn create_task(task: &NewTask) -> GraphqlRequest {
    GraphqlRequest::new(
        "insert_single_task",
        INSERT_TASK,
        json!({
            "object": {
                "category_id": task.category_id,
                "user_id": task.user_id,
                "description": task.description,
                "emoji": task.emoji,
                "milliseconds": 0,
                "date": task.date,
                "strikethrough": false,
                "is_visible": true,
            }
        }),
    )
}

pub fn find_task(id: &str) -> GraphqlRequest {
    GraphqlRequest::new("get_task_by_pk", TASK_BY_PK, json!({ "id": id }))
}

pub fn update_task(id: &str, patch: &TaskPatch) -> GraphqlRequest {
    GraphqlRequest::new(
        "update_single_task",
        UPDATE_TASK,
        json!({ "id": id, "_set": patch }),
    )
}

pub fn delete_task(id: &str) -> GraphqlRequest {
    GraphqlRequest::new("delete_single_task", DELETE_TASK, json!({ "id": id }))
}

pub fn fetch_categories() -> GraphqlRequest {
    GraphqlRequest::new("get_categories", CATEGORIES, json!({}))
}

pub fn create_category(name: &str, color: &str) -> GraphqlRequest {
    GraphqlRequest::new(
        "insert_single_category",
        INSERT_CATEGORY,
        json!({ "name": name, "color": color }),
    )
}

pub fn delete_category(id: &str) -> GraphqlRequest {
    GraphqlRequest::new("delete_single_category", DELETE_CATEGORY, json!({ "id": id }))
}

pub fn create_user() -> GraphqlRequest {
    GraphqlRequest::new("insert_single_user", INSERT_USER, json!({}))
}

pub fn fetch_session(user_id: &str) -> GraphqlRequest {
    GraphqlRequest::new("get_session", SESSION_BY_USER, json!({ "user_id": user_id }))
}

pub fn create_session(user_id: &str, patch: &SessionPatch) -> GraphqlRequest {
    GraphqlRequest::new(
        "insert_single_session",
        INSERT_SESSION,
        json!({
            "object": {
                "start_time": patch.start_time,
                "end_of_day": patch.end_of_day,
                "task_in_process": patch.task_in_process,
                "user_id": user_id,
            }
        }),
    )
}

pub fn update_session(id: &str, patch: &SessionPatch) -> GraphqlRequest {
    GraphqlRequest::new(
        "update_single_session",
        UPDATE_SESSION,
        json!({
            "id": id,
            "start_time": patch.start_time,
            "end_of_day": patch.end_of_day,
            "task_in_process": patch.task_in_process,
        }),
    )
}
