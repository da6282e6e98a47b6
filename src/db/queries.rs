use crate::errors::{AppError, AppResult};
use crate::models::{Category, CategoryRef, NewTask, Session, SessionPatch, Task, TaskPatch, User};
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};
use uuid::Uuid;

const TASK_SELECT: &str = "SELECT t.id, t.user_id, t.category_id, t.description, t.emoji,
            t.milliseconds, t.date, t.strikethrough, t.is_visible,
            c.name AS category_name, c.color AS category_color
     FROM tasks t
     LEFT JOIN categories c ON c.id = t.category_id";

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

pub fn map_task_row(row: &Row) -> Result<Task> {
    let category_name: Option<String> = row.get("category_name")?;
    let category_color: Option<String> = row.get("category_color")?;

    Ok(Task {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        category_id: row.get("category_id")?,
        category: match (category_name, category_color) {
            (Some(name), Some(color)) => Some(CategoryRef { name, color }),
            _ => None,
        },
        description: row.get("description")?,
        emoji: row.get("emoji")?,
        milliseconds: row.get("milliseconds")?,
        date: row.get("date")?,
        strikethrough: row.get::<_, i32>("strikethrough")? == 1,
        is_visible: row.get::<_, i32>("is_visible")? == 1,
    })
}

fn map_category_row(row: &Row) -> Result<Category> {
    Ok(Category {
        id: row.get("id")?,
        name: row.get("name")?,
        color: row.get("color")?,
    })
}

// ---------------------------
// Tasks
// ---------------------------

pub fn load_tasks_by_user(conn: &Connection, user_id: &str) -> AppResult<Vec<Task>> {
    let sql = format!("{TASK_SELECT} WHERE t.user_id = ?1 ORDER BY t.date ASC, t.rowid ASC");
    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map([user_id], map_task_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_task(conn: &Connection, id: &str) -> AppResult<Option<Task>> {
    let sql = format!("{TASK_SELECT} WHERE t.id = ?1");
    let mut stmt = conn.prepare_cached(&sql)?;
    Ok(stmt.query_row([id], map_task_row).optional()?)
}

pub fn insert_task(conn: &Connection, task: &NewTask) -> AppResult<Task> {
    let id = new_id();
    conn.execute(
        "INSERT INTO tasks (id, user_id, category_id, description, emoji,
                            milliseconds, date, strikethrough, is_visible)
         VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6, 0, 1)",
        params![
            id,
            task.user_id,
            task.category_id,
            task.description,
            task.emoji,
            task.date,
        ],
    )?;

    load_task(conn, &id)?.ok_or_else(|| AppError::NotFound(format!("task {id}")))
}

/// Apply a partial update; untouched columns keep their value.
pub fn update_task(conn: &Connection, id: &str, patch: &TaskPatch) -> AppResult<Task> {
    let mut task = load_task(conn, id)?.ok_or_else(|| AppError::NotFound(format!("task {id}")))?;
    patch.apply_to(&mut task);

    conn.execute(
        "UPDATE tasks
         SET category_id = ?1, description = ?2, emoji = ?3,
             milliseconds = ?4, date = ?5,
             strikethrough = ?6, is_visible = ?7
         WHERE id = ?8",
        params![
            task.category_id,
            task.description,
            task.emoji,
            task.milliseconds,
            task.date,
            if task.strikethrough { 1 } else { 0 },
            if task.is_visible { 1 } else { 0 },
            id,
        ],
    )?;

    load_task(conn, id)?.ok_or_else(|| AppError::NotFound(format!("task {id}")))
}

pub fn delete_task(conn: &Connection, id: &str) -> AppResult<String> {
    let n = conn.execute("DELETE FROM tasks WHERE id = ?1", [id])?;
    if n == 0 {
        return Err(AppError::NotFound(format!("task {id}")));
    }
    Ok(id.to_string())
}

// ---------------------------
// Categories
// ---------------------------

pub fn load_categories(conn: &Connection) -> AppResult<Vec<Category>> {
    let mut stmt = conn.prepare_cached("SELECT id, name, color FROM categories ORDER BY rowid ASC")?;
    let rows = stmt.query_map([], map_category_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn insert_category(conn: &Connection, name: &str, color: &str) -> AppResult<Category> {
    let id = new_id();
    conn.execute(
        "INSERT INTO categories (id, name, color) VALUES (?1, ?2, ?3)",
        params![id, name, color],
    )?;
    Ok(Category {
        id,
        name: name.to_string(),
        color: color.to_string(),
    })
}

/// Tasks referencing the category are left as they are.
pub fn delete_category(conn: &Connection, id: &str) -> AppResult<Category> {
    let existing = conn
        .query_row(
            "SELECT id, name, color FROM categories WHERE id = ?1",
            [id],
            map_category_row,
        )
        .optional()?
        .ok_or_else(|| AppError::NotFound(format!("category {id}")))?;

    conn.execute("DELETE FROM categories WHERE id = ?1", [id])?;
    Ok(existing)
}

// ---------------------------
// Users
// ---------------------------

pub fn insert_user(conn: &Connection) -> AppResult<User> {
    let id = new_id();
    conn.execute(
        "INSERT INTO users (id, created_at) VALUES (?1, ?2)",
        params![id, Local::now().to_rfc3339()],
    )?;
    Ok(User { id })
}

// ---------------------------
// Session
// ---------------------------

/// Raw `session` row; `task_in_process` is a JSON document,
/// like the hosted jsonb column.
struct SessionRow {
    id: String,
    user_id: String,
    start_time: Option<i64>,
    end_of_day: Option<i64>,
    task_in_process: Option<String>,
}

fn map_session_row(row: &Row) -> Result<SessionRow> {
    Ok(SessionRow {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        start_time: row.get("start_time")?,
        end_of_day: row.get("end_of_day")?,
        task_in_process: row.get("task_in_process")?,
    })
}

impl SessionRow {
    fn into_session(self) -> AppResult<Session> {
        let task_in_process = match self.task_in_process {
            Some(s) if !s.is_empty() => Some(serde_json::from_str::<Task>(&s)?),
            _ => None,
        };
        Ok(Session {
            id: self.id,
            user_id: Some(self.user_id),
            start_time: self.start_time,
            end_of_day: self.end_of_day,
            task_in_process,
        })
    }
}

fn task_json(patch: &SessionPatch) -> AppResult<Option<String>> {
    Ok(match &patch.task_in_process {
        Some(t) => Some(serde_json::to_string(t)?),
        None => None,
    })
}

pub fn load_session(conn: &Connection, user_id: &str) -> AppResult<Option<Session>> {
    let parts = conn
        .query_row(
            "SELECT id, user_id, start_time, end_of_day, task_in_process
             FROM session WHERE user_id = ?1 LIMIT 1",
            [user_id],
            map_session_row,
        )
        .optional()?;

    parts.map(SessionRow::into_session).transpose()
}

pub fn insert_session(conn: &Connection, user_id: &str, patch: &SessionPatch) -> AppResult<Session> {
    let id = new_id();
    conn.execute(
        "INSERT INTO session (id, user_id, start_time, end_of_day, task_in_process)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![id, user_id, patch.start_time, patch.end_of_day, task_json(patch)?],
    )?;

    load_session(conn, user_id)?.ok_or_else(|| AppError::NotFound(format!("session {id}")))
}

pub fn update_session(conn: &Connection, id: &str, patch: &SessionPatch) -> AppResult<Session> {
    let n = conn.execute(
        "UPDATE session SET start_time = ?1, end_of_day = ?2, task_in_process = ?3
         WHERE id = ?4",
        params![patch.start_time, patch.end_of_day, task_json(patch)?, id],
    )?;
    if n == 0 {
        return Err(AppError::NotFound(format!("session {id}")));
    }

    let parts = conn.query_row(
        "SELECT id, user_id, start_time, end_of_day, task_in_process
         FROM session WHERE id = ?1",
        [id],
        map_session_row,
    )?;
    parts.into_session()
}
