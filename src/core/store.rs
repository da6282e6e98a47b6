//! In-memory cache of one user's tasks and the global categories.
//! Every mutation goes to the backend and is followed by a full refetch.

use crate::backend::Backend;
use crate::errors::{AppError, AppResult};
use crate::models::{Category, NewTask, Task, TaskPatch};
use crate::utils::time::minutes_to_ms;

pub struct TaskStore<'a> {
    backend: &'a dyn Backend,
    user_id: String,
    tasks: Vec<Task>,
    categories: Vec<Category>,
}

/// Changes accepted by `edit_task`.
#[derive(Debug, Clone, Default)]
pub struct TaskEdit {
    pub description: Option<String>,
    pub emoji: Option<String>,
    pub category_id: Option<String>,
    pub minutes: Option<i64>,
}

fn required(value: &str, what: &str) -> AppResult<String> {
    let v = value.trim();
    if v.is_empty() {
        return Err(AppError::Validation(format!("{what} must not be empty")));
    }
    Ok(v.to_string())
}

impl<'a> TaskStore<'a> {
    /// Create the store and load both lists.
    pub fn load(backend: &'a dyn Backend, user_id: &str) -> AppResult<Self> {
        let mut store = Self {
            backend,
            user_id: user_id.to_string(),
            tasks: Vec::new(),
            categories: Vec::new(),
        };
        store.refresh()?;
        Ok(store)
    }

    pub fn refresh(&mut self) -> AppResult<()> {
        self.refresh_tasks()?;
        self.refresh_categories()
    }

    fn refresh_tasks(&mut self) -> AppResult<()> {
        self.tasks = self.backend.fetch_tasks(&self.user_id)?;
        Ok(())
    }

    fn refresh_categories(&mut self) -> AppResult<()> {
        self.categories = self.backend.fetch_categories()?;
        Ok(())
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Visible tasks, unfinished first; otherwise in fetch order.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        let mut v: Vec<&Task> = self.tasks.iter().filter(|t| t.is_visible).collect();
        v.sort_by_key(|t| t.strikethrough);
        v
    }

    /// Look a task up by full id or by a unique id prefix.
    pub fn find_task(&self, id: &str) -> AppResult<&Task> {
        if let Some(t) = self.tasks.iter().find(|t| t.id == id) {
            return Ok(t);
        }
        let mut matches = self.tasks.iter().filter(|t| t.id.starts_with(id));
        match (matches.next(), matches.next()) {
            (Some(t), None) if !id.is_empty() => Ok(t),
            (Some(_), Some(_)) => Err(AppError::Validation(format!(
                "task id prefix '{id}' is ambiguous"
            ))),
            _ => Err(AppError::NotFound(format!("task {id}"))),
        }
    }

    /// Look a category up by id, id prefix or exact name (case-insensitive).
    pub fn find_category(&self, key: &str) -> AppResult<&Category> {
        if let Some(c) = self
            .categories
            .iter()
            .find(|c| c.id == key || c.name.eq_ignore_ascii_case(key))
        {
            return Ok(c);
        }
        let mut matches = self.categories.iter().filter(|c| c.id.starts_with(key));
        match (matches.next(), matches.next()) {
            (Some(c), None) if !key.is_empty() => Ok(c),
            (Some(_), Some(_)) => Err(AppError::Validation(format!(
                "category '{key}' is ambiguous"
            ))),
            _ => Err(AppError::NotFound(format!("category {key}"))),
        }
    }

    pub fn add_task(
        &mut self,
        description: &str,
        emoji: &str,
        category: &str,
        today: &str,
    ) -> AppResult<Task> {
        let description = required(description, "description")?;
        let emoji = required(emoji, "emoji")?;
        let category_id = self.find_category(&required(category, "category")?)?.id.clone();

        let created = self.backend.create_task(&NewTask {
            user_id: self.user_id.clone(),
            category_id,
            description,
            emoji,
            date: today.to_string(),
        })?;

        self.refresh_tasks()?;
        Ok(created)
    }

    pub fn edit_task(&mut self, id: &str, edit: &TaskEdit) -> AppResult<Task> {
        let task_id = self.find_task(id)?.id.clone();

        let category_id = match &edit.category_id {
            Some(c) => Some(self.find_category(c)?.id.clone()),
            None => None,
        };
        if let Some(m) = edit.minutes
            && m < 0
        {
            return Err(AppError::Validation("minutes must be >= 0".into()));
        }

        let patch = TaskPatch {
            description: edit
                .description
                .as_deref()
                .map(|d| required(d, "description"))
                .transpose()?,
            emoji: edit
                .emoji
                .as_deref()
                .map(|e| required(e, "emoji"))
                .transpose()?,
            category_id,
            milliseconds: edit.minutes.map(minutes_to_ms).transpose()?,
            ..Default::default()
        };
        if patch.is_empty() {
            return Err(AppError::Validation("nothing to update".into()));
        }

        let updated = self.backend.update_task(&task_id, &patch)?;
        self.refresh_tasks()?;
        Ok(updated)
    }

    pub fn toggle_strikethrough(&mut self, id: &str) -> AppResult<Task> {
        let task = self.find_task(id)?;
        let patch = TaskPatch {
            strikethrough: Some(!task.strikethrough),
            ..Default::default()
        };
        let task_id = task.id.clone();

        let updated = self.backend.update_task(&task_id, &patch)?;
        self.refresh_tasks()?;
        Ok(updated)
    }

    pub fn delete_task(&mut self, id: &str) -> AppResult<String> {
        let task_id = self.find_task(id)?.id.clone();
        let deleted = self.backend.delete_task(&task_id)?;
        self.refresh_tasks()?;
        Ok(deleted)
    }

    pub fn add_category(&mut self, name: &str, color: &str) -> AppResult<Category> {
        let name = required(name, "category name")?;
        // "date" is the row key of the chart export
        if name.eq_ignore_ascii_case("date") {
            return Err(AppError::Validation(
                "'date' is reserved and cannot name a category".into(),
            ));
        }
        let color = required(color, "color")?;
        if !Category::is_valid_color(&color) {
            return Err(AppError::Validation(format!(
                "color '{color}' is not a #rrggbb value"
            )));
        }
        let color = if color.starts_with('#') {
            color.to_lowercase()
        } else {
            format!("#{}", color.to_lowercase())
        };

        let created = self.backend.create_category(&name, &color)?;
        self.refresh_categories()?;
        Ok(created)
    }

    /// Tasks pointing at the category keep their category_id.
    pub fn delete_category(&mut self, key: &str) -> AppResult<Category> {
        let id = self.find_category(key)?.id.clone();
        let deleted = self.backend.delete_category(&id)?;
        self.refresh()?;
        Ok(deleted)
    }
}
