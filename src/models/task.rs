use super::category::{CategoryRef, UNCATEGORIZED};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub user_id: String,
    pub category_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryRef>, // only present on fetched tasks
    pub description: String,
    pub emoji: String,
    pub milliseconds: i64, // accumulated active duration
    pub date: String,      // day bucket "YYYY-MM-DD"
    pub strikethrough: bool,
    pub is_visible: bool,
}

impl Task {
    /// Category name used for grouping.
    pub fn category_name(&self) -> &str {
        self.category
            .as_ref()
            .map(|c| c.name.as_str())
            .unwrap_or(UNCATEGORIZED)
    }

    pub fn category_color(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.color.as_str())
    }
}

/// Fields supplied by the caller when creating a task.
/// The create operation always stores `milliseconds = 0`,
/// `strikethrough = false` and `is_visible = true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTask {
    pub user_id: String,
    pub category_id: String,
    pub description: String,
    pub emoji: String,
    pub date: String,
}

impl NewTask {
    /// Copy of an older task re-created for another day.
    pub fn carried_from(task: &Task, date: &str) -> Self {
        Self {
            user_id: task.user_id.clone(),
            category_id: task.category_id.clone(),
            description: task.description.clone(),
            emoji: task.emoji.clone(),
            date: date.to_string(),
        }
    }
}

/// Partial update. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milliseconds: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
}

impl TaskPatch {
    pub fn milliseconds(ms: i64) -> Self {
        Self {
            milliseconds: Some(ms),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the patch to a local copy.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(v) = &self.category_id {
            task.category_id = v.clone();
        }
        if let Some(v) = &self.description {
            task.description = v.clone();
        }
        if let Some(v) = &self.emoji {
            task.emoji = v.clone();
        }
        if let Some(v) = self.milliseconds {
            task.milliseconds = v;
        }
        if let Some(v) = &self.date {
            task.date = v.clone();
        }
        if let Some(v) = self.strikethrough {
            task.strikethrough = v;
        }
        if let Some(v) = self.is_visible {
            task.is_visible = v;
        }
    }
}
