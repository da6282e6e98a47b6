use crate::backend::Backend;
use crate::errors::AppResult;
use crate::models::{NewTask, Task, TaskPatch};

/// Move every visible task from an earlier day onto `today`.
///
/// The old record is hidden (its milliseconds stay for the chart) and a
/// fresh copy with zero time is created for today. Hidden records are never
/// carried again, so running this twice is harmless. Returns the new tasks.
pub fn carry_over(backend: &dyn Backend, tasks: &[Task], today: &str) -> AppResult<Vec<Task>> {
    let mut created = Vec::new();

    for task in tasks.iter().filter(|t| t.is_visible && t.date != today) {
        let hide = TaskPatch {
            milliseconds: Some(task.milliseconds),
            is_visible: Some(false),
            ..Default::default()
        };
        backend.update_task(&task.id, &hide)?;
        created.push(backend.create_task(&NewTask::carried_from(task, today))?);
    }

    Ok(created)
}
