//! Session coordinator: the application context for one user.
//!
//! Owns the timer and keeps the remote session record in step with it.
//! Elapsed time is always written onto the outgoing task before the timer
//! moves on; if that write fails the timer stays where it was.

use crate::backend::Backend;
use crate::core::clock::Clock;
use crate::core::timer::{StartMode, Timer};
use crate::errors::{AppError, AppResult};
use crate::models::{Session, SessionPatch, Task, TaskPatch};
use crate::utils::date::{day_bucket, end_of_day};

/// Result of adopting the stored session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciled {
    /// No task was in process.
    Idle,
    /// The stored task resumed from its stored start time.
    Resumed,
    /// The stored task belongs to a previous day and needs `resolve_stale`.
    Stale,
}

/// Result of `switch_task`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Switched {
    /// The requested task was already running; nothing changed.
    AlreadyRunning,
    /// The new task runs; `flushed` is the outgoing task after its update.
    Started { flushed: Option<Task> },
}

/// Snapshot for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerStatus {
    pub today: String,
    pub task: Option<Task>,
    pub start_time: Option<i64>,
    pub elapsed_ms: i64,
    pub stale: bool,
}

pub struct SessionCoordinator<'a> {
    backend: &'a dyn Backend,
    clock: &'a dyn Clock,
    user_id: String,
    day_offset_hours: i64,
    timer: Timer,
    session: Session,
    reconciled: Reconciled,
}

impl<'a> SessionCoordinator<'a> {
    /// Load (or create) the user's session and adopt it.
    pub fn enter(
        backend: &'a dyn Backend,
        clock: &'a dyn Clock,
        user_id: &str,
        day_offset_hours: i64,
    ) -> AppResult<Self> {
        let session = match backend.fetch_session(user_id)? {
            Some(s) => s,
            None => backend.create_session(user_id, &SessionPatch::cleared())?,
        };

        let mut coordinator = Self {
            backend,
            clock,
            user_id: user_id.to_string(),
            day_offset_hours,
            timer: Timer::new(),
            session: session.clone(),
            reconciled: Reconciled::Idle,
        };
        coordinator.reconcile_on_load(session)?;
        Ok(coordinator)
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn reconciled(&self) -> Reconciled {
        self.reconciled
    }

    pub fn today(&self) -> AppResult<String> {
        day_bucket(self.clock.now_ms(), self.day_offset_hours)
    }

    pub fn running_task_id(&self) -> Option<&str> {
        self.timer.task().map(|t| t.id.as_str())
    }

    /// Adopt a stored session. A task in process resumes from the stored
    /// start time, not from the time of this call.
    pub fn reconcile_on_load(&mut self, session: Session) -> AppResult<Reconciled> {
        let now = self.clock.now_ms();

        match &session.task_in_process {
            Some(task) => {
                let start = session.start_time.unwrap_or(now);
                self.timer.start(
                    task.clone(),
                    StartMode::Restore(start),
                    now,
                    session.end_of_day,
                );
            }
            None => {
                self.timer.stop();
            }
        }
        self.session = session;

        self.reconciled = if !self.timer.is_running() {
            Reconciled::Idle
        } else if self.is_stale()? {
            Reconciled::Stale
        } else {
            Reconciled::Resumed
        };
        Ok(self.reconciled)
    }

    pub fn is_stale(&self) -> AppResult<bool> {
        let now = self.clock.now_ms();
        Ok(self.timer.is_stale(now, &day_bucket(now, self.day_offset_hours)?))
    }

    fn ensure_not_stale(&self) -> AppResult<()> {
        if self.is_stale()? {
            let desc = self
                .timer
                .task()
                .map(|t| t.description.clone())
                .unwrap_or_default();
            return Err(AppError::StaleTask(desc));
        }
        Ok(())
    }

    /// Add the running interval up to `now` onto the running task.
    /// The stored value is re-read first so edits made elsewhere survive.
    ///
    /// A task deleted elsewhere has nothing left to flush into: that yields
    /// `Ok(None)` and the transition goes on. Any other failure aborts it.
    fn flush(&self, now: i64) -> AppResult<Option<Task>> {
        let Some(task) = self.timer.task() else {
            return Ok(None);
        };

        let elapsed = self.timer.elapsed(now);
        let written = self.backend.find_task_millis(&task.id).and_then(|stored| {
            self.backend
                .update_task(&task.id, &TaskPatch::milliseconds(stored + elapsed))
        });

        match written {
            Ok(updated) => Ok(Some(updated)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn persist_session(&mut self, patch: SessionPatch) -> AppResult<()> {
        self.session = self.backend.update_session(&self.session.id, &patch)?;
        Ok(())
    }

    /// Make `task` the task in process, flushing the outgoing one first.
    /// The new run starts at the same instant the old one was cut.
    pub fn switch_task(&mut self, task: Task) -> AppResult<Switched> {
        if self.running_task_id() == Some(task.id.as_str()) {
            return Ok(Switched::AlreadyRunning);
        }
        self.ensure_not_stale()?;

        let now = self.clock.now_ms();
        let flushed = self.flush(now)?;

        let eod = end_of_day(now, self.day_offset_hours)?;
        self.timer
            .start(task.clone(), StartMode::NewSelection, now, Some(eod));
        self.persist_session(SessionPatch::running(&task, now, eod))?;

        Ok(Switched::Started { flushed })
    }

    /// Flush the running task and go idle. `None` when the task no longer
    /// exists on the backend.
    pub fn stop(&mut self) -> AppResult<Option<Task>> {
        if !self.timer.is_running() {
            return Err(AppError::NotRunning);
        }
        self.ensure_not_stale()?;

        let now = self.clock.now_ms();
        let flushed = self.flush(now)?;

        self.timer.stop();
        self.persist_session(SessionPatch::cleared())?;
        Ok(flushed)
    }

    /// The explicit confirmation for a stale run: roll the time since the
    /// stored start into the task, then go idle.
    pub fn resolve_stale(&mut self) -> AppResult<Option<Task>> {
        if !self.is_stale()? {
            return Err(AppError::NotStale);
        }

        let now = self.clock.now_ms();
        let flushed = self.flush(now)?;

        self.timer.stop();
        self.persist_session(SessionPatch::cleared())?;
        self.reconciled = Reconciled::Idle;
        Ok(flushed)
    }

    pub fn status(&self) -> AppResult<TimerStatus> {
        let now = self.clock.now_ms();
        Ok(TimerStatus {
            today: day_bucket(now, self.day_offset_hours)?,
            task: self.timer.task().cloned(),
            start_time: self.timer.start_time(),
            elapsed_ms: self.timer.elapsed(now),
            stale: self.is_stale()?,
        })
    }
}
