//! The single-active-task timer.
//!
//! At most one task runs at a time. The timer itself never talks to the
//! backend: persisting elapsed time is the coordinator's job and happens
//! before the timer moves to another state.

use crate::models::Task;

/// How the start time of a run is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartMode {
    /// A fresh selection: the run starts now.
    NewSelection,
    /// Resuming a stored session: keep its start time.
    Restore(i64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running {
        task: Task,
        start_time: i64,
        end_of_day: Option<i64>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timer {
    state: TimerState,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    pub fn new() -> Self {
        Self {
            state: TimerState::Idle,
        }
    }

    /// Replace whatever runs with `task`. Flushing the previous run is the
    /// caller's responsibility.
    pub fn start(&mut self, task: Task, mode: StartMode, now: i64, end_of_day: Option<i64>) {
        let start_time = match mode {
            StartMode::NewSelection => now,
            StartMode::Restore(start) => start,
        };
        self.state = TimerState::Running {
            task,
            start_time,
            end_of_day,
        };
    }

    /// Go idle and hand back what was running. Does not persist anything.
    pub fn stop(&mut self) -> TimerState {
        std::mem::replace(&mut self.state, TimerState::Idle)
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, TimerState::Running { .. })
    }

    pub fn task(&self) -> Option<&Task> {
        match &self.state {
            TimerState::Running { task, .. } => Some(task),
            TimerState::Idle => None,
        }
    }

    pub fn start_time(&self) -> Option<i64> {
        match &self.state {
            TimerState::Running { start_time, .. } => Some(*start_time),
            TimerState::Idle => None,
        }
    }

    pub fn end_of_day(&self) -> Option<i64> {
        match &self.state {
            TimerState::Running { end_of_day, .. } => *end_of_day,
            TimerState::Idle => None,
        }
    }

    /// `now - start_time`, never negative; 0 when idle.
    pub fn elapsed(&self, now: i64) -> i64 {
        self.start_time().map(|s| (now - s).max(0)).unwrap_or(0)
    }

    /// A run is stale when its task belongs to another day bucket, the
    /// session boundary is known and the clock has moved past the start.
    pub fn is_stale(&self, now: i64, today: &str) -> bool {
        match &self.state {
            TimerState::Running {
                task,
                start_time,
                end_of_day,
            } => task.date != today && end_of_day.is_some() && now > *start_time,
            TimerState::Idle => false,
        }
    }
}
