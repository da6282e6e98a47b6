//! Per-invocation state shared by the command handlers.

use crate::backend::{Backend, open_backend};
use crate::config::Config;
use crate::core::carry_over::carry_over;
use crate::core::clock::SystemClock;
use crate::core::coordinator::{Reconciled, SessionCoordinator};
use crate::core::store::TaskStore;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, warning};

pub struct AppContext {
    pub cfg: Config,
    backend: Box<dyn Backend>,
    log_pool: Option<DbPool>,
    clock: SystemClock,
}

/// Coordinator and store for one user, after the day's carry-over.
pub struct Dashboard<'a> {
    pub coordinator: SessionCoordinator<'a>,
    pub store: TaskStore<'a>,
}

impl AppContext {
    pub fn open(cfg: &Config) -> AppResult<Self> {
        let backend = open_backend(cfg)?;

        // The internal log always lives in the local file, whatever the backend.
        let log_pool = match DbPool::new(&cfg.database_path()) {
            Ok(p) => Some(p),
            Err(e) => {
                warning(format!("Internal log unavailable: {e}"));
                None
            }
        };

        Ok(Self {
            cfg: cfg.clone(),
            backend,
            log_pool,
            clock: SystemClock,
        })
    }

    pub fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }

    pub fn user_id(&self) -> AppResult<&str> {
        self.cfg.user_id.as_deref().ok_or(AppError::NoUser)
    }

    /// Write an internal log line; failures only warn.
    pub fn log(&self, operation: &str, target: &str, message: &str) {
        let Some(pool) = &self.log_pool else {
            return;
        };
        if let Err(e) = ttlog(&pool.conn, operation, target, message) {
            warning(format!("Failed to write internal log: {e}"));
        }
    }

    /// Enter the user's dashboard: adopt the session, load the lists and
    /// move yesterday's open tasks onto today.
    pub fn dashboard(&self) -> AppResult<Dashboard<'_>> {
        let user_id = self.user_id()?;
        let coordinator = SessionCoordinator::enter(
            self.backend(),
            &self.clock,
            user_id,
            self.cfg.day_offset_hours,
        )?;
        let mut store = TaskStore::load(self.backend(), user_id)?;

        let today = coordinator.today()?;
        let carried = carry_over(self.backend(), store.tasks(), &today)?;
        if !carried.is_empty() {
            store.refresh()?;
            info(format!("{} task(s) carried over to {today}", carried.len()));
            self.log(
                "carry_over",
                user_id,
                &format!("{} task(s) carried over to {today}", carried.len()),
            );
        }

        if coordinator.reconciled() == Reconciled::Stale {
            warning("A task from a previous day is still running. Run `dtasks resolve`.");
        }

        Ok(Dashboard { coordinator, store })
    }
}
