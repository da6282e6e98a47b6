use daily_tasks::backend::Backend;
use daily_tasks::core::clock::ManualClock;
use daily_tasks::core::coordinator::{Reconciled, SessionCoordinator, Switched};
use daily_tasks::core::timer::{StartMode, Timer};
use daily_tasks::db::local::LocalBackend;
use daily_tasks::errors::{AppError, AppResult, RemoteErrorKind};
use daily_tasks::models::{Category, NewTask, Session, SessionPatch, Task, TaskPatch, User};
use daily_tasks::utils::date::end_of_day;
use daily_tasks::utils::time::{MS_PER_HOUR, MS_PER_MINUTE};
use std::cell::Cell;

mod common;
use common::{add_task, seeded_backend, utc_ms};

fn running_session(backend: &dyn Backend, user_id: &str, task: &Task, start: i64) {
    let eod = end_of_day(start, OFFSET).unwrap();
    backend
        .create_session(user_id, &SessionPatch::running(task, start, eod))
        .unwrap();
}

/// Local backend whose task reads fail as if the server were down.
struct FlakyBackend {
    inner: LocalBackend,
    offline: Cell<bool>,
}

impl FlakyBackend {
    fn new(inner: LocalBackend) -> Self {
        Self {
            inner,
            offline: Cell::new(false),
        }
    }

    fn check(&self) -> AppResult<()> {
        if self.offline.get() {
            return Err(AppError::remote(RemoteErrorKind::Unreachable, "offline"));
        }
        Ok(())
    }
}

impl Backend for FlakyBackend {
    fn fetch_tasks(&self, user_id: &str) -> AppResult<Vec<Task>> {
        self.inner.fetch_tasks(user_id)
    }
    fn create_task(&self, task: &NewTask) -> AppResult<Task> {
        self.inner.create_task(task)
    }
    fn find_task_millis(&self, id: &str) -> AppResult<i64> {
        self.check()?;
        self.inner.find_task_millis(id)
    }
    fn update_task(&self, id: &str, patch: &TaskPatch) -> AppResult<Task> {
        self.check()?;
        self.inner.update_task(id, patch)
    }
    fn delete_task(&self, id: &str) -> AppResult<String> {
        self.inner.delete_task(id)
    }
    fn fetch_categories(&self) -> AppResult<Vec<Category>> {
        self.inner.fetch_categories()
    }
    fn create_category(&self, name: &str, color: &str) -> AppResult<Category> {
        self.inner.create_category(name, color)
    }
    fn delete_category(&self, id: &str) -> AppResult<Category> {
        self.inner.delete_category(id)
    }
    fn create_user(&self) -> AppResult<User> {
        self.inner.create_user()
    }
    fn fetch_session(&self, user_id: &str) -> AppResult<Option<Session>> {
        self.inner.fetch_session(user_id)
    }
    fn create_session(&self, user_id: &str, patch: &SessionPatch) -> AppResult<Session> {
        self.inner.create_session(user_id, patch)
    }
    fn update_session(&self, id: &str, patch: &SessionPatch) -> AppResult<Session> {
        self.inner.update_session(id, patch)
    }
    fn name(&self) -> &'static str {
        "flaky"
    }
}

const OFFSET: i64 = 5;

#[test]
fn timer_restore_keeps_stored_start() {
    let (backend, user, cat) = seeded_backend();
    let task = add_task(&backend, &user, &cat, "write", "2025-03-10");

    let mut timer = Timer::new();
    timer.start(task, StartMode::Restore(1_000), 50_000, None);

    assert_eq!(timer.start_time(), Some(1_000));
    assert_eq!(timer.elapsed(50_000), 49_000);
    // clock behind the start never yields negative time
    assert_eq!(timer.elapsed(500), 0);
}

#[test]
fn timer_stale_exactly_when_now_after_start() {
    let (backend, user, cat) = seeded_backend();
    let old = add_task(&backend, &user, &cat, "old", "2025-03-09");
    let start = utc_ms(2025, 3, 9, 20, 0);
    let eod = end_of_day(start, OFFSET).unwrap();

    let mut timer = Timer::new();
    timer.start(old.clone(), StartMode::Restore(start), start, Some(eod));
    assert_eq!(timer.end_of_day(), Some(eod));

    assert!(!timer.is_stale(start, "2025-03-10"));
    assert!(!timer.is_stale(start - 1, "2025-03-10"));
    assert!(timer.is_stale(start + 1, "2025-03-10"));
    // same day: never stale
    assert!(!timer.is_stale(start + MS_PER_HOUR, "2025-03-09"));

    // no session boundary: never stale
    timer.start(old, StartMode::Restore(start), start, None);
    assert!(!timer.is_stale(start + 1, "2025-03-10"));

    timer.stop();
    assert!(!timer.is_stale(start + 1, "2025-03-10"));
}

#[test]
fn switching_flushes_outgoing_task_first() {
    let (backend, user, cat) = seeded_backend();
    let a = add_task(&backend, &user, &cat, "a", "2025-03-10");
    let b = add_task(&backend, &user, &cat, "b", "2025-03-10");
    let clock = ManualClock::new(utc_ms(2025, 3, 10, 12, 0));

    let mut coord = SessionCoordinator::enter(&backend, &clock, &user.id, OFFSET).unwrap();
    assert_eq!(coord.reconciled(), Reconciled::Idle);

    let first = coord.switch_task(a.clone()).unwrap();
    assert_eq!(first, Switched::Started { flushed: None });
    let a_start = clock_now(&clock);

    clock.advance(30 * MS_PER_MINUTE);
    let flushed = match coord.switch_task(b.clone()).unwrap() {
        Switched::Started {
            flushed: Some(task),
        } => task,
        other => panic!("expected a flushed task, got {other:?}"),
    };

    // elapsed = new_start - old_start
    let b_start = coord.timer().start_time().unwrap();
    assert_eq!(flushed.id, a.id);
    assert_eq!(flushed.milliseconds, b_start - a_start);
    assert_eq!(backend.find_task_millis(&a.id).unwrap(), 30 * MS_PER_MINUTE);

    let session = backend.fetch_session(&user.id).unwrap().unwrap();
    assert_eq!(session.task_in_process.map(|t| t.id), Some(b.id.clone()));
    assert_eq!(session.start_time, Some(b_start));
}

#[test]
fn switching_to_running_task_is_a_no_op() {
    let (backend, user, cat) = seeded_backend();
    let a = add_task(&backend, &user, &cat, "a", "2025-03-10");
    let clock = ManualClock::new(utc_ms(2025, 3, 10, 12, 0));

    let mut coord = SessionCoordinator::enter(&backend, &clock, &user.id, OFFSET).unwrap();
    coord.switch_task(a.clone()).unwrap();
    clock.advance(MS_PER_HOUR);

    assert_eq!(coord.switch_task(a.clone()).unwrap(), Switched::AlreadyRunning);
    assert_eq!(backend.find_task_millis(&a.id).unwrap(), 0);
}

#[test]
fn stop_accumulates_and_clears_session() {
    let (backend, user, cat) = seeded_backend();
    let a = add_task(&backend, &user, &cat, "a", "2025-03-10");
    let clock = ManualClock::new(utc_ms(2025, 3, 10, 9, 0));

    let mut coord = SessionCoordinator::enter(&backend, &clock, &user.id, OFFSET).unwrap();
    coord.switch_task(a.clone()).unwrap();
    clock.advance(10 * MS_PER_MINUTE);
    assert_eq!(coord.stop().unwrap().unwrap().milliseconds, 10 * MS_PER_MINUTE);

    coord.switch_task(a.clone()).unwrap();
    clock.advance(15 * MS_PER_MINUTE);
    assert_eq!(coord.stop().unwrap().unwrap().milliseconds, 25 * MS_PER_MINUTE);

    let session = backend.fetch_session(&user.id).unwrap().unwrap();
    assert!(session.task_in_process.is_none());
    assert!(session.start_time.is_none());
    assert!(matches!(coord.stop(), Err(AppError::NotRunning)));
}

#[test]
fn failed_flush_keeps_the_old_task_running() {
    let (inner, user, cat) = seeded_backend();
    let a = add_task(&inner, &user, &cat, "a", "2025-03-10");
    let b = add_task(&inner, &user, &cat, "b", "2025-03-10");
    let backend = FlakyBackend::new(inner);
    let clock = ManualClock::new(utc_ms(2025, 3, 10, 12, 0));

    let mut coord = SessionCoordinator::enter(&backend, &clock, &user.id, OFFSET).unwrap();
    coord.switch_task(a.clone()).unwrap();
    clock.advance(MS_PER_MINUTE);

    backend.offline.set(true);
    let err = coord.switch_task(b.clone()).unwrap_err();
    assert_eq!(err.remote_kind(), Some(RemoteErrorKind::Unreachable));
    assert_eq!(coord.running_task_id(), Some(a.id.as_str()));
    assert!(coord.stop().is_err());
    assert!(coord.timer().is_running());

    backend.offline.set(false);
    let saved = coord.stop().unwrap().unwrap();
    assert_eq!(saved.milliseconds, MS_PER_MINUTE);
}

#[test]
fn deleted_running_task_does_not_block_switch() {
    let (backend, user, cat) = seeded_backend();
    let a = add_task(&backend, &user, &cat, "a", "2025-03-10");
    let b = add_task(&backend, &user, &cat, "b", "2025-03-10");
    let clock = ManualClock::new(utc_ms(2025, 3, 10, 12, 0));
    running_session(&backend, &user.id, &a, utc_ms(2025, 3, 10, 11, 0));

    let mut coord = SessionCoordinator::enter(&backend, &clock, &user.id, OFFSET).unwrap();
    backend.delete_task(&a.id).unwrap();

    let switched = coord.switch_task(b.clone()).unwrap();
    assert_eq!(switched, Switched::Started { flushed: None });
    assert_eq!(coord.running_task_id(), Some(b.id.as_str()));
    let session = backend.fetch_session(&user.id).unwrap().unwrap();
    assert_eq!(session.task_in_process.map(|t| t.id), Some(b.id));
}

#[test]
fn deleted_running_task_can_be_stopped() {
    let (backend, user, cat) = seeded_backend();
    let a = add_task(&backend, &user, &cat, "a", "2025-03-10");
    let clock = ManualClock::new(utc_ms(2025, 3, 10, 12, 0));
    running_session(&backend, &user.id, &a, utc_ms(2025, 3, 10, 11, 0));
    backend.delete_task(&a.id).unwrap();

    let mut coord = SessionCoordinator::enter(&backend, &clock, &user.id, OFFSET).unwrap();
    assert_eq!(coord.stop().unwrap(), None);
    assert!(!coord.timer().is_running());

    let session = backend.fetch_session(&user.id).unwrap().unwrap();
    assert!(session.task_in_process.is_none());
}

#[test]
fn deleted_stale_task_can_be_resolved() {
    let (backend, user, cat) = seeded_backend();
    let old = add_task(&backend, &user, &cat, "old", "2025-03-09");
    running_session(&backend, &user.id, &old, utc_ms(2025, 3, 9, 20, 0));
    backend.delete_task(&old.id).unwrap();

    let clock = ManualClock::new(utc_ms(2025, 3, 10, 12, 0));
    let mut coord = SessionCoordinator::enter(&backend, &clock, &user.id, OFFSET).unwrap();
    assert_eq!(coord.reconciled(), Reconciled::Stale);

    assert_eq!(coord.resolve_stale().unwrap(), None);
    assert_eq!(coord.reconciled(), Reconciled::Idle);
    assert!(
        backend
            .fetch_session(&user.id)
            .unwrap()
            .unwrap()
            .task_in_process
            .is_none()
    );
}

#[test]
fn reconcile_resumes_from_stored_start_time() {
    let (backend, user, cat) = seeded_backend();
    let a = add_task(&backend, &user, &cat, "a", "2025-03-10");
    let start = utc_ms(2025, 3, 10, 8, 0);
    let eod = end_of_day(start, OFFSET).unwrap();
    backend
        .create_session(&user.id, &SessionPatch::running(&a, start, eod))
        .unwrap();

    let clock = ManualClock::new(start + 2 * MS_PER_HOUR);
    let coord = SessionCoordinator::enter(&backend, &clock, &user.id, OFFSET).unwrap();

    assert_eq!(coord.reconciled(), Reconciled::Resumed);
    assert_eq!(coord.timer().start_time(), Some(start));
    let status = coord.status().unwrap();
    assert_eq!(status.elapsed_ms, 2 * MS_PER_HOUR);
    assert!(!status.stale);
}

#[test]
fn stale_run_blocks_switch_until_resolved() {
    let (backend, user, cat) = seeded_backend();
    let old = add_task(&backend, &user, &cat, "late night", "2025-03-09");
    let fresh = add_task(&backend, &user, &cat, "morning", "2025-03-10");
    let start = utc_ms(2025, 3, 9, 20, 0);
    let eod = end_of_day(start, OFFSET).unwrap();
    backend
        .create_session(&user.id, &SessionPatch::running(&old, start, eod))
        .unwrap();

    let now = utc_ms(2025, 3, 10, 12, 0);
    let clock = ManualClock::new(now);
    let mut coord = SessionCoordinator::enter(&backend, &clock, &user.id, OFFSET).unwrap();
    assert_eq!(coord.reconciled(), Reconciled::Stale);

    assert!(matches!(
        coord.switch_task(fresh.clone()),
        Err(AppError::StaleTask(_))
    ));
    assert!(matches!(coord.stop(), Err(AppError::StaleTask(_))));
    assert_eq!(backend.find_task_millis(&old.id).unwrap(), 0);

    let resolved = coord.resolve_stale().unwrap().unwrap();
    assert_eq!(resolved.milliseconds, now - start);
    assert_eq!(coord.reconciled(), Reconciled::Idle);
    assert!(!coord.timer().is_running());
    assert!(matches!(coord.resolve_stale(), Err(AppError::NotStale)));

    // the day continues normally afterwards
    assert!(coord.switch_task(fresh).is_ok());
}

#[test]
fn enter_creates_missing_session() {
    let (backend, user, _) = seeded_backend();
    assert!(backend.fetch_session(&user.id).unwrap().is_none());

    let clock = ManualClock::new(utc_ms(2025, 3, 10, 12, 0));
    let coord = SessionCoordinator::enter(&backend, &clock, &user.id, OFFSET).unwrap();

    assert_eq!(coord.today().unwrap(), "2025-03-10");
    assert!(backend.fetch_session(&user.id).unwrap().is_some());
}

#[test]
fn day_bucket_ends_at_offset() {
    // 04:59 UTC still belongs to the previous day
    let clock = ManualClock::new(utc_ms(2025, 3, 10, 4, 59));
    let (backend, user, _) = seeded_backend();
    let coord = SessionCoordinator::enter(&backend, &clock, &user.id, OFFSET).unwrap();
    assert_eq!(coord.today().unwrap(), "2025-03-09");

    assert_eq!(
        end_of_day(utc_ms(2025, 3, 10, 4, 59), OFFSET).unwrap(),
        utc_ms(2025, 3, 10, 5, 0)
    );
}

fn clock_now(clock: &ManualClock) -> i64 {
    use daily_tasks::core::clock::Clock;
    clock.now_ms()
}
