#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{TimeZone, Utc};
use daily_tasks::backend::Backend;
use daily_tasks::db::local::LocalBackend;
use daily_tasks::models::{Category, NewTask, Task, User};
use tempfile::TempDir;

/// Isolated HOME and database for one CLI test.
pub struct TestEnv {
    pub home: TempDir,
    pub db_path: String,
}

impl TestEnv {
    pub fn new() -> Self {
        let home = tempfile::tempdir().expect("tempdir");
        let db_path = home
            .path()
            .join("daily-tasks-test.sqlite")
            .to_string_lossy()
            .to_string();
        Self { home, db_path }
    }

    /// `dtasks --db <tmp> --backend local --test ...` with HOME pointed at the tempdir.
    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("dtasks");
        cmd.env("HOME", self.home.path())
            .env("APPDATA", self.home.path())
            .env("NO_COLOR", "1")
            .env_remove("DAILY_TASKS_GRAPHQL_URL")
            .env_remove("DAILY_TASKS_ADMIN_SECRET")
            .args(["--db", &self.db_path, "--backend", "local", "--test"]);
        cmd
    }

    /// Same as `cmd` with `--user <id>` added.
    pub fn user_cmd(&self, user: &str) -> Command {
        let mut cmd = self.cmd();
        cmd.args(["--user", user]);
        cmd
    }

    pub fn init(&self) {
        self.cmd().arg("init").assert().success();
    }

    /// Create a user through the CLI and return its id.
    pub fn create_user(&self) -> String {
        let out = self
            .cmd()
            .args(["user", "create"])
            .output()
            .expect("run user create");
        assert!(out.status.success(), "user create failed");
        let stdout = String::from_utf8_lossy(&out.stdout);
        stdout
            .lines()
            .find_map(|l| l.split("User created: ").nth(1))
            .map(|s| s.trim().to_string())
            .expect("user id in output")
    }
}

/// Epoch milliseconds of a UTC wall-clock time.
pub fn utc_ms(y: i32, m: u32, d: u32, h: u32, min: u32) -> i64 {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .expect("valid date")
        .timestamp_millis()
}

/// In-memory backend with one user and one "Work" category.
pub fn seeded_backend() -> (LocalBackend, User, Category) {
    let backend = LocalBackend::in_memory().expect("in-memory backend");
    let user = backend.create_user().expect("user");
    let category = backend
        .create_category("Work", "#3366ff")
        .expect("category");
    (backend, user, category)
}

pub fn add_task(backend: &dyn Backend, user: &User, category: &Category, desc: &str, date: &str) -> Task {
    backend
        .create_task(&NewTask {
            user_id: user.id.clone(),
            category_id: category.id.clone(),
            description: desc.to_string(),
            emoji: "📝".to_string(),
            date: date.to_string(),
        })
        .expect("create task")
}
