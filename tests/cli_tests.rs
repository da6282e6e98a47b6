use daily_tasks::backend::Backend;
use daily_tasks::db::local::LocalBackend;
use daily_tasks::models::SessionPatch;
use daily_tasks::utils::date::end_of_day;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::path::Path;

mod common;
use common::{TestEnv, add_task, utc_ms};

/// Init, create a user and a "Work" category. Returns the user id.
fn setup(env: &TestEnv) -> String {
    env.init();
    let user = env.create_user();
    env.user_cmd(&user)
        .args(["category", "add", "Work", "--color", "#3366ff"])
        .assert()
        .success()
        .stdout(contains("Category 'Work' added"));
    user
}

fn task_id(env: &TestEnv, user: &str, description: &str) -> String {
    let backend = LocalBackend::open(Path::new(&env.db_path)).unwrap();
    backend
        .fetch_tasks(user)
        .unwrap()
        .into_iter()
        .find(|t| t.description == description && t.is_visible)
        .map(|t| t.id)
        .expect("task in db")
}

#[test]
fn init_creates_database() {
    let env = TestEnv::new();
    env.cmd()
        .arg("init")
        .assert()
        .success()
        .stdout(contains("Database initialized"));
    assert!(Path::new(&env.db_path).exists());
}

#[test]
fn dashboard_commands_need_a_user() {
    let env = TestEnv::new();
    env.init();
    env.cmd()
        .args(["task", "list"])
        .assert()
        .failure()
        .stderr(contains("No user selected"));
}

#[test]
fn task_lifecycle() {
    let env = TestEnv::new();
    let user = setup(&env);

    env.user_cmd(&user)
        .args(["task", "add", "write docs", "--emoji", "📝", "--category", "work"])
        .assert()
        .success()
        .stdout(contains("Task 'write docs' added"));

    env.user_cmd(&user)
        .args(["task", "list"])
        .assert()
        .success()
        .stdout(contains("write docs").and(contains("Work")).and(contains("00hr 00min")));

    let id = task_id(&env, &user, "write docs");
    env.user_cmd(&user)
        .args(["task", "edit", &id[..8], "--minutes", "90"])
        .assert()
        .success()
        .stdout(contains("01hr 30min"));

    env.user_cmd(&user)
        .args(["task", "done", &id])
        .assert()
        .success()
        .stdout(contains("marked as done"));

    env.user_cmd(&user)
        .args(["task", "del", &id, "--yes"])
        .assert()
        .success()
        .stdout(contains("deleted"));

    env.user_cmd(&user)
        .args(["task", "list"])
        .assert()
        .success()
        .stdout(contains("No tasks yet"));
}

#[test]
fn task_add_requires_fields() {
    let env = TestEnv::new();
    let user = setup(&env);

    env.user_cmd(&user)
        .args(["task", "add", " ", "--emoji", "📝", "--category", "Work"])
        .assert()
        .failure()
        .stderr(contains("description must not be empty"));

    env.user_cmd(&user)
        .args(["category", "add", "Rest", "--color", "green"])
        .assert()
        .failure()
        .stderr(contains("#rrggbb"));
}

#[test]
fn timer_start_stop() {
    let env = TestEnv::new();
    let user = setup(&env);
    for name in ["a", "b"] {
        env.user_cmd(&user)
            .args(["task", "add", name, "--emoji", "⭐", "--category", "Work"])
            .assert()
            .success();
    }
    let a = task_id(&env, &user, "a");
    let b = task_id(&env, &user, "b");

    env.user_cmd(&user)
        .args(["start", &a])
        .assert()
        .success()
        .stdout(contains("Started ⭐ a"));

    env.user_cmd(&user)
        .args(["start", &a])
        .assert()
        .success()
        .stdout(contains("already running"));

    env.user_cmd(&user)
        .args(["status"])
        .assert()
        .success()
        .stdout(contains("⏱").and(contains(" a")));

    env.user_cmd(&user)
        .args(["task", "del", &a, "--yes"])
        .assert()
        .failure()
        .stderr(contains("is running"));

    env.user_cmd(&user)
        .args(["start", &b])
        .assert()
        .success()
        .stdout(contains("Saved 'a'").and(contains("Started ⭐ b")));

    env.user_cmd(&user)
        .arg("stop")
        .assert()
        .success()
        .stdout(contains("Stopped 'b'"));

    env.user_cmd(&user)
        .arg("stop")
        .assert()
        .failure()
        .stderr(contains("No task is running"));

    env.cmd()
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(contains("start").and(contains("stop")).and(contains("task_add")));
}

#[test]
fn stale_run_needs_resolve() {
    let env = TestEnv::new();
    let user = setup(&env);

    let (old_id, fresh_id) = {
        let backend = LocalBackend::open(Path::new(&env.db_path)).unwrap();
        let owner = daily_tasks::models::User { id: user.clone() };
        let work = backend
            .fetch_categories()
            .unwrap()
            .into_iter()
            .next()
            .unwrap();
        let old = add_task(&backend, &owner, &work, "night shift", "2020-01-01");
        let fresh = add_task(&backend, &owner, &work, "fresh", "2020-01-01");

        let start = utc_ms(2020, 1, 1, 20, 0);
        let session = backend.fetch_session(&user).unwrap().unwrap();
        backend
            .update_session(
                &session.id,
                &SessionPatch::running(&old, start, end_of_day(start, 5).unwrap()),
            )
            .unwrap();
        (old.id, fresh.id)
    };

    env.user_cmd(&user)
        .arg("status")
        .assert()
        .success()
        .stdout(contains("dtasks resolve"));

    let carried_fresh = task_id(&env, &user, "fresh");
    assert_ne!(carried_fresh, fresh_id);
    env.user_cmd(&user)
        .args(["start", &carried_fresh])
        .assert()
        .failure()
        .stderr(contains("previous day"));

    env.user_cmd(&user)
        .args(["resolve", "--yes"])
        .assert()
        .success()
        .stdout(contains("Resolved 'night shift'"));

    let backend = LocalBackend::open(Path::new(&env.db_path)).unwrap();
    assert!(backend.find_task_millis(&old_id).unwrap() > 0);

    env.user_cmd(&user)
        .args(["resolve", "--yes"])
        .assert()
        .failure()
        .stderr(contains("not stale"));

    env.user_cmd(&user)
        .args(["start", &carried_fresh])
        .assert()
        .success();
}

#[test]
fn chart_and_totals() {
    let env = TestEnv::new();
    let user = setup(&env);
    env.user_cmd(&user)
        .args(["task", "add", "write", "--emoji", "📝", "--category", "Work"])
        .assert()
        .success();
    let id = task_id(&env, &user, "write");
    env.user_cmd(&user)
        .args(["task", "edit", &id, "--minutes", "60"])
        .assert()
        .success();

    env.user_cmd(&user)
        .args(["chart", "--format", "csv"])
        .assert()
        .success()
        .stdout(contains("date,Work").and(contains(",1.00")));

    let out = env.home.path().join("chart.json");
    let out_str = out.to_string_lossy().to_string();
    env.user_cmd(&user)
        .args(["chart", "--format", "json", "--file", &out_str, "--force"])
        .assert()
        .success()
        .stdout(contains("JSON export completed"));
    let rows: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(rows[0]["Work"], 1.0);

    env.user_cmd(&user)
        .arg("totals")
        .assert()
        .success()
        .stdout(contains("Work (01:00)").and(contains("Total: 01:00")));
}

#[test]
fn config_print_hides_secret() {
    let env = TestEnv::new();
    env.init();
    env.cmd()
        .env("DAILY_TASKS_ADMIN_SECRET", "s3cr3t")
        .args(["config", "--print"])
        .assert()
        .success()
        .stdout(contains("backend: local").and(contains("s3cr3t").not()));
}
