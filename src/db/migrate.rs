use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, OptionalExtension};

/// Ensure that the `log` table exists. It also records applied migrations,
/// so it is created before anything else.
fn ensure_log_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250301_0001_create_users_categories",
        description: "Created users and categories tables",
        sql: r#"
            CREATE TABLE IF NOT EXISTS users (
                id         TEXT PRIMARY KEY,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS categories (
                id    TEXT PRIMARY KEY,
                name  TEXT NOT NULL,
                color TEXT NOT NULL
            );
        "#,
    },
    Migration {
        version: "20250301_0002_create_tasks",
        description: "Created tasks table",
        // No foreign key on category_id: deleting a category leaves its tasks.
        sql: r#"
            CREATE TABLE IF NOT EXISTS tasks (
                id            TEXT PRIMARY KEY,
                user_id       TEXT NOT NULL,
                category_id   TEXT NOT NULL,
                description   TEXT NOT NULL,
                emoji         TEXT NOT NULL DEFAULT '',
                milliseconds  INTEGER NOT NULL DEFAULT 0,
                date          TEXT NOT NULL,
                strikethrough INTEGER NOT NULL DEFAULT 0,
                is_visible    INTEGER NOT NULL DEFAULT 1
            );

            CREATE INDEX IF NOT EXISTS idx_tasks_user_date ON tasks(user_id, date);
        "#,
    },
    Migration {
        version: "20250301_0003_create_session",
        description: "Created session table",
        sql: r#"
            CREATE TABLE IF NOT EXISTS session (
                id              TEXT PRIMARY KEY,
                user_id         TEXT NOT NULL UNIQUE,
                start_time      INTEGER,
                end_of_day      INTEGER,
                task_in_process TEXT
            );
        "#,
    },
];

fn is_applied(conn: &Connection, version: &str) -> AppResult<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Public entry point: run all pending migrations.
///
/// Each migration runs in its own transaction together with the log row
/// that marks it as applied. Returns the versions applied by this call.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<Vec<&'static str>> {
    ensure_log_table(conn)?;

    let mut applied = Vec::new();

    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }

        let batch = format!(
            "BEGIN;
             {}
             INSERT INTO log (date, operation, target, message)
             VALUES (datetime('now'), 'migration_applied', '{}', '{}');
             COMMIT;",
            m.sql, m.version, m.description
        );

        if let Err(e) = conn.execute_batch(&batch) {
            let _ = conn.execute_batch("ROLLBACK;");
            return Err(AppError::Migration(format!("{}: {}", m.version, e)));
        }

        applied.push(m.version);
    }

    Ok(applied)
}
