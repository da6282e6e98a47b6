use daily_tasks::backend::Backend;
use daily_tasks::core::carry_over::carry_over;
use daily_tasks::core::store::{TaskEdit, TaskStore};
use daily_tasks::errors::AppError;

mod common;
use common::{add_task, seeded_backend};

#[test]
fn add_task_validates_and_refetches() {
    let (backend, user, _) = seeded_backend();
    let mut store = TaskStore::load(&backend, &user.id).unwrap();

    assert!(matches!(
        store.add_task("  ", "🙂", "Work", "2025-03-10"),
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        store.add_task("read", "", "Work", "2025-03-10"),
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        store.add_task("read", "📚", "Nope", "2025-03-10"),
        Err(AppError::NotFound(_))
    ));

    let created = store.add_task("read", "📚", "work", "2025-03-10").unwrap();
    assert_eq!(created.milliseconds, 0);
    assert!(created.is_visible);
    assert!(!created.strikethrough);
    assert_eq!(store.tasks().len(), 1);
    assert_eq!(store.tasks()[0].category_name(), "Work");
}

#[test]
fn edit_converts_minutes_to_milliseconds() {
    let (backend, user, cat) = seeded_backend();
    let t = add_task(&backend, &user, &cat, "write", "2025-03-10");
    let mut store = TaskStore::load(&backend, &user.id).unwrap();

    let edit = TaskEdit {
        description: Some("write docs".into()),
        minutes: Some(90),
        ..Default::default()
    };
    let updated = store.edit_task(&t.id[..8], &edit).unwrap();

    assert_eq!(updated.milliseconds, 5_400_000);
    assert_eq!(updated.description, "write docs");
    assert_eq!(updated.emoji, t.emoji);
    assert!(matches!(
        store.edit_task(&t.id, &TaskEdit::default()),
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        store.edit_task(
            &t.id,
            &TaskEdit {
                minutes: Some(-1),
                ..Default::default()
            }
        ),
        Err(AppError::Validation(_))
    ));
}

#[test]
fn edit_rejects_minutes_that_overflow() {
    let (backend, user, cat) = seeded_backend();
    let t = add_task(&backend, &user, &cat, "write", "2025-03-10");
    let mut store = TaskStore::load(&backend, &user.id).unwrap();

    let edit = TaskEdit {
        minutes: Some(i64::MAX / 1000),
        ..Default::default()
    };
    assert!(matches!(
        store.edit_task(&t.id, &edit),
        Err(AppError::Validation(_))
    ));
    assert_eq!(backend.find_task_millis(&t.id).unwrap(), 0);
}

#[test]
fn visible_tasks_list_unfinished_first() {
    let (backend, user, cat) = seeded_backend();
    let a = add_task(&backend, &user, &cat, "a", "2025-03-10");
    let b = add_task(&backend, &user, &cat, "b", "2025-03-10");
    let c = add_task(&backend, &user, &cat, "c", "2025-03-10");
    let mut store = TaskStore::load(&backend, &user.id).unwrap();

    store.toggle_strikethrough(&a.id).unwrap();
    let order: Vec<&str> = store.visible_tasks().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(order, vec![b.id.as_str(), c.id.as_str(), a.id.as_str()]);

    let undone = store.toggle_strikethrough(&a.id).unwrap();
    assert!(!undone.strikethrough);
}

#[test]
fn delete_task_and_missing_lookup() {
    let (backend, user, cat) = seeded_backend();
    let a = add_task(&backend, &user, &cat, "a", "2025-03-10");
    let mut store = TaskStore::load(&backend, &user.id).unwrap();

    assert_eq!(store.delete_task(&a.id).unwrap(), a.id);
    assert!(store.tasks().is_empty());
    assert!(matches!(store.find_task(&a.id), Err(AppError::NotFound(_))));
}

#[test]
fn categories_need_a_hex_color_and_do_not_cascade() {
    let (backend, user, cat) = seeded_backend();
    let t = add_task(&backend, &user, &cat, "a", "2025-03-10");
    let mut store = TaskStore::load(&backend, &user.id).unwrap();

    assert!(matches!(
        store.add_category("Rest", "green"),
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        store.add_category("Date", "#112233"),
        Err(AppError::Validation(_))
    ));
    let rest = store.add_category("Rest", "00AA11").unwrap();
    assert_eq!(rest.color, "#00aa11");
    assert_eq!(store.categories().len(), 2);

    store.delete_category("Work").unwrap();
    assert_eq!(store.categories().len(), 1);

    let orphan = store.find_task(&t.id).unwrap();
    assert_eq!(orphan.category_id, cat.id);
    assert_eq!(orphan.category_name(), "Uncategorized");
}

#[test]
fn carry_over_hides_old_tasks_and_copies_them_once() {
    let (backend, user, cat) = seeded_backend();
    let old = add_task(&backend, &user, &cat, "old", "2025-03-09");
    backend
        .update_task(&old.id, &daily_tasks::models::TaskPatch::milliseconds(3_600_000))
        .unwrap();
    add_task(&backend, &user, &cat, "today", "2025-03-10");

    let tasks = backend.fetch_tasks(&user.id).unwrap();
    let created = carry_over(&backend, &tasks, "2025-03-10").unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].description, "old");
    assert_eq!(created[0].date, "2025-03-10");
    assert_eq!(created[0].milliseconds, 0);

    let after = backend.fetch_tasks(&user.id).unwrap();
    assert_eq!(after.len(), 3);
    let hidden = after.iter().find(|t| t.id == old.id).unwrap();
    assert!(!hidden.is_visible);
    assert_eq!(hidden.milliseconds, 3_600_000);

    // second run finds nothing left to carry
    assert!(carry_over(&backend, &after, "2025-03-10").unwrap().is_empty());
}
