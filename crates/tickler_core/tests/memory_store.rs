use chrono::{Duration, Utc};
use tickler_core::{MemoryStore, Store, Task};

fn task_due_in(name: &str, days_from_now: i64) -> Task {
    let mut task = Task::new(name, format!("{name} description"));
    task.add_due_date(Utc::now() + Duration::days(days_from_now));
    task
}

/// Checks the cross-index invariant through the public API: every stored
/// task has exactly one matching entry in its due-date bucket, and bucket
/// sizes sum to the store count.
fn assert_indexes_consistent(store: &MemoryStore) {
    let all = store.all().unwrap();
    assert_eq!(all.len(), store.count().unwrap());

    let mut bucket_total = 0;
    let mut seen_days = Vec::new();
    for task in &all {
        let bucket = store.find_by_due_date(task.due_on()).unwrap();
        let matching: Vec<_> = bucket
            .iter()
            .filter(|entry| entry.name == task.name)
            .collect();
        assert_eq!(
            matching.len(),
            1,
            "task `{}` must appear exactly once in its bucket",
            task.name
        );
        assert_eq!(matching[0], &task.clone());

        if !seen_days.contains(&task.due_on()) {
            seen_days.push(task.due_on());
            bucket_total += bucket.len();
        }
    }
    assert_eq!(bucket_total, all.len());
}

#[test]
fn empty_store_has_no_tasks() {
    let store = MemoryStore::new();
    assert_eq!(store.count().unwrap(), 0);
    assert!(store.all().unwrap().is_empty());
    assert!(store.find_task_by_name("anything").unwrap().is_none());
    assert!(store.overdue_tasks().unwrap().is_empty());
}

#[test]
fn add_increases_count_and_find_returns_stored_fields() {
    let mut store = MemoryStore::new();
    let task = task_due_in("water plants", 3);

    store.add_or_update_task(&task).unwrap();
    assert_eq!(store.count().unwrap(), 1);

    let found = store
        .find_task_by_name("water plants")
        .unwrap()
        .expect("task should be found by name");
    assert_eq!(found, task);
    assert_indexes_consistent(&store);
}

#[test]
fn upsert_with_unchanged_value_is_idempotent() {
    let mut store = MemoryStore::new();
    let task = task_due_in("file taxes", 10);

    store.add_or_update_task(&task).unwrap();
    store.add_or_update_task(&task).unwrap();
    store.add_or_update_task(&task).unwrap();

    assert_eq!(store.count().unwrap(), 1);
    let bucket = store.find_by_due_date(task.due_on()).unwrap();
    assert_eq!(bucket.len(), 1);
    assert_indexes_consistent(&store);
}

#[test]
fn upsert_replaces_fields_without_duplicating_bucket_entries() {
    let mut store = MemoryStore::new();
    let mut task = task_due_in("review draft", 5);
    store.add_or_update_task(&task).unwrap();

    task.description = "second pass".to_string();
    store.add_or_update_task(&task).unwrap();

    let bucket = store.find_by_due_date(task.due_on()).unwrap();
    assert_eq!(bucket.len(), 1);
    assert_eq!(bucket[0].description, "second pass");
    assert_indexes_consistent(&store);
}

#[test]
fn changing_due_date_migrates_between_buckets() {
    let mut store = MemoryStore::new();
    let mut task = task_due_in("book flight", 2);
    let first_day = task.due_on();
    store.add_or_update_task(&task).unwrap();

    task.add_due_date(Utc::now() + Duration::days(9));
    let second_day = task.due_on();
    assert_ne!(first_day, second_day);
    store.add_or_update_task(&task).unwrap();

    assert!(store.find_by_due_date(first_day).unwrap().is_empty());
    let moved = store.find_by_due_date(second_day).unwrap();
    assert_eq!(moved.len(), 1);
    assert_eq!(moved[0].name, "book flight");
    assert_eq!(store.count().unwrap(), 1);
    assert_indexes_consistent(&store);
}

#[test]
fn overdue_returns_exactly_the_strictly_earlier_buckets() {
    let mut store = MemoryStore::new();
    store.add_or_update_task(&task_due_in("two days late", -2)).unwrap();
    store.add_or_update_task(&task_due_in("one day late", -1)).unwrap();
    store.add_or_update_task(&task_due_in("due today", 0)).unwrap();
    store.add_or_update_task(&task_due_in("due tomorrow", 1)).unwrap();

    let today = Utc::now().date_naive();
    let overdue = store.overdue_tasks_as_of(today);

    let names: Vec<&str> = overdue.iter().map(|task| task.name.as_str()).collect();
    assert_eq!(names, vec!["two days late", "one day late"]);
}

#[test]
fn removing_one_of_three_shared_date_tasks_compacts_the_bucket() {
    let mut store = MemoryStore::new();
    let first = task_due_in("laundry", 4);
    let second = task_due_in("groceries", 4);
    let third = task_due_in("vacuum", 4);
    store.add_or_update_task(&first).unwrap();
    store.add_or_update_task(&second).unwrap();
    store.add_or_update_task(&third).unwrap();

    assert!(store.remove_task(&second).unwrap());

    let bucket = store.find_by_due_date(first.due_on()).unwrap();
    let names: Vec<&str> = bucket.iter().map(|task| task.name.as_str()).collect();
    assert_eq!(names, vec!["laundry", "vacuum"]);
    assert_indexes_consistent(&store);

    assert!(store.remove_task(&first).unwrap());
    assert!(store.remove_task(&third).unwrap());
    assert!(store.find_by_due_date(first.due_on()).unwrap().is_empty());
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn remove_reports_whether_anything_was_removed() {
    let mut store = MemoryStore::new();
    let task = task_due_in("call plumber", 1);
    store.add_or_update_task(&task).unwrap();

    assert!(store.remove_task(&task).unwrap());
    assert!(!store.remove_task(&task).unwrap());
    assert!(store.find_task_by_name("call plumber").unwrap().is_none());
}

#[test]
fn remove_uses_the_stored_due_date_not_the_callers_copy() {
    let mut store = MemoryStore::new();
    let stored = task_due_in("renew passport", 30);
    store.add_or_update_task(&stored).unwrap();

    // Caller holds a stale copy pointing at a different day.
    let mut stale = stored.clone();
    stale.add_due_date(Utc::now() + Duration::days(60));

    assert!(store.remove_task(&stale).unwrap());
    assert!(store.find_task_by_name("renew passport").unwrap().is_none());
    assert!(store.find_by_due_date(stored.due_on()).unwrap().is_empty());
    assert!(store.find_by_due_date(stale.due_on()).unwrap().is_empty());
}

#[test]
fn undated_tasks_live_in_their_own_bucket_and_are_never_overdue() {
    let mut store = MemoryStore::new();
    let unscheduled = Task::new("someday maybe", "no date attached");
    store.add_or_update_task(&unscheduled).unwrap();
    store.add_or_update_task(&task_due_in("late", -3)).unwrap();

    let bucket = store.find_by_due_date(None).unwrap();
    assert_eq!(bucket.len(), 1);
    assert_eq!(bucket[0].name, "someday maybe");

    let far_future = Utc::now().date_naive() + Duration::days(10_000);
    let overdue = store.overdue_tasks_as_of(far_future);
    assert!(overdue.iter().all(|task| task.name != "someday maybe"));
}

#[test]
fn upserts_and_removals_round_trip_without_duplicates() {
    let mut store = MemoryStore::new();
    let tasks: Vec<Task> = (0..12)
        .map(|i| task_due_in(&format!("task-{i:02}"), i % 5 - 2))
        .collect();

    for task in &tasks {
        store.add_or_update_task(task).unwrap();
    }
    for task in tasks.iter().take(5) {
        assert!(store.remove_task(task).unwrap());
    }

    let all = store.all().unwrap();
    assert_eq!(all.len(), 7);

    let mut names: Vec<&str> = all.iter().map(|task| task.name.as_str()).collect();
    names.dedup();
    assert_eq!(names.len(), 7);
    assert_indexes_consistent(&store);
}
