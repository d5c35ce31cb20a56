//! In-memory dual-indexed task store.
//!
//! # Responsibility
//! - Keep a primary name index and a secondary due-date index over one set
//!   of tasks, and answer point, exact-day and overdue queries from them.
//!
//! # Invariants
//! - Every stored task appears in exactly one due-date bucket, the one
//!   keyed by its encoded due date, with fields identical to the primary
//!   copy; every bucket entry names a task present in the primary index.
//! - Single-writer model: mutations take `&mut self` and perform no
//!   internal synchronization. Read results are materialized snapshots,
//!   safe to hold across later mutations.

use crate::index::date_key::{encode_due_date, is_undated_key, DATE_KEY_LEN};
use crate::index::ordered::OrderedIndex;
use crate::model::task::Task;
use crate::store::{Store, StoreResult};
use chrono::{NaiveDate, Utc};

/// Task store backed by two ordered in-memory indexes.
///
/// The secondary index maps each encoded due date to the bucket of tasks
/// sharing that day, including a sentinel bucket for unscheduled tasks.
/// Bucket order is insertion/update order; only bucket *keys* are sorted.
#[derive(Debug, Default)]
pub struct MemoryStore {
    by_name: OrderedIndex<Task>,
    by_due_date: OrderedIndex<Vec<Task>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            by_name: OrderedIndex::new(),
            by_due_date: OrderedIndex::new(),
        }
    }

    /// Overdue query against an explicit "today", for deterministic tests.
    ///
    /// Walks due-date buckets in ascending key order, skipping the
    /// unscheduled sentinel. Encoded-key order is chronological order, so
    /// the first bucket at or past today's key ends the scan: no later
    /// bucket can be overdue. Cost is proportional to the number of
    /// overdue buckets, not the number of tasks stored.
    pub fn overdue_tasks_as_of(&self, today: NaiveDate) -> Vec<Task> {
        let today_key = encode_due_date(Some(today));
        let mut overdue = Vec::new();

        for (key, bucket) in self.by_due_date.iter() {
            if is_undated_key(key) {
                continue;
            }
            if key >= &today_key[..] {
                break;
            }
            overdue.extend(bucket.iter().cloned());
        }

        overdue
    }

    /// Writes `task` into the bucket at `key`, replacing a same-name entry
    /// in place so the bucket never holds two versions of one task.
    fn write_to_bucket(&mut self, key: &[u8; DATE_KEY_LEN], task: &Task) {
        if let Some(bucket) = self.by_due_date.search_mut(key) {
            match bucket.iter_mut().find(|entry| entry.name == task.name) {
                Some(entry) => *entry = task.clone(),
                None => bucket.push(task.clone()),
            }
        } else {
            self.by_due_date.insert(key.to_vec(), vec![task.clone()]);
        }
    }

    /// Compacts `name` out of the bucket at `key`, deleting the bucket
    /// entirely once it holds nothing.
    fn remove_from_bucket(&mut self, key: &[u8; DATE_KEY_LEN], name: &str) {
        let emptied = match self.by_due_date.search_mut(key) {
            Some(bucket) => {
                bucket.retain(|entry| entry.name != name);
                bucket.is_empty()
            }
            None => false,
        };

        if emptied {
            self.by_due_date.delete(key);
        }
    }
}

impl Store for MemoryStore {
    /// Upserts by name, keeping both indexes in step.
    ///
    /// When the stored version had a different due date, the task is
    /// compacted out of its old bucket before the new bucket is written;
    /// skipping that step would leave the same task filed under two days.
    /// Keys are computed before either index is touched, so readers only
    /// ever observe the fully applied result.
    fn add_or_update_task(&mut self, task: &Task) -> StoreResult<()> {
        let new_key = encode_due_date(task.due_on());

        let previous = self
            .by_name
            .insert(task.name.as_bytes().to_vec(), task.clone());

        if let Some(previous) = previous {
            if previous.due_on() != task.due_on() {
                let old_key = encode_due_date(previous.due_on());
                self.remove_from_bucket(&old_key, &previous.name);
            }
        }

        self.write_to_bucket(&new_key, task);
        Ok(())
    }

    /// Removes by name from both indexes.
    ///
    /// The bucket is located through the *stored* version's due date, not
    /// the caller's copy, which may be stale.
    fn remove_task(&mut self, task: &Task) -> StoreResult<bool> {
        let Some(stored) = self.by_name.delete(task.name.as_bytes()) else {
            return Ok(false);
        };

        let key = encode_due_date(stored.due_on());
        self.remove_from_bucket(&key, &stored.name);
        Ok(true)
    }

    fn find_task_by_name(&self, name: &str) -> StoreResult<Option<Task>> {
        Ok(self.by_name.search(name.as_bytes()).cloned())
    }

    fn find_by_due_date(&self, due: Option<NaiveDate>) -> StoreResult<Vec<Task>> {
        let key = encode_due_date(due);
        Ok(self
            .by_due_date
            .search(&key)
            .cloned()
            .unwrap_or_default())
    }

    fn overdue_tasks(&self) -> StoreResult<Vec<Task>> {
        Ok(self.overdue_tasks_as_of(Utc::now().date_naive()))
    }

    fn count(&self) -> StoreResult<usize> {
        Ok(self.by_name.len())
    }

    fn all(&self) -> StoreResult<Vec<Task>> {
        Ok(self.by_name.iter().map(|(_, task)| task.clone()).collect())
    }
}
