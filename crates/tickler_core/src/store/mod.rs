//! Storage contracts shared by every backend.
//!
//! # Responsibility
//! - Define the capability traits application code programs against.
//! - Define the error taxonomy common to all backends.
//!
//! # Invariants
//! - Absence is an `Option`/`bool` outcome, never an error: lookups that
//!   find nothing succeed with an empty result.
//! - Backend faults are surfaced to the caller unchanged and never
//!   silently retried.

use crate::db::DbError;
use crate::model::project::Project;
use crate::model::task::Task;
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod sqlite;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error taxonomy for store operations.
///
/// The in-memory backend never fails under valid input; the variants exist
/// so both backends share one fallible contract.
#[derive(Debug)]
pub enum StoreError {
    /// Relational backend fault: connection, constraint or query error.
    Db(DbError),
    /// A persisted row holds a value the domain model cannot accept.
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Task storage capability.
///
/// Satisfied by the in-memory engine and the SQLite engine. Mutating calls
/// must leave no partially-applied state visible to readers: a task is
/// either fully present (both lookups agree on its fields) or fully absent.
pub trait Store {
    /// Inserts `task` or replaces the stored version with the same name.
    fn add_or_update_task(&mut self, task: &Task) -> StoreResult<()>;

    /// Removes the stored task with `task`'s name.
    ///
    /// Returns whether anything was actually removed.
    fn remove_task(&mut self, task: &Task) -> StoreResult<bool>;

    /// Point lookup by unique name.
    fn find_task_by_name(&self, name: &str) -> StoreResult<Option<Task>>;

    /// Exact-day lookup; `None` selects tasks with no due date.
    ///
    /// A day nothing is due on yields an empty list.
    fn find_by_due_date(&self, due: Option<NaiveDate>) -> StoreResult<Vec<Task>>;

    /// Tasks whose due day is strictly before today (UTC), earliest first.
    ///
    /// Tasks without a due date are never overdue.
    fn overdue_tasks(&self) -> StoreResult<Vec<Task>>;

    /// Number of stored tasks.
    fn count(&self) -> StoreResult<usize>;

    /// Every stored task, in primary-index iteration order.
    fn all(&self) -> StoreResult<Vec<Task>>;
}

/// Project grouping capability, offered by backends that persist
/// project membership.
pub trait ProjectStore {
    /// Inserts or replaces the project record only.
    ///
    /// Tasks already attached to the project are left untouched.
    fn add_or_update_project(&mut self, project: &Project) -> StoreResult<()>;

    /// A project's tasks ordered by priority descending, then due date
    /// ascending with undated tasks last.
    fn tasks_by_priority(&self, project_name: &str) -> StoreResult<Vec<Task>>;

    /// Upserts `task` and attaches it to `project`.
    fn add_task(&mut self, project: &Project, task: &Task) -> StoreResult<()>;
}
