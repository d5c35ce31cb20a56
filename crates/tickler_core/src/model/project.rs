//! Project domain model.
//!
//! # Responsibility
//! - Group tasks under a named project for priority-ordered queries.
//!
//! # Invariants
//! - A project never reaches storage through ambient state: every
//!   project-scoped operation takes the store as an explicit argument.

use crate::model::task::Task;
use crate::store::{ProjectStore, StoreResult};
use serde::{Deserialize, Serialize};

/// Named grouping of tasks.
///
/// Membership lives in the backing store, not on this record; the struct
/// itself is plain data so it can be passed around and serialized freely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub description: String,
}

impl Project {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Lists this project's tasks, highest priority first, then by due date.
    pub fn tasks_by_priority<S: ProjectStore>(&self, store: &S) -> StoreResult<Vec<Task>> {
        store.tasks_by_priority(&self.name)
    }

    /// Adds a task to this project through the provided store.
    pub fn add_task<S: ProjectStore>(&self, store: &mut S, task: &Task) -> StoreResult<()> {
        store.add_task(self, task)
    }
}
