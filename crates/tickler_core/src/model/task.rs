//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record stored and indexed by every backend.
//! - Provide lifecycle helpers for completion and due-date assignment.
//!
//! # Invariants
//! - `name` is stable and unique; it is the primary index key everywhere.
//! - `due_date` holds a calendar day only. Assignment goes through
//!   `add_due_date`, which discards time-of-day, and the `NaiveDate` type
//!   makes sub-day precision unrepresentable afterwards.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Task urgency on a small ordinal scale.
///
/// The discriminants are part of the storage contract: relational backends
/// persist them as integers and sort on them directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    None = 0,
    Low = 1,
    Medium = 2,
    High = 3,
}

impl Default for Priority {
    fn default() -> Self {
        Self::None
    }
}

/// Canonical task record.
///
/// Identity is the `name` field; two tasks with the same name are versions
/// of the same task, and an upsert with an existing name replaces the
/// stored version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identity and primary index key.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Urgency used by priority-ordered project queries.
    pub priority: Priority,
    /// Creation instant, stamped by the constructor.
    pub created: DateTime<Utc>,
    /// Completion instant, absent while the task is open.
    pub completed: Option<DateTime<Utc>>,
    /// Canonical due day (UTC), absent for unscheduled tasks.
    pub due_date: Option<NaiveDate>,
}

impl Task {
    /// Creates an open task with no priority and no due date.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            priority: Priority::None,
            created: Utc::now(),
            completed: None,
            due_date: None,
        }
    }

    /// Assigns a due date, discarding the time-of-day component.
    ///
    /// The stored value is the UTC calendar day of `due`; it stays
    /// day-granular for the rest of the task's life.
    pub fn add_due_date(&mut self, due: DateTime<Utc>) {
        self.due_date = Some(due.date_naive());
    }

    /// Returns the canonical due day, if one is set.
    pub fn due_on(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Marks the task as completed now.
    pub fn complete(&mut self) {
        self.completed = Some(Utc::now());
    }

    /// Returns whether a completion instant has been recorded.
    pub fn is_completed(&self) -> bool {
        self.completed.is_some_and(|done| done <= Utc::now())
    }

    /// Returns whether the due day has passed.
    ///
    /// Compares calendar days in UTC, strictly before: a task due today is
    /// not overdue at any time today.
    pub fn is_overdue(&self) -> bool {
        self.due_date
            .is_some_and(|due| due < Utc::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::{Priority, Task};
    use chrono::{Duration, NaiveDate, TimeZone, Utc};

    #[test]
    fn new_task_is_open_and_unscheduled() {
        let task = Task::new("write report", "quarterly summary");
        assert_eq!(task.priority, Priority::None);
        assert!(task.completed.is_none());
        assert!(task.due_on().is_none());
        assert!(!task.is_completed());
        assert!(!task.is_overdue());
    }

    #[test]
    fn add_due_date_discards_time_of_day() {
        let mut task = Task::new("dentist", "");
        let instant = Utc
            .with_ymd_and_hms(2026, 3, 14, 15, 9, 26)
            .single()
            .expect("valid timestamp");
        task.add_due_date(instant);
        assert_eq!(
            task.due_on(),
            NaiveDate::from_ymd_opt(2026, 3, 14),
        );
    }

    #[test]
    fn complete_stamps_a_completion_instant() {
        let mut task = Task::new("pay rent", "");
        task.complete();
        assert!(task.is_completed());
    }

    #[test]
    fn overdue_compares_calendar_days_strictly() {
        let mut yesterday = Task::new("late", "");
        yesterday.add_due_date(Utc::now() - Duration::days(1));
        assert!(yesterday.is_overdue());

        let mut today = Task::new("due today", "");
        today.add_due_date(Utc::now());
        assert!(!today.is_overdue());
    }

    #[test]
    fn priority_ordering_follows_ordinals() {
        assert!(Priority::None < Priority::Low);
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::Medium < Priority::High);
    }
}
