//! SQLite-backed task and project storage.
//!
//! # Responsibility
//! - Implement the `Store` and `ProjectStore` contracts over the
//!   `tasks`/`projects` schema.
//! - Keep SQL details inside this persistence boundary.
//!
//! # Invariants
//! - Read paths reject malformed persisted rows instead of masking them.
//! - Task upserts never touch project membership; only `add_task` does.

use crate::model::project::Project;
use crate::model::task::{Priority, Task};
use crate::store::{ProjectStore, Store, StoreError, StoreResult};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rusqlite::{params, Connection, Row};

const TASK_SELECT_SQL: &str = "SELECT
    name,
    description,
    priority,
    created_on,
    completed_on,
    due_date
FROM tasks";

/// Relational store borrowing an open, migrated connection.
///
/// Every call is an independent round trip; faults surface per invocation
/// as `StoreError::Db` and are never retried internally.
pub struct SqliteStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Overdue query against an explicit "today", for deterministic tests.
    pub fn overdue_tasks_as_of(&self, today: NaiveDate) -> StoreResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TASK_SELECT_SQL}
             WHERE due_date IS NOT NULL AND due_date < ?1
             ORDER BY due_date ASC, name ASC;"
        ))?;

        let mut rows = stmt.query(params![today.to_string()])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        Ok(tasks)
    }
}

impl Store for SqliteStore<'_> {
    fn add_or_update_task(&mut self, task: &Task) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO tasks (name, description, priority, created_on, completed_on, due_date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT (name) DO UPDATE SET
                description = excluded.description,
                priority = excluded.priority,
                created_on = excluded.created_on,
                completed_on = excluded.completed_on,
                due_date = excluded.due_date;",
            params![
                task.name.as_str(),
                task.description.as_str(),
                priority_to_db(task.priority),
                task.created.timestamp_millis(),
                task.completed.map(|done| done.timestamp_millis()),
                task.due_on().map(|due| due.to_string()),
            ],
        )?;

        Ok(())
    }

    fn remove_task(&mut self, task: &Task) -> StoreResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE name = ?1;", [task.name.as_str()])?;

        Ok(changed > 0)
    }

    fn find_task_by_name(&self, name: &str) -> StoreResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE name = ?1;"))?;

        let mut rows = stmt.query([name])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }

        Ok(None)
    }

    fn find_by_due_date(&self, due: Option<NaiveDate>) -> StoreResult<Vec<Task>> {
        let mut tasks = Vec::new();

        match due {
            Some(day) => {
                let mut stmt = self
                    .conn
                    .prepare(&format!("{TASK_SELECT_SQL} WHERE due_date = ?1;"))?;
                let mut rows = stmt.query(params![day.to_string()])?;
                while let Some(row) = rows.next()? {
                    tasks.push(parse_task_row(row)?);
                }
            }
            None => {
                let mut stmt = self
                    .conn
                    .prepare(&format!("{TASK_SELECT_SQL} WHERE due_date IS NULL;"))?;
                let mut rows = stmt.query([])?;
                while let Some(row) = rows.next()? {
                    tasks.push(parse_task_row(row)?);
                }
            }
        }

        Ok(tasks)
    }

    fn overdue_tasks(&self) -> StoreResult<Vec<Task>> {
        self.overdue_tasks_as_of(Utc::now().date_naive())
    }

    fn count(&self) -> StoreResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM tasks;", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn all(&self) -> StoreResult<Vec<Task>> {
        // Name order mirrors the in-memory primary index iteration order.
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} ORDER BY name ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        Ok(tasks)
    }
}

impl ProjectStore for SqliteStore<'_> {
    fn add_or_update_project(&mut self, project: &Project) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO projects (name, description)
             VALUES (?1, ?2)
             ON CONFLICT (name) DO UPDATE SET description = excluded.description;",
            params![project.name.as_str(), project.description.as_str()],
        )?;

        Ok(())
    }

    fn tasks_by_priority(&self, project_name: &str) -> StoreResult<Vec<Task>> {
        // `due_date IS NULL` sorts dated tasks ahead of unscheduled ones.
        let mut stmt = self.conn.prepare(&format!(
            "{TASK_SELECT_SQL}
             WHERE project_name = ?1
             ORDER BY priority DESC, due_date IS NULL, due_date ASC, name ASC;"
        ))?;

        let mut rows = stmt.query([project_name])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        Ok(tasks)
    }

    fn add_task(&mut self, project: &Project, task: &Task) -> StoreResult<()> {
        self.add_or_update_task(task)?;
        self.conn.execute(
            "UPDATE tasks SET project_name = ?1 WHERE name = ?2;",
            params![project.name.as_str(), task.name.as_str()],
        )?;

        Ok(())
    }
}

fn parse_task_row(row: &Row<'_>) -> StoreResult<Task> {
    let priority_value: i64 = row.get("priority")?;
    let priority = parse_priority(priority_value).ok_or_else(|| {
        StoreError::InvalidData(format!(
            "invalid priority value `{priority_value}` in tasks.priority"
        ))
    })?;

    let created_ms: i64 = row.get("created_on")?;
    let created = parse_epoch_ms(created_ms).ok_or_else(|| {
        StoreError::InvalidData(format!(
            "invalid timestamp `{created_ms}` in tasks.created_on"
        ))
    })?;

    let completed = match row.get::<_, Option<i64>>("completed_on")? {
        Some(ms) => Some(parse_epoch_ms(ms).ok_or_else(|| {
            StoreError::InvalidData(format!("invalid timestamp `{ms}` in tasks.completed_on"))
        })?),
        None => None,
    };

    let due_date = match row.get::<_, Option<String>>("due_date")? {
        Some(text) => Some(NaiveDate::parse_from_str(&text, "%Y-%m-%d").map_err(|_| {
            StoreError::InvalidData(format!("invalid calendar day `{text}` in tasks.due_date"))
        })?),
        None => None,
    };

    Ok(Task {
        name: row.get("name")?,
        description: row.get("description")?,
        priority,
        created,
        completed,
        due_date,
    })
}

fn parse_epoch_ms(ms: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(ms).single()
}

fn priority_to_db(priority: Priority) -> i64 {
    priority as i64
}

fn parse_priority(value: i64) -> Option<Priority> {
    match value {
        0 => Some(Priority::None),
        1 => Some(Priority::Low),
        2 => Some(Priority::Medium),
        3 => Some(Priority::High),
        _ => None,
    }
}
