//! Domain model for the task tracker.
//!
//! # Responsibility
//! - Define the canonical `Task` and `Project` records shared by all
//!   storage backends.
//!
//! # Invariants
//! - `Task.name` is the unique identity of a task across the system.
//! - Due dates are day-granular; time-of-day never survives a write.

pub mod project;
pub mod task;
