//! Core domain logic for the tickler task tracker.
//! This crate is the single source of truth for task-storage invariants.

pub mod db;
pub mod index;
pub mod logging;
pub mod model;
pub mod store;

pub use index::date_key::{encode_due_date, DATE_KEY_LEN};
pub use index::ordered::OrderedIndex;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::project::Project;
pub use model::task::{Priority, Task};
pub use store::memory::MemoryStore;
pub use store::sqlite::SqliteStore;
pub use store::{ProjectStore, Store, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
