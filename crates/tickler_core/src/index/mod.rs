//! Index primitives for the in-memory store.
//!
//! # Responsibility
//! - Provide the ordered byte-key map both in-memory indexes are built on.
//! - Encode due dates into keys whose byte order matches chronology.
//!
//! # Invariants
//! - Iteration order is exactly lexicographic byte order of the keys.
//! - Earlier calendar days encode to strictly smaller keys; the undated
//!   sentinel is recognizable without decoding.

pub mod date_key;
pub mod ordered;
