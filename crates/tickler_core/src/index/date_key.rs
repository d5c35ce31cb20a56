//! Due-date key codec for the secondary index.
//!
//! # Responsibility
//! - Encode an optional calendar day into a fixed-width byte key whose
//!   lexicographic order matches chronological order.
//!
//! # Invariants
//! - Earlier UTC days encode to strictly smaller keys.
//! - The "no due date" sentinel sorts before every dated key and carries a
//!   tag so scans can skip it without decoding.
//! - Decoding is deliberately not provided; scans compare encoded keys.

use chrono::{Datelike, NaiveDate};

/// Fixed width of every due-date key.
pub const DATE_KEY_LEN: usize = 7;

const TAG_UNDATED: u8 = 0x00;
const TAG_DATED: u8 = 0x01;

/// Encodes an optional due day into its secondary-index key.
///
/// Layout: one tag byte, then for dated keys the year as big-endian `i32`
/// with the sign bit flipped (keeps byte order monotone across negative
/// years), then month and day bytes. The undated sentinel is all zeroes
/// after the tag.
pub fn encode_due_date(due: Option<NaiveDate>) -> [u8; DATE_KEY_LEN] {
    let mut key = [0u8; DATE_KEY_LEN];
    let Some(day) = due else {
        key[0] = TAG_UNDATED;
        return key;
    };

    key[0] = TAG_DATED;
    let year = (day.year() as u32) ^ 0x8000_0000;
    key[1..5].copy_from_slice(&year.to_be_bytes());
    key[5] = day.month() as u8;
    key[6] = day.day() as u8;
    key
}

/// Returns whether `key` is the "no due date" sentinel.
///
/// Chronological scans must skip that bucket wherever it sorts.
pub fn is_undated_key(key: &[u8]) -> bool {
    key.first() == Some(&TAG_UNDATED)
}
