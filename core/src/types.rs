//! Shared primitive types.

/// Store-assigned student identifier (SQLite rowid).
pub type StudentId = i64;

/// A single subject score.
pub type Score = i64;
