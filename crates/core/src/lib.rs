//! Watchlog Core - shared primitives for the audit trail
//!
//! This crate provides:
//! - `LogEntry` and the fixed-width row layout of the audit file
//! - Local timestamps at second precision
//! - Owner lookups for the tracked path (`OwnerResolver`)

pub mod entry;
pub mod owner;

// Re-export main types for convenience
pub use entry::{format_row, local_timestamp, LogEntry, COLUMN_WIDTH, TIMESTAMP_FORMAT};
pub use owner::{user_name, OwnerError, OwnerResolver, SystemOwnerResolver, UNKNOWN_USER};
