//! Audit journal for Watchlog
//!
//! This crate provides:
//! - `LogSink`, the append-only writer for the audit file
//! - The header block written at the start of every session

pub mod journal;

// Re-exports
pub use journal::{LogSink, SinkError};
