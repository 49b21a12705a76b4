//! File system watching for Watchlog
//!
//! This crate provides a single-path inotify watch with:
//! - Reactor-driven reads (no thread parked on the descriptor)
//! - Owned event records detached from the read buffer
//! - Classification of raw masks into audit categories
//! - Idempotent release of the watch

pub mod classify;
pub mod error;
pub mod event;
pub mod platform;
pub mod session;

// Re-exports
pub use classify::{classify, EventCategory};
pub use error::WatchError;
pub use event::{EventMask, RawEvent, DEFAULT_BUFFER_LEN};
pub use session::WatchSession;
