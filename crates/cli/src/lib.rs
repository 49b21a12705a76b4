//! Watchlog session orchestration
//!
//! Wires the watcher, the owner lookup and the journal together:
//! - `WatchSupervisor` runs one session and guarantees cleanup
//! - `SessionConfig` describes the session
//! - `signals` turns SIGINT/SIGTERM into a shutdown request
//! - `logging` sets up diagnostics on stderr

pub mod config;
pub mod error;
pub mod logging;
pub mod signals;
pub mod supervisor;
mod worker;

pub use config::{SessionConfig, DEFAULT_OUTPUT_FILE};
pub use error::SessionError;
pub use supervisor::{SessionReport, StopReason, SupervisorState, WatchSupervisor};
