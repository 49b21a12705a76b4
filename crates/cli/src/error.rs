//! Error types for watch sessions

use thiserror::Error;
use watchlog_journal::SinkError;
use watchlog_watcher::WatchError;

/// Fatal errors that end a session
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Watch(#[from] WatchError),

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error("Worker task panicked")]
    WorkerPanicked,
}
