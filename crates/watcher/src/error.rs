//! Error types for watch sessions.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from watch session operations.
#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Failed to initialize inotify: {source}")]
    FacilityInit {
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot watch path {path}: {source}")]
    Registration {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read inotify events: {source}")]
    Read {
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to release inotify watch: {source}")]
    Release {
        #[source]
        source: std::io::Error,
    },

    #[error("Watch session is stopped")]
    Inactive,
}
