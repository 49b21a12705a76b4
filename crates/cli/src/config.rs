//! Session configuration

use std::path::PathBuf;
use std::time::Duration;
use watchlog_watcher::DEFAULT_BUFFER_LEN;

/// Audit file written in the working directory
pub const DEFAULT_OUTPUT_FILE: &str = "LogFile.txt";

/// Everything a supervisor needs to run one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Path to watch (file or directory, not recursive)
    pub tracked_path: PathBuf,
    /// Audit file, opened in append mode
    pub output_path: PathBuf,
    /// `None` runs until interrupted
    pub limit: Option<Duration>,
    /// Bytes read from inotify per batch
    pub buffer_len: usize,
}

impl SessionConfig {
    pub fn new(tracked_path: impl Into<PathBuf>) -> Self {
        Self {
            tracked_path: tracked_path.into(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            limit: None,
            buffer_len: DEFAULT_BUFFER_LEN,
        }
    }

    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    /// Bound the session; a zero duration means unbounded
    pub fn limit(mut self, limit: Duration) -> Self {
        self.limit = (!limit.is_zero()).then_some(limit);
        self
    }

    /// Bound the session in whole seconds; `0` means unbounded
    pub fn limit_secs(self, secs: u64) -> Self {
        self.limit(Duration::from_secs(secs))
    }

    pub fn buffer_len(mut self, len: usize) -> Self {
        self.buffer_len = len;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::new("/tmp/f");

        assert_eq!(config.tracked_path, PathBuf::from("/tmp/f"));
        assert_eq!(config.output_path, PathBuf::from("LogFile.txt"));
        assert_eq!(config.limit, None);
        assert_eq!(config.buffer_len, DEFAULT_BUFFER_LEN);
    }

    #[test]
    fn test_zero_limit_is_unbounded() {
        assert_eq!(SessionConfig::new("/tmp/f").limit_secs(0).limit, None);
        assert_eq!(SessionConfig::new("/tmp/f").limit(Duration::ZERO).limit, None);
    }

    #[test]
    fn test_limit_in_seconds() {
        let config = SessionConfig::new("/tmp/f").limit_secs(2);
        assert_eq!(config.limit, Some(Duration::from_secs(2)));
    }
}
