//! Watch session over a single tracked path

use crate::error::WatchError;
use crate::event::{EventMask, RawEvent, DEFAULT_BUFFER_LEN, MIN_BUFFER_LEN};
use crate::platform::Subscription;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Subscription to change notifications for one path
///
/// Lifecycle:
/// 1. `start` registers the watch (fails fast, never retried)
/// 2. `next_batch` yields decoded records, one read per call
/// 3. `stop` releases the watch; later calls are no-ops
///
/// Dropping an active session stops it.
pub struct WatchSession {
    tracked_path: PathBuf,
    subscription: Option<Subscription>,
    buffer: Vec<u8>,
}

impl WatchSession {
    /// Start watching `path` with the default read buffer
    pub fn start(path: impl Into<PathBuf>) -> Result<Self, WatchError> {
        Self::with_buffer_len(path, DEFAULT_BUFFER_LEN)
    }

    /// Start watching `path`, reading at most `buffer_len` bytes per batch
    ///
    /// Buffers below [`MIN_BUFFER_LEN`] are raised to it.
    pub fn with_buffer_len(path: impl Into<PathBuf>, buffer_len: usize) -> Result<Self, WatchError> {
        let tracked_path = path.into();
        let subscription = Subscription::register(&tracked_path)?;

        info!("Watching {}", tracked_path.display());

        Ok(Self {
            tracked_path,
            subscription: Some(subscription),
            buffer: vec![0u8; buffer_len.max(MIN_BUFFER_LEN)],
        })
    }

    pub fn tracked_path(&self) -> &Path {
        &self.tracked_path
    }

    pub fn is_active(&self) -> bool {
        self.subscription.is_some()
    }

    /// Wait for the next chunk of events and decode it
    ///
    /// Suspends the calling task until at least one record is available.
    /// Cancellation-safe while waiting.
    pub async fn next_batch(&mut self) -> Result<Vec<RawEvent>, WatchError> {
        let subscription = self.subscription.as_mut().ok_or(WatchError::Inactive)?;

        let events = subscription.read(&mut self.buffer).await?;
        debug!("Read {} events", events.len());

        for event in &events {
            if let Some(notice) = kernel_notice(event.mask) {
                warn!("{}: {}", self.tracked_path.display(), notice);
            }
        }

        Ok(events)
    }

    /// Deregister the watch and close the descriptor
    pub fn stop(&mut self) -> Result<(), WatchError> {
        let Some(subscription) = self.subscription.take() else {
            return Ok(());
        };

        info!("Stopped watching {}", self.tracked_path.display());
        subscription
            .release()
            .map_err(|source| WatchError::Release { source })
    }
}

/// Records that report lost events or a dead watch rather than a change
fn kernel_notice(mask: EventMask) -> Option<&'static str> {
    if mask.contains(EventMask::Q_OVERFLOW) {
        Some("inotify queue overflowed; some events were lost by the kernel")
    } else if mask.contains(EventMask::IGNORED) {
        Some("kernel removed the watch; no further events will arrive")
    } else {
        None
    }
}

impl Drop for WatchSession {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            warn!("Failed to release watch on {}: {}", self.tracked_path.display(), e);
        }
    }
}
