//! inotify subscription driven by the tokio reactor

use crate::error::WatchError;
use crate::event::RawEvent;
use inotify::{Inotify, WatchDescriptor, WatchMask};
use nix::errno::Errno;
use std::io;
use std::os::unix::io::{AsRawFd, RawFd};
use std::path::Path;
use tokio::io::unix::AsyncFd;
use tracing::debug;

/// Owns the inotify instance so the reactor can poll its descriptor
struct InotifyFd {
    inotify: Inotify,
}

impl AsRawFd for InotifyFd {
    fn as_raw_fd(&self) -> RawFd {
        self.inotify.as_raw_fd()
    }
}

/// One registered watch on one path
///
/// The inotify descriptor is created non-blocking; readiness comes from the
/// tokio reactor, so a pending read never pins a thread. Records are decoded
/// by `Inotify::read_events`.
pub struct Subscription {
    fd: AsyncFd<InotifyFd>,
    wd: WatchDescriptor,
}

impl Subscription {
    /// Initialize inotify and watch `path` for every event kind
    ///
    /// Must be called from within a tokio runtime with I/O enabled.
    pub fn register(path: &Path) -> Result<Self, WatchError> {
        let inotify = Inotify::init().map_err(|source| WatchError::FacilityInit { source })?;

        let wd = inotify
            .watches()
            .add(path, WatchMask::ALL_EVENTS)
            .map_err(|source| WatchError::Registration {
                path: path.to_path_buf(),
                source,
            })?;

        let fd = AsyncFd::new(InotifyFd { inotify })
            .map_err(|source| WatchError::FacilityInit { source })?;

        debug!("Registered inotify watch on {}", path.display());
        Ok(Self { fd, wd })
    }

    /// Wait for readiness, then perform exactly one read into `buffer`
    ///
    /// Dropping the future while it waits loses nothing: no bytes are
    /// consumed until the read itself runs.
    pub async fn read(&mut self, buffer: &mut [u8]) -> Result<Vec<RawEvent>, WatchError> {
        loop {
            let mut guard = self
                .fd
                .readable_mut()
                .await
                .map_err(|source| WatchError::Read { source })?;

            let read = guard.try_io(|inner| {
                let events = inner.get_mut().inotify.read_events(&mut *buffer)?;
                Ok(events.map(RawEvent::from).collect::<Vec<_>>())
            });

            match read {
                Ok(result) => return result.map_err(|source| WatchError::Read { source }),
                Err(_would_block) => continue,
            }
        }
    }

    /// Remove the watch and close the descriptor
    ///
    /// A watch the kernel already dropped (the path was deleted or its
    /// filesystem unmounted) is not an error.
    pub fn release(self) -> io::Result<()> {
        let Subscription { fd, wd } = self;
        let InotifyFd { inotify } = fd.into_inner();

        match inotify.watches().remove(wd) {
            Ok(()) => {}
            Err(e) if e.raw_os_error() == Some(Errno::EINVAL as i32) => {
                debug!("inotify watch already removed by the kernel");
            }
            Err(e) => return Err(e),
        }

        inotify.close()
    }
}
