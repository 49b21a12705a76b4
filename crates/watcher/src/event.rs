//! Raw inotify records
//!
//! Records are decoded by the `inotify` crate; this module turns them into
//! owned values that outlive the read buffer.

use inotify::Event;
use std::ffi::OsStr;

pub use inotify::EventMask;

/// Size of the fixed `inotify_event` header
pub const EVENT_HEADER_LEN: usize = 16;

/// Largest name the kernel can report, including the terminating NUL
pub const NAME_MAX_LEN: usize = 256;

/// Smallest read buffer the kernel accepts for a record carrying a name
pub const MIN_BUFFER_LEN: usize = EVENT_HEADER_LEN + NAME_MAX_LEN;

/// Default read buffer: room for 1024 records with short names
pub const DEFAULT_BUFFER_LEN: usize = 1024 * (EVENT_HEADER_LEN + 16);

/// One inotify record, detached from the buffer it was read into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEvent {
    /// Watch descriptor the record belongs to (-1 for queue overflow)
    pub wd: i32,
    pub mask: EventMask,
    /// Pairs MOVED_FROM with MOVED_TO
    pub cookie: u32,
    /// Length of the name in bytes, without NUL padding
    pub len: u32,
    /// Entry name for events inside a watched directory
    pub name: Option<String>,
}

impl RawEvent {
    pub fn new(wd: i32, mask: EventMask, cookie: u32, name: Option<String>) -> Self {
        let len = name.as_ref().map_or(0, |n| n.len() as u32);
        Self {
            wd,
            mask,
            cookie,
            len,
            name,
        }
    }
}

impl From<Event<&OsStr>> for RawEvent {
    fn from(event: Event<&OsStr>) -> Self {
        RawEvent::new(
            event.wd.get_watch_descriptor_id(),
            event.mask,
            event.cookie,
            event.name.map(|n| n.to_string_lossy().into_owned()),
        )
    }
}
