//! Event classification
//!
//! Maps a raw mask to exactly one category. When several known bits are set
//! the first match in [`PRIORITY`] wins.

use crate::event::EventMask;
use std::fmt;

/// Semantic category of a filesystem event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventCategory {
    /// File content was read
    Read,
    /// Permissions, timestamps, ownership or link count changed
    MetadataChanged,
    /// A file opened for writing was closed
    ClosedAfterWrite,
    /// Entry created inside a watched directory
    EntryCreated,
    /// Entry deleted from a watched directory
    EntryDeleted,
    /// The watched path itself was deleted
    SelfDeleted,
    /// File content was modified
    Modified,
    /// Watched path or an entry of it was moved
    Moved,
    /// File or directory was opened
    Opened,
    /// No recognized bit set
    Unknown,
}

impl EventCategory {
    /// Text written to the DESCRIPTION column
    pub const fn as_str(self) -> &'static str {
        match self {
            EventCategory::Read => "file was read",
            EventCategory::MetadataChanged => "metadata modified",
            EventCategory::ClosedAfterWrite => "file was open and closed for write",
            EventCategory::EntryCreated => "file created inside tracked catalog",
            EventCategory::EntryDeleted => "file deleted from tracked catalog",
            EventCategory::SelfDeleted => "file was deleted",
            EventCategory::Modified => "file modified",
            EventCategory::Moved => "file moved",
            EventCategory::Opened => "file opened",
            EventCategory::Unknown => "Unknown action",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bits checked by [`classify`], highest priority first
pub const PRIORITY: [(EventMask, EventCategory); 9] = [
    (EventMask::ACCESS, EventCategory::Read),
    (EventMask::ATTRIB, EventCategory::MetadataChanged),
    (EventMask::CLOSE_WRITE, EventCategory::ClosedAfterWrite),
    (EventMask::CREATE, EventCategory::EntryCreated),
    (EventMask::DELETE, EventCategory::EntryDeleted),
    (EventMask::DELETE_SELF, EventCategory::SelfDeleted),
    (EventMask::MODIFY, EventCategory::Modified),
    (
        EventMask::MOVE_SELF
            .union(EventMask::MOVED_FROM)
            .union(EventMask::MOVED_TO),
        EventCategory::Moved,
    ),
    (EventMask::OPEN, EventCategory::Opened),
];

/// Classify a raw mask
pub fn classify(mask: EventMask) -> EventCategory {
    PRIORITY
        .iter()
        .find(|(bits, _)| mask.intersects(*bits))
        .map(|&(_, category)| category)
        .unwrap_or(EventCategory::Unknown)
}
