//! Audit log rows and their column layout

use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;

/// Width of every column in the audit file
pub const COLUMN_WIDTH: usize = 40;

/// Timestamp layout: local date and time, second precision
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One row of the audit trail
///
/// Built once per observed event and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    description: String,
    timestamp: String,
    user: String,
}

impl LogEntry {
    /// Create an entry from already formatted parts
    pub fn new(
        description: impl Into<String>,
        timestamp: impl Into<String>,
        user: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            timestamp: timestamp.into(),
            user: user.into(),
        }
    }

    /// Create an entry stamped with the current local time
    pub fn now(description: impl Into<String>, user: impl Into<String>) -> Self {
        Self::new(description, local_timestamp(), user)
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    /// Render the entry as one newline-terminated row
    pub fn to_row(&self) -> String {
        format_row(&self.description, &self.timestamp, &self.user)
    }
}

/// Lay out three left-justified columns followed by a newline
///
/// Values wider than a column are written in full; the next column starts
/// right after them.
pub fn format_row(description: &str, time: &str, user: &str) -> String {
    format!(
        "{:<width$}{:<width$}{:<width$}\n",
        description,
        time,
        user,
        width = COLUMN_WIDTH
    )
}

/// Current local time as `YYYY-MM-DD HH:MM:SS`
pub fn local_timestamp() -> String {
    format_timestamp(&Local::now())
}

/// Format any zoned time with [`TIMESTAMP_FORMAT`]
pub fn format_timestamp<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_row_columns_are_forty_wide() {
        let row = format_row("file modified", "2024-01-03 14:30:00", "alice");

        assert_eq!(row.len(), 3 * COLUMN_WIDTH + 1);
        assert!(row.ends_with('\n'));
        assert_eq!(row[..COLUMN_WIDTH].trim_end(), "file modified");
        assert_eq!(row[COLUMN_WIDTH..2 * COLUMN_WIDTH].trim_end(), "2024-01-03 14:30:00");
        assert_eq!(row[2 * COLUMN_WIDTH..].trim_end(), "alice");
    }

    #[test]
    fn test_wide_field_is_not_truncated() {
        let long = "x".repeat(COLUMN_WIDTH + 5);
        let row = format_row(&long, "t", "u");

        assert!(row.starts_with(&long));
        assert_eq!(&row[long.len()..long.len() + 1], "t");
    }

    #[test]
    fn test_entry_row_matches_format_row() {
        let entry = LogEntry::new("file opened", "2024-01-03 14:30:00", "root");
        assert_eq!(entry.to_row(), format_row("file opened", "2024-01-03 14:30:00", "root"));
        assert_eq!(entry.description(), "file opened");
        assert_eq!(entry.user(), "root");
    }

    #[test]
    fn test_timestamp_format() {
        let at = Utc.with_ymd_and_hms(2024, 1, 3, 14, 30, 5).unwrap();
        assert_eq!(format_timestamp(&at), "2024-01-03 14:30:05");
    }

    #[test]
    fn test_now_has_second_precision() {
        let entry = LogEntry::now("file was read", "bob");
        // YYYY-MM-DD HH:MM:SS
        assert_eq!(entry.timestamp().len(), 19);
        assert_eq!(&entry.timestamp()[4..5], "-");
        assert_eq!(&entry.timestamp()[10..11], " ");
    }
}
