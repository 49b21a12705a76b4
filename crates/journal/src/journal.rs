//! Append-only audit journal on a plain text file

use std::fs::{File, OpenOptions};
use std::io::{LineWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};
use watchlog_core::{format_row, LogEntry};

/// Errors from journal operations
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Cannot open log file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write log file: {source}")]
    Write {
        #[source]
        source: std::io::Error,
    },

    #[error("Log file is closed")]
    Closed,
}

/// Append-only writer for the audit file
///
/// Existing content is never touched. Each row goes out in one write and is
/// flushed at its newline, so an interrupted run leaves no partial row.
pub struct LogSink {
    /// Location of the audit file
    path: PathBuf,
    /// `None` once closed
    writer: Option<LineWriter<File>>,
    /// Header goes out at most once per sink
    header_written: bool,
    /// Rows written through `write_entry`
    entries_written: u64,
}

impl LogSink {
    /// Open `path` for appending, creating it if absent
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SinkError> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| SinkError::Open {
                path: path.clone(),
                source,
            })?;

        debug!("Opened log file {}", path.display());

        Ok(Self {
            path,
            writer: Some(LineWriter::new(file)),
            header_written: false,
            entries_written: 0,
        })
    }

    /// Write the introductory line and the column header
    ///
    /// Later calls are no-ops.
    pub fn write_header(&mut self, tracked_path: &Path) -> Result<(), SinkError> {
        if self.header_written {
            debug!("Header already written, skipping");
            return Ok(());
        }

        let header = format!(
            "Logging the {}...\n{}",
            tracked_path.display(),
            format_row("DESCRIPTION", "TIME", "USER")
        );
        self.write_text(&header)?;
        self.header_written = true;
        Ok(())
    }

    /// Append one row for `entry`
    pub fn write_entry(&mut self, entry: &LogEntry) -> Result<(), SinkError> {
        self.write_text(&entry.to_row())?;
        self.entries_written += 1;
        Ok(())
    }

    /// Flush and release the file; later calls are no-ops
    pub fn close(&mut self) -> Result<(), SinkError> {
        let Some(mut writer) = self.writer.take() else {
            return Ok(());
        };

        writer.flush().map_err(|source| SinkError::Write { source })?;
        info!(
            "Closed log file {} ({} entries this session)",
            self.path.display(),
            self.entries_written
        );
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        self.writer.is_some()
    }

    pub fn entries_written(&self) -> u64 {
        self.entries_written
    }

    fn write_text(&mut self, text: &str) -> Result<(), SinkError> {
        let writer = self.writer.as_mut().ok_or(SinkError::Closed)?;
        writer
            .write_all(text.as_bytes())
            .and_then(|()| writer.flush())
            .map_err(|source| SinkError::Write { source })
    }
}

impl Drop for LogSink {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!("Failed to close log file {}: {}", self.path.display(), e);
        }
    }
}
