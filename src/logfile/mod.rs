//! The sync log: a plain-text, append-only event file
//!
//! Every line is `YYYY-MM-DD HH:MM:SS - <message>` in local time.

mod rotate;

pub use rotate::{archive_path_for, is_stale, rotate_if_stale};

use chrono::{DateTime, Local};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Default log location, relative to the working directory
pub const DEFAULT_LOG_FILE: &str = "sync_log.txt";

/// Default number of days a log may go unmodified before rotation
pub const DEFAULT_RETENTION_DAYS: u64 = 3;

const ENTRY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Appender for the sync log
#[derive(Debug, Clone)]
pub struct SyncLog {
    path: PathBuf,
}

impl SyncLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry stamped with the current local time.
    ///
    /// The file (and its parent directory) is created on first write.
    pub fn append(&self, message: &str) -> std::io::Result<()> {
        self.append_at(Local::now(), message)
    }

    /// Append one entry with an explicit timestamp
    pub fn append_at(&self, at: DateTime<Local>, message: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", format_entry(at, message))
    }
}

/// Render a single log line (without the trailing newline)
pub fn format_entry(at: DateTime<Local>, message: &str) -> String {
    format!("{} - {}", at.format(ENTRY_TIME_FORMAT), message)
}
