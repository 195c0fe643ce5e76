//! Console + sync log reporting

use crate::logfile::SyncLog;
use console::style;
use std::path::Path;

/// Sends every reportable event to the console and, where it belongs in the
/// record, to the sync log.
#[derive(Debug, Clone)]
pub struct Reporter {
    log: SyncLog,
}

impl Reporter {
    pub fn new(log: SyncLog) -> Self {
        Self { log }
    }

    pub fn log_path(&self) -> &Path {
        self.log.path()
    }

    /// Normal event: stdout line and log entry
    pub fn info(&self, message: &str) {
        println!("{}", message);
        self.write_log(message);
    }

    /// Error event: `ERROR:`-prefixed stderr line and log entry
    pub fn error(&self, message: &str) {
        let line = self.error_console(message);
        self.write_log(&line);
    }

    /// `ERROR:`-prefixed stderr line only; returns the line as printed
    pub fn error_console(&self, message: &str) -> String {
        let line = format!("ERROR: {}", message);
        eprintln!("{}", style(&line).red());
        line
    }

    /// Console-only line (banners, rotation notices, summaries)
    pub fn notice(&self, message: &str) {
        println!("{}", style(message).dim());
    }

    fn write_log(&self, message: &str) {
        if let Err(e) = self.log.append(message) {
            eprintln!(
                "Warning: failed to write to log file {}: {}",
                self.log.path().display(),
                e
            );
        }
    }
}
