//! Age-based log rotation

use crate::types::{map_file_error, SyncError};
use chrono::{DateTime, Local};
use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

const ARCHIVE_TIME_FORMAT: &str = "%Y%m%d%H%M%S";
const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Archive the log if it has not been modified within `retention_days`
///
/// A stale log is renamed to `<stem>_<YYYYMMDDHHMMSS>.<ext>` next to itself
/// and an empty file is created at the original path. A missing or fresh log
/// is left alone.
///
/// # Returns
/// The archive path when a rotation happened, `None` otherwise
pub fn rotate_if_stale(log_path: &Path, retention_days: u64) -> Result<Option<PathBuf>, SyncError> {
    let metadata = match fs::metadata(log_path) {
        Ok(m) => m,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(map_file_error(log_path, e)),
    };

    let modified = metadata
        .modified()
        .map_err(|e| map_file_error(log_path, e))?;

    let now = SystemTime::now();
    if !is_stale(modified, now, retention_days) {
        return Ok(None);
    }

    let archive = archive_path_for(log_path, DateTime::<Local>::from(now));
    fs::rename(log_path, &archive).map_err(|e| map_file_error(log_path, e))?;
    File::create(log_path).map_err(|e| map_file_error(log_path, e))?;

    Ok(Some(archive))
}

/// True when `modified` lies further back than `retention_days` before `now`
pub fn is_stale(modified: SystemTime, now: SystemTime, retention_days: u64) -> bool {
    let window = Duration::from_secs(retention_days.saturating_mul(SECONDS_PER_DAY));
    match now.checked_sub(window) {
        Some(cutoff) => modified < cutoff,
        None => false,
    }
}

/// Archive name for `log_path` at time `at`, in the same directory
pub fn archive_path_for(log_path: &Path, at: DateTime<Local>) -> PathBuf {
    let stem = log_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "sync_log".to_string());
    let stamp = at.format(ARCHIVE_TIME_FORMAT);
    let file_name = match log_path.extension() {
        Some(ext) => format!("{}_{}.{}", stem, stamp, ext.to_string_lossy()),
        None => format!("{}_{}", stem, stamp),
    };
    log_path.with_file_name(file_name)
}
