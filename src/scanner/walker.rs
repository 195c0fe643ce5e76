//! Flat directory listing

use crate::types::{map_file_error, FileEntry, FileSet, SyncError};
use std::fs;
use std::path::Path;
use std::time::Instant;

/// Scan the immediate contents of a directory and build a FileSet
///
/// Only regular files directly inside `root_path` are listed. Directories are
/// counted but never descended into, and symlinks, pipes, sockets and device
/// nodes are ignored. Hidden files are included; no ignore files are honoured.
///
/// # Errors
/// * The root itself missing, unreadable, or not a directory fails the scan
/// * An entry that vanishes or cannot be stat'ed after being listed is recorded
///   in `FileSet::warnings` and the scan continues
pub fn scan_directory(root_path: &Path) -> Result<FileSet, SyncError> {
    let start_time = Instant::now();

    let root_metadata = fs::metadata(root_path).map_err(|e| map_file_error(root_path, e))?;
    if !root_metadata.is_dir() {
        return Err(SyncError::NotADirectory {
            path: root_path.to_path_buf(),
        });
    }

    let mut set = FileSet::new(root_path.to_path_buf());

    // Depth 1 only; every standard filter off so dotfiles and files named in
    // .gitignore are mirrored like any other file.
    let walker = ignore::WalkBuilder::new(root_path)
        .standard_filters(false)
        .max_depth(Some(1))
        .follow_links(false)
        .build();

    for result in walker {
        // With max_depth(1) nothing below the root is opened, so any
        // traversal error concerns the root listing itself.
        let entry = result.map_err(|e| walk_error(root_path, e))?;

        if entry.depth() == 0 {
            continue;
        }

        let file_type = match entry.file_type() {
            Some(ft) => ft,
            None => continue,
        };

        if file_type.is_dir() {
            set.increment_ignored_dirs();
            continue;
        }

        if !file_type.is_file() {
            continue;
        }

        let metadata = match entry.metadata() {
            Ok(m) => m,
            Err(e) => {
                set.push_warning(
                    entry.path().to_path_buf(),
                    format!("Failed to read metadata: {}", e),
                );
                continue;
            }
        };

        #[cfg(unix)]
        let permissions = {
            use std::os::unix::fs::PermissionsExt;
            metadata.permissions().mode()
        };

        #[cfg(not(unix))]
        let permissions = 0o644;

        let mtime = match metadata.modified() {
            Ok(t) => t,
            Err(e) => {
                set.push_warning(
                    entry.path().to_path_buf(),
                    format!("Failed to read modification time: {}", e),
                );
                continue;
            }
        };

        set.insert(FileEntry::new(
            entry.file_name().to_os_string(),
            metadata.len(),
            mtime,
            permissions,
        ));
    }

    set.set_scan_duration(start_time.elapsed());

    Ok(set)
}

fn walk_error(root_path: &Path, error: ignore::Error) -> SyncError {
    let message = error.to_string();
    match error.into_io_error() {
        Some(io) => map_file_error(root_path, io),
        None => SyncError::Io(std::io::Error::other(format!(
            "Failed to list {}: {}",
            root_path.display(),
            message
        ))),
    }
}
