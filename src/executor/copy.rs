//! Atomic file copy implementation

use crate::types::{map_file_error, SyncError};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

/// Name prefix of the temporary file a copy is written to
pub const PART_PREFIX: &str = ".flatsync-";

/// Name suffix of the temporary file a copy is written to
pub const PART_SUFFIX: &str = ".part";

/// Copy a file atomically using the write-then-rename strategy
///
/// 1. Stream the source into a fresh `.flatsync-XXXXXX.part` file next to
///    `dest`, created exclusively so no existing file is ever reused
/// 2. Flush and sync to disk
/// 3. Preserve metadata (permissions, mtime)
/// 4. Rename over `dest`, replacing any existing file
///
/// A failure at any step removes the temporary file and leaves `dest`
/// untouched.
///
/// # Returns
/// Number of bytes copied
///
/// # Example
/// ```no_run
/// use flatsync::executor::copy_file_atomic;
/// use std::path::Path;
///
/// let bytes = copy_file_atomic(Path::new("source.txt"), Path::new("replica/source.txt"))?;
/// # Ok::<(), flatsync::SyncError>(())
/// ```
pub fn copy_file_atomic(src: &Path, dest: &Path) -> Result<u64, SyncError> {
    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    // Dropping `part` on any early return deletes the temporary file.
    let mut part = tempfile::Builder::new()
        .prefix(PART_PREFIX)
        .suffix(PART_SUFFIX)
        .tempfile_in(dir)
        .map_err(|e| map_file_error(dir, e))?;

    let part_path = part.path().to_path_buf();
    let total_bytes = write_part_file(src, part.as_file_mut(), &part_path)?;

    part.persist(dest).map_err(|e| map_file_error(dest, e.error))?;

    Ok(total_bytes)
}

fn write_part_file(src: &Path, part_file: &mut File, part_path: &Path) -> Result<u64, SyncError> {
    let mut src_file = File::open(src).map_err(|e| map_file_error(src, e))?;

    let mut buffer = vec![0u8; 128 * 1024];
    let mut total_bytes = 0u64;

    loop {
        let bytes_read = src_file.read(&mut buffer).map_err(|e| map_file_error(src, e))?;

        if bytes_read == 0 {
            break; // EOF
        }

        part_file
            .write_all(&buffer[0..bytes_read])
            .map_err(|e| map_file_error(part_path, e))?;
        total_bytes += bytes_read as u64;
    }

    part_file
        .sync_all()
        .map_err(|e| map_file_error(part_path, e))?;

    let src_metadata = fs::metadata(src).map_err(|e| map_file_error(src, e))?;

    part_file
        .set_permissions(src_metadata.permissions())
        .map_err(|e| map_file_error(part_path, e))?;

    let mtime = src_metadata.modified().map_err(|e| map_file_error(src, e))?;
    filetime::set_file_handle_times(
        part_file,
        None,
        Some(filetime::FileTime::from_system_time(mtime)),
    )
    .map_err(|e| map_file_error(part_path, e))?;

    Ok(total_bytes)
}
