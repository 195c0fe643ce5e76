//! Hashing utilities

use crate::types::{map_file_error, ContentDigest, SyncError};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Compute the 128-bit content digest of a file
///
/// The whole file is streamed through Blake3 in 64KB chunks and the first
/// 16 bytes of the extendable output are kept. Every byte participates; there
/// is no prefix shortcut.
///
/// # Example
/// ```no_run
/// use flatsync::hash::compute_digest;
/// use std::path::Path;
///
/// let digest = compute_digest(Path::new("file.txt"))?;
/// assert_eq!(digest.len(), 16);
/// # Ok::<(), flatsync::SyncError>(())
/// ```
pub fn compute_digest(file_path: &Path) -> Result<ContentDigest, SyncError> {
    let mut file = File::open(file_path).map_err(|e| map_file_error(file_path, e))?;
    let mut hasher = blake3::Hasher::new();
    let mut buffer = vec![0u8; 64 * 1024];

    loop {
        let bytes_read = file
            .read(&mut buffer)
            .map_err(|e| map_file_error(file_path, e))?;

        if bytes_read == 0 {
            break; // EOF
        }

        hasher.update(&buffer[0..bytes_read]);
    }

    let mut digest = [0u8; 16];
    hasher.finalize_xof().fill(&mut digest);
    Ok(digest)
}
