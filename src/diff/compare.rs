//! File comparison logic

use crate::hash::compute_digest;
use crate::types::{FileEntry, FileSet, SyncAction, SyncError};

/// Compare a source file with its same-named replica file
///
/// 1. **Size mismatch**: contents cannot be equal → Overwrite
/// 2. **Same size**: compute the full-content digest of both files;
///    digests differ → Overwrite, equal → Skip
///
/// Modification times never take part in the decision, so a replica file
/// that is newer, older, or carries the same mtime as the source is judged
/// by content alone.
///
/// # Errors
/// Returns the IO error of whichever file could not be read (for example,
/// one removed between the scan and the hash).
pub fn compare_files(
    src_set: &FileSet,
    src: &FileEntry,
    dest_set: &FileSet,
    dest: &FileEntry,
) -> Result<SyncAction, SyncError> {
    if src.size != dest.size {
        return Ok(SyncAction::Overwrite(src.clone()));
    }

    let src_digest = match src.digest {
        Some(d) => d,
        None => compute_digest(&src_set.path_of(src.name()))?,
    };
    let dest_digest = match dest.digest {
        Some(d) => d,
        None => compute_digest(&dest_set.path_of(dest.name()))?,
    };

    if src_digest == dest_digest {
        Ok(SyncAction::Skip(src.name.clone()))
    } else {
        Ok(SyncAction::Overwrite(src.clone().with_digest(src_digest)))
    }
}
