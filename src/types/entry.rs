//! FileEntry - A single top-level file found by a directory scan

use std::ffi::{OsStr, OsString};
use std::time::SystemTime;

/// 128-bit content fingerprint of a file's full byte stream
pub type ContentDigest = [u8; 16];

/// Represents one regular file directly inside a scanned directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Base name of the file (never contains a path separator)
    pub name: OsString,

    /// File size in bytes
    pub size: u64,

    /// Last modification time
    pub mtime: SystemTime,

    /// Unix permissions (mode bits)
    pub permissions: u32,

    /// Content digest (computed lazily, only when a comparison needs it)
    pub digest: Option<ContentDigest>,
}

impl FileEntry {
    /// Create a new FileEntry with the given parameters
    pub fn new(name: impl Into<OsString>, size: u64, mtime: SystemTime, permissions: u32) -> Self {
        Self {
            name: name.into(),
            size,
            mtime,
            permissions,
            digest: None,
        }
    }

    /// Set the digest for this file entry
    pub fn with_digest(mut self, digest: ContentDigest) -> Self {
        self.digest = Some(digest);
        self
    }

    /// Check if this entry has a computed digest
    pub fn has_digest(&self) -> bool {
        self.digest.is_some()
    }

    /// Borrow the name as an `OsStr`
    pub fn name(&self) -> &OsStr {
        &self.name
    }

    /// Lossy display form of the name, for messages
    pub fn display_name(&self) -> String {
        self.name.to_string_lossy().into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn test_new_file_entry() {
        let mtime = UNIX_EPOCH + Duration::from_secs(1000);
        let entry = FileEntry::new("file.txt", 1024, mtime, 0o644);

        assert_eq!(entry.name(), OsStr::new("file.txt"));
        assert_eq!(entry.size, 1024);
        assert_eq!(entry.mtime, mtime);
        assert_eq!(entry.permissions, 0o644);
        assert_eq!(entry.digest, None);
    }

    #[test]
    fn test_with_digest() {
        let entry = FileEntry::new("file.txt", 2048, UNIX_EPOCH, 0o755).with_digest([42u8; 16]);

        assert_eq!(entry.digest, Some([42u8; 16]));
        assert!(entry.has_digest());
    }

    #[test]
    fn test_has_digest_returns_false_when_no_digest() {
        let entry = FileEntry::new("file.txt", 512, UNIX_EPOCH, 0o600);
        assert!(!entry.has_digest());
    }

    #[test]
    fn test_display_name() {
        let entry = FileEntry::new("report final.pdf", 0, UNIX_EPOCH, 0o644);
        assert_eq!(entry.display_name(), "report final.pdf");
    }
}
