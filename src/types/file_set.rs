//! FileSet - The top-level files of one directory

use super::FileEntry;
use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::time::Duration;

/// An entry the scanner saw but could not read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanWarning {
    pub path: PathBuf,
    pub message: String,
}

/// Flat file listing of a directory, keyed by base name
#[derive(Debug, Clone, PartialEq)]
pub struct FileSet {
    /// Map: file name → FileEntry (ordered, so plans are deterministic)
    pub entries: BTreeMap<OsString, FileEntry>,

    /// Aggregate statistics
    pub total_size: u64,
    pub total_files: usize,
    pub ignored_dirs: usize,

    /// Entries that vanished or were unreadable during the scan
    pub warnings: Vec<ScanWarning>,

    /// Scan metadata
    pub scan_duration: Duration,
    pub root_path: PathBuf,
}

impl FileSet {
    /// Create a new empty FileSet
    pub fn new(root_path: PathBuf) -> Self {
        Self {
            entries: BTreeMap::new(),
            total_size: 0,
            total_files: 0,
            ignored_dirs: 0,
            warnings: Vec::new(),
            scan_duration: Duration::from_secs(0),
            root_path,
        }
    }

    /// Insert a file entry, keyed by its name.
    ///
    /// If the name already exists, the old entry is replaced and statistics are adjusted.
    pub fn insert(&mut self, entry: FileEntry) {
        if let Some(old_entry) = self.entries.get(entry.name()) {
            self.total_size = self.total_size.saturating_sub(old_entry.size);
            self.total_files = self.total_files.saturating_sub(1);
        }

        self.total_size += entry.size;
        self.total_files += 1;
        self.entries.insert(entry.name.clone(), entry);
    }

    /// Get a file entry by name
    pub fn get(&self, name: &OsStr) -> Option<&FileEntry> {
        self.entries.get(name)
    }

    /// Check if a name exists in the set
    pub fn contains(&self, name: &OsStr) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterator over entries in name order
    pub fn iter(&self) -> impl Iterator<Item = &FileEntry> {
        self.entries.values()
    }

    /// Iterator over just the names
    pub fn names(&self) -> impl Iterator<Item = &OsString> {
        self.entries.keys()
    }

    /// Absolute (root-joined) path of a file in this set
    pub fn path_of(&self, name: &OsStr) -> PathBuf {
        self.root_path.join(name)
    }

    pub fn set_scan_duration(&mut self, duration: Duration) {
        self.scan_duration = duration;
    }

    pub fn increment_ignored_dirs(&mut self) {
        self.ignored_dirs += 1;
    }

    pub fn push_warning(&mut self, path: PathBuf, message: impl Into<String>) {
        self.warnings.push(ScanWarning {
            path,
            message: message.into(),
        });
    }
}
