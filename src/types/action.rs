//! SyncAction - Actions determined by the diff engine

use super::FileEntry;
use std::ffi::{OsStr, OsString};

/// Sync action determined by diff engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncAction {
    /// Copy new file (exists in source, missing in replica)
    CopyNew(FileEntry),

    /// Overwrite existing file (source and replica content differ)
    Overwrite(FileEntry),

    /// Delete file (exists in replica, missing in source)
    Delete(OsString),

    /// Skip (content identical)
    Skip(OsString),
}

impl SyncAction {
    /// Short label used in events and console output
    pub fn action_name(&self) -> &'static str {
        match self {
            SyncAction::CopyNew(_) => "Copy",
            SyncAction::Overwrite(_) => "Update",
            SyncAction::Delete(_) => "Delete",
            SyncAction::Skip(_) => "Skip",
        }
    }

    /// File name the action applies to
    pub fn name(&self) -> &OsStr {
        match self {
            SyncAction::CopyNew(entry) | SyncAction::Overwrite(entry) => entry.name(),
            SyncAction::Delete(name) | SyncAction::Skip(name) => name,
        }
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, SyncAction::Skip(_))
    }

    /// True for actions that write file content into the replica
    pub fn is_transfer(&self) -> bool {
        matches!(self, SyncAction::CopyNew(_) | SyncAction::Overwrite(_))
    }
}
