//! Core type definitions for flatsync

mod action;
mod entry;
mod error;
mod file_set;

pub use action::SyncAction;
pub use entry::{ContentDigest, FileEntry};
pub use error::{map_file_error, SyncError};
pub use file_set::{FileSet, ScanWarning};
