//! # flatsync - One-way flat folder mirroring
//!
//! Keeps a replica folder identical to the top-level files of a source folder.
//! Every cycle rotates a stale log, compares files by content digest, copies
//! what is new or changed, removes what the source no longer has, and then
//! sleeps for a fixed interval.

pub mod commands;
pub mod config;
pub mod diff;
pub mod executor;
pub mod hash;
pub mod logfile;
pub mod scanner;
pub mod types;
pub mod ui;

// Re-export commonly used types
pub use commands::{reconcile, Scheduler, SyncReport};
pub use config::{Cli, Config};
pub use types::{FileEntry, FileSet, SyncAction, SyncError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
