//! Diff engine types

use crate::types::{SyncAction, SyncError};
use std::ffi::OsString;
use std::path::PathBuf;

/// Diff plan containing actions, statistics and files that could not be compared
#[derive(Debug, Default)]
pub struct DiffPlan {
    /// List of sync actions to execute
    pub actions: Vec<SyncAction>,

    /// Aggregate statistics about the plan
    pub stats: PlanStats,

    /// Files whose comparison failed; they get no action this cycle
    pub failures: Vec<PlanFailure>,
}

/// A same-named file pair that could not be compared
#[derive(Debug)]
pub struct PlanFailure {
    pub name: OsString,
    pub path: PathBuf,
    pub error: SyncError,
}

impl DiffPlan {
    /// Create a new empty diff plan
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an action to the plan and update statistics
    pub fn add_action(&mut self, action: SyncAction) {
        match &action {
            SyncAction::CopyNew(entry) => {
                self.stats.copy_count += 1;
                self.stats.total_files += 1;
                self.stats.total_bytes += entry.size;
            }
            SyncAction::Overwrite(entry) => {
                self.stats.overwrite_count += 1;
                self.stats.total_files += 1;
                self.stats.total_bytes += entry.size;
            }
            SyncAction::Delete(_) => {
                self.stats.delete_count += 1;
            }
            SyncAction::Skip(_) => {
                self.stats.skip_count += 1;
            }
        }

        self.actions.push(action);
    }

    /// Record a comparison failure
    pub fn add_failure(&mut self, name: OsString, path: PathBuf, error: SyncError) {
        self.failures.push(PlanFailure { name, path, error });
    }

    /// Sort actions by file name for deterministic output
    pub fn sort_by_name(&mut self) {
        self.actions.sort_by(|a, b| a.name().cmp(b.name()));
    }

    /// True when at least one action would change the replica
    pub fn has_changes(&self) -> bool {
        self.actions.iter().any(|action| !action.is_skip())
    }

    /// Iterator over the actions that change the replica
    pub fn changes(&self) -> impl Iterator<Item = &SyncAction> {
        self.actions.iter().filter(|action| !action.is_skip())
    }
}

/// Statistics about a diff plan
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlanStats {
    /// Total number of files to transfer (CopyNew + Overwrite)
    pub total_files: usize,

    /// Total bytes to transfer (CopyNew + Overwrite)
    pub total_bytes: u64,

    pub copy_count: usize,
    pub overwrite_count: usize,
    pub delete_count: usize,
    pub skip_count: usize,
}
