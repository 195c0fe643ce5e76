//! SyncAction plan generation

use crate::diff::{compare_files, DiffPlan};
use crate::types::{FileSet, SyncAction};

/// Generate a sync plan by comparing the source and replica listings
///
/// - source name missing from replica → `CopyNew`
/// - same name on both sides → content comparison (`Overwrite` or `Skip`)
/// - replica name missing from source → `Delete`
///
/// A pair that cannot be compared (a file vanished or became unreadable after
/// the scan) is recorded in `DiffPlan::failures` and gets no action; the rest
/// of the plan is unaffected.
///
/// # Example
/// ```
/// use flatsync::diff::generate_sync_plan;
/// use flatsync::types::{FileEntry, FileSet};
/// use std::time::UNIX_EPOCH;
///
/// let mut src = FileSet::new("src".into());
/// let mut dst = FileSet::new("dst".into());
/// src.insert(FileEntry::new("new.txt", 4, UNIX_EPOCH, 0o644));
/// dst.insert(FileEntry::new("stale.txt", 9, UNIX_EPOCH, 0o644));
///
/// let plan = generate_sync_plan(&src, &dst);
/// assert_eq!(plan.stats.copy_count, 1);
/// assert_eq!(plan.stats.delete_count, 1);
/// ```
pub fn generate_sync_plan(src_set: &FileSet, dest_set: &FileSet) -> DiffPlan {
    let mut plan = DiffPlan::new();

    for src_entry in src_set.iter() {
        match dest_set.get(src_entry.name()) {
            None => plan.add_action(SyncAction::CopyNew(src_entry.clone())),
            Some(dest_entry) => match compare_files(src_set, src_entry, dest_set, dest_entry) {
                Ok(action) => plan.add_action(action),
                Err(error) => plan.add_failure(
                    src_entry.name.clone(),
                    src_set.path_of(src_entry.name()),
                    error,
                ),
            },
        }
    }

    for dest_entry in dest_set.iter() {
        if !src_set.contains(dest_entry.name()) {
            plan.add_action(SyncAction::Delete(dest_entry.name.clone()));
        }
    }

    plan.sort_by_name();

    plan
}
