//! Executor module for file operations

pub mod copy;

use crate::diff::DiffPlan;
use crate::types::{map_file_error, SyncAction, SyncError};
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub use copy::{copy_file_atomic, PART_PREFIX, PART_SUFFIX};

/// Execution statistics for one plan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionStats {
    /// Number of actions that change the replica (Skip excluded).
    pub total_actions: usize,
    /// Number of successfully applied actions.
    pub completed_actions: usize,
    /// Number of failed actions.
    pub failed_actions: usize,
    /// Number of Skip actions in the plan.
    pub skipped: usize,
    /// Aggregate copied bytes (CopyNew + Overwrite).
    pub bytes_copied: u64,
}

/// Events emitted while executing a plan.
#[derive(Debug)]
pub enum ExecutionEvent {
    /// Action execution started.
    ActionStart {
        index: usize,
        total: usize,
        action: &'static str,
        name: OsString,
    },
    /// Action execution succeeded.
    ActionSuccess {
        index: usize,
        total: usize,
        action: &'static str,
        /// Source file (None for deletes)
        source: Option<PathBuf>,
        /// Replica file written or removed
        destination: PathBuf,
        bytes_copied: u64,
    },
    /// Action execution failed but executor continued.
    ActionError {
        index: usize,
        total: usize,
        action: &'static str,
        path: PathBuf,
        error: SyncError,
    },
    /// Plan execution completed (with or without errors).
    Complete { stats: ExecutionStats },
}

/// Optional callback used to receive execution events.
pub type ExecutionCallback = dyn Fn(&ExecutionEvent) + Send + Sync;

/// A planned action that could not be applied.
#[derive(Debug)]
pub struct ActionFailure {
    pub action: &'static str,
    pub path: PathBuf,
    pub error: SyncError,
}

/// Result of executing a plan: what was applied and what failed.
#[derive(Debug, Default)]
pub struct ExecutionOutcome {
    pub stats: ExecutionStats,
    pub applied: Vec<SyncAction>,
    pub failures: Vec<ActionFailure>,
}

/// Execute a sync plan
///
/// Actions run sequentially in plan order. A failing action is reported
/// through `on_event` and recorded in the outcome; the remaining actions still
/// run.
pub fn execute_plan(
    plan: &DiffPlan,
    source_root: &Path,
    replica_root: &Path,
    on_event: Option<&ExecutionCallback>,
) -> ExecutionOutcome {
    let mut outcome = ExecutionOutcome {
        stats: ExecutionStats {
            total_actions: plan.changes().count(),
            skipped: plan.stats.skip_count,
            ..Default::default()
        },
        ..Default::default()
    };
    let total = outcome.stats.total_actions;

    for (idx, action) in plan.changes().enumerate() {
        let index = idx + 1;
        let name = action.name();
        let destination = replica_root.join(name);
        let source = action.is_transfer().then(|| source_root.join(name));

        emit_event(
            on_event,
            ExecutionEvent::ActionStart {
                index,
                total,
                action: action.action_name(),
                name: name.to_os_string(),
            },
        );

        match execute_action(action, source_root, &destination) {
            Ok(bytes) => {
                outcome.stats.completed_actions += 1;
                outcome.stats.bytes_copied += bytes;

                emit_event(
                    on_event,
                    ExecutionEvent::ActionSuccess {
                        index,
                        total,
                        action: action.action_name(),
                        source,
                        destination,
                        bytes_copied: bytes,
                    },
                );
                outcome.applied.push(action.clone());
            }
            Err(err) => {
                outcome.stats.failed_actions += 1;
                let path = source.unwrap_or(destination);

                emit_event(
                    on_event,
                    ExecutionEvent::ActionError {
                        index,
                        total,
                        action: action.action_name(),
                        path: path.clone(),
                        error: err.duplicate(),
                    },
                );

                outcome.failures.push(ActionFailure {
                    action: action.action_name(),
                    path,
                    error: err,
                });
            }
        }
    }

    emit_event(
        on_event,
        ExecutionEvent::Complete {
            stats: outcome.stats.clone(),
        },
    );

    outcome
}

fn execute_action(
    action: &SyncAction,
    source_root: &Path,
    destination: &Path,
) -> Result<u64, SyncError> {
    match action {
        SyncAction::CopyNew(entry) | SyncAction::Overwrite(entry) => {
            copy_file_atomic(&source_root.join(entry.name()), destination)
        }
        SyncAction::Delete(_) => execute_delete(destination).map(|_| 0),
        SyncAction::Skip(_) => Ok(0),
    }
}

/// Remove a replica file; one that is already gone counts as removed.
fn execute_delete(path: &Path) -> Result<(), SyncError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(map_file_error(path, e)),
    }
}

fn emit_event(on_event: Option<&ExecutionCallback>, event: ExecutionEvent) {
    if let Some(callback) = on_event {
        callback(&event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FileEntry;
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, UNIX_EPOCH};

    fn entry(name: &str, size: u64) -> FileEntry {
        FileEntry::new(name, size, UNIX_EPOCH + Duration::from_secs(1_000), 0o644)
    }

    #[test]
    fn test_execute_plan_copy_overwrite_skip() {
        let src = tempfile::tempdir().expect("create src tempdir");
        let dst = tempfile::tempdir().expect("create dst tempdir");

        fs::write(src.path().join("new.txt"), b"new-content").expect("write src new");
        fs::write(src.path().join("keep.txt"), b"updated").expect("write src keep");
        fs::write(dst.path().join("keep.txt"), b"old").expect("write dst keep old");

        let mut plan = DiffPlan::new();
        plan.add_action(SyncAction::CopyNew(entry("new.txt", 11)));
        plan.add_action(SyncAction::Overwrite(entry("keep.txt", 7)));
        plan.add_action(SyncAction::Skip("same.txt".into()));

        let outcome = execute_plan(&plan, src.path(), dst.path(), None);

        assert_eq!(outcome.stats.total_actions, 2);
        assert_eq!(outcome.stats.completed_actions, 2);
        assert_eq!(outcome.stats.failed_actions, 0);
        assert_eq!(outcome.stats.skipped, 1);
        assert_eq!(outcome.stats.bytes_copied, 18);
        assert_eq!(outcome.applied.len(), 2);
        assert_eq!(
            fs::read(dst.path().join("new.txt")).expect("read dst new"),
            b"new-content"
        );
        assert_eq!(
            fs::read(dst.path().join("keep.txt")).expect("read dst keep"),
            b"updated"
        );
    }

    #[test]
    fn test_execute_plan_delete() {
        let src = tempfile::tempdir().expect("create src tempdir");
        let dst = tempfile::tempdir().expect("create dst tempdir");

        fs::write(dst.path().join("old.txt"), b"to-delete").expect("write dst old");

        let mut plan = DiffPlan::new();
        plan.add_action(SyncAction::Delete("old.txt".into()));

        let outcome = execute_plan(&plan, src.path(), dst.path(), None);
        assert_eq!(outcome.stats.failed_actions, 0);
        assert!(!dst.path().join("old.txt").exists());
    }

    #[test]
    fn test_execute_plan_delete_missing_file_is_ok() {
        let src = tempfile::tempdir().expect("create src tempdir");
        let dst = tempfile::tempdir().expect("create dst tempdir");

        let mut plan = DiffPlan::new();
        plan.add_action(SyncAction::Delete("missing.txt".into()));

        let outcome = execute_plan(&plan, src.path(), dst.path(), None);
        assert_eq!(outcome.stats.failed_actions, 0);
        assert_eq!(outcome.stats.completed_actions, 1);
    }

    #[test]
    fn test_execute_plan_continue_on_error() {
        let src = tempfile::tempdir().expect("create src tempdir");
        let dst = tempfile::tempdir().expect("create dst tempdir");

        fs::write(src.path().join("good.txt"), b"good").expect("write src good");

        let mut plan = DiffPlan::new();
        plan.add_action(SyncAction::CopyNew(entry("missing.txt", 10)));
        plan.add_action(SyncAction::CopyNew(entry("good.txt", 4)));

        let outcome = execute_plan(&plan, src.path(), dst.path(), None);

        assert_eq!(outcome.stats.failed_actions, 1);
        assert_eq!(outcome.stats.completed_actions, 1);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].path, src.path().join("missing.txt"));
        assert!(dst.path().join("good.txt").exists());
        let leftovers = fs::read_dir(dst.path())
            .expect("list dst")
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with(copy::PART_PREFIX))
            .count();
        assert_eq!(leftovers, 0, "failed copy must not leave a temporary file");
    }

    #[test]
    fn test_execute_plan_emits_events() {
        let src = tempfile::tempdir().expect("create src tempdir");
        let dst = tempfile::tempdir().expect("create dst tempdir");

        fs::write(src.path().join("new.txt"), b"new-content").expect("write src new");
        let mut plan = DiffPlan::new();
        plan.add_action(SyncAction::CopyNew(entry("new.txt", 11)));
        plan.add_action(SyncAction::Skip("same.txt".into()));

        let events: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let events_ref = Arc::clone(&events);
        let callback = move |event: &ExecutionEvent| {
            let label = match event {
                ExecutionEvent::ActionStart { .. } => "start",
                ExecutionEvent::ActionSuccess { .. } => "success",
                ExecutionEvent::ActionError { .. } => "error",
                ExecutionEvent::Complete { .. } => "complete",
            };
            events_ref
                .lock()
                .expect("lock events")
                .push(label.to_string());
        };

        let outcome = execute_plan(&plan, src.path(), dst.path(), Some(&callback));
        assert_eq!(outcome.stats.failed_actions, 0);

        let snapshot = events.lock().expect("lock events snapshot").clone();
        assert_eq!(snapshot, vec!["start", "success", "complete"]);
    }

    #[test]
    fn test_success_event_carries_full_paths() {
        let src = tempfile::tempdir().expect("create src tempdir");
        let dst = tempfile::tempdir().expect("create dst tempdir");

        fs::write(src.path().join("a.txt"), b"a").expect("write src");
        let mut plan = DiffPlan::new();
        plan.add_action(SyncAction::CopyNew(entry("a.txt", 1)));

        let seen: Arc<Mutex<Option<(Option<PathBuf>, PathBuf)>>> = Arc::new(Mutex::new(None));
        let seen_ref = Arc::clone(&seen);
        let callback = move |event: &ExecutionEvent| {
            if let ExecutionEvent::ActionSuccess {
                source,
                destination,
                ..
            } = event
            {
                *seen_ref.lock().expect("lock") = Some((source.clone(), destination.clone()));
            }
        };

        execute_plan(&plan, src.path(), dst.path(), Some(&callback));

        let (source, destination) = seen.lock().expect("lock").clone().expect("success event");
        assert_eq!(source, Some(src.path().join("a.txt")));
        assert_eq!(destination, dst.path().join("a.txt"));
    }
}
