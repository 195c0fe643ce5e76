//! One reconciliation pass: scan, plan, apply, report

use crate::diff::{generate_sync_plan, DiffPlan};
use crate::executor::{execute_plan, ActionFailure, ExecutionEvent, ExecutionStats};
use crate::scanner::scan_directory;
use crate::types::{SyncAction, SyncError};
use crate::ui::Reporter;
use indicatif::HumanBytes;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// What a reconciliation pass did
#[derive(Debug, Default)]
pub struct SyncReport {
    /// Copy / Overwrite / Delete actions that were applied
    pub applied: Vec<SyncAction>,
    /// Per-file failures (scan, compare, or apply); the rest of the pass ran
    pub failures: Vec<ActionFailure>,
    pub stats: ExecutionStats,
}

impl SyncReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn count(&self, action: &str) -> usize {
        self.applied
            .iter()
            .filter(|a| a.action_name() == action)
            .count()
    }

    /// One-line cycle summary
    pub fn summary(&self) -> String {
        let head = if self.is_clean() {
            "Synchronization completed".to_string()
        } else {
            format!(
                "Synchronization completed with {} error(s)",
                self.failures.len()
            )
        };
        format!(
            "{}: {} copied, {} updated, {} removed, {} unchanged ({} transferred)",
            head,
            self.count("Copy"),
            self.count("Update"),
            self.count("Delete"),
            self.stats.skipped,
            HumanBytes(self.stats.bytes_copied)
        )
    }
}

/// Make `replica` hold exactly the top-level files of `source`
///
/// Every applied action and every per-file failure goes through `reporter`
/// (console line + log entry) as it happens.
///
/// # Errors
/// Only listing either directory can fail the whole pass. Files that vanish,
/// cannot be hashed, copied, or removed are recorded in
/// `SyncReport::failures` and do not stop the remaining work.
pub fn reconcile(
    source: &Path,
    replica: &Path,
    reporter: &Reporter,
) -> Result<SyncReport, SyncError> {
    let plan = scan_and_plan(source, replica)?;

    let mut report = SyncReport::default();
    collect_plan_failures(&plan, reporter, &mut report);

    let events = reporter.clone();
    let on_event = move |event: &ExecutionEvent| match event {
        ExecutionEvent::ActionSuccess {
            action,
            source,
            destination,
            ..
        } => events.info(&format_action_line(action, source.as_deref(), destination)),
        ExecutionEvent::ActionError {
            action,
            path,
            error,
            ..
        } => events.error(&format!(
            "{} failed for {}: {}",
            action,
            path.display(),
            error
        )),
        ExecutionEvent::ActionStart { .. } | ExecutionEvent::Complete { .. } => {}
    };

    let outcome = execute_plan(&plan, source, replica, Some(&on_event));

    report.applied = outcome.applied;
    report.failures.extend(outcome.failures);
    report.stats = outcome.stats;

    if !report.is_clean() {
        let records: Vec<ErrorRecord> = report
            .failures
            .iter()
            .map(|f| ErrorRecord::new(Some(f.path.as_path()), &f.error))
            .collect();
        reporter.notice(&format_error_summary(&records));
    }

    Ok(report)
}

/// Scan both sides and build the plan without changing anything
pub fn preview(source: &Path, replica: &Path) -> Result<DiffPlan, SyncError> {
    scan_and_plan(source, replica)
}

fn scan_and_plan(source: &Path, replica: &Path) -> Result<DiffPlan, SyncError> {
    let mut src_set = scan_directory(source)?;
    let mut dest_set = scan_directory(replica)?;

    let mut plan = generate_sync_plan(&src_set, &dest_set);

    for warning in src_set.warnings.drain(..).chain(dest_set.warnings.drain(..)) {
        plan.add_failure(
            warning
                .path
                .file_name()
                .map(|n| n.to_os_string())
                .unwrap_or_default(),
            warning.path,
            SyncError::Io(std::io::Error::other(warning.message)),
        );
    }

    Ok(plan)
}

fn collect_plan_failures(plan: &DiffPlan, reporter: &Reporter, report: &mut SyncReport) {
    for failure in &plan.failures {
        reporter.error(&format!(
            "Skipped {}: {}",
            failure.path.display(),
            failure.error
        ));
        report.failures.push(ActionFailure {
            action: "Compare",
            path: failure.path.clone(),
            error: failure.error.duplicate(),
        });
    }
}

/// Console/log line for an applied action
pub fn format_action_line(action: &str, source: Option<&Path>, destination: &Path) -> String {
    match (action, source) {
        ("Copy", Some(src)) => format!("Copied: {} -> {}", src.display(), destination.display()),
        ("Update", Some(src)) => {
            format!("Updated: {} -> {}", src.display(), destination.display())
        }
        ("Delete", _) => format!("Removed: {}", destination.display()),
        (other, _) => format!("{}: {}", other, destination.display()),
    }
}

pub fn format_plan_preview(plan: &DiffPlan) -> String {
    format!(
        "Plan:\n  Copy: {}  Update: {}  Delete: {}  Skip: {}\n  Total bytes to transfer: {}",
        plan.stats.copy_count,
        plan.stats.overwrite_count,
        plan.stats.delete_count,
        plan.stats.skip_count,
        HumanBytes(plan.stats.total_bytes)
    )
}

pub fn format_dry_run_actions(plan: &DiffPlan) -> String {
    if !plan.has_changes() && plan.failures.is_empty() {
        return "Dry-run actions:\n  (no planned actions)".to_string();
    }

    let mut lines = Vec::with_capacity(plan.actions.len() + 1);
    lines.push("Dry-run actions:".to_string());
    for action in plan.changes() {
        let label = match action {
            SyncAction::CopyNew(_) => "COPY",
            SyncAction::Overwrite(_) => "UPDATE",
            SyncAction::Delete(_) => "DELETE",
            SyncAction::Skip(_) => continue,
        };
        lines.push(format!("  {:<9} {}", label, action.name().to_string_lossy()));
    }
    for failure in &plan.failures {
        lines.push(format!(
            "  {:<9} {} ({})",
            "UNREADABLE",
            failure.path.display(),
            failure.error
        ));
    }

    if plan.stats.skip_count > 0 {
        lines.push(format!(
            "  ({} unchanged file(s) omitted)",
            plan.stats.skip_count
        ));
    }

    lines.join("\n")
}

#[derive(Debug)]
struct ErrorRecord {
    kind: &'static str,
    path: Option<PathBuf>,
    message: String,
    suggestion: Option<String>,
}

impl ErrorRecord {
    fn new(path: Option<&Path>, error: &SyncError) -> Self {
        let (message, suggestion) = humanize_error(error);
        Self {
            kind: error_kind_label(error),
            path: path.map(PathBuf::from),
            message,
            suggestion,
        }
    }
}

fn humanize_error(error: &SyncError) -> (String, Option<String>) {
    match error {
        SyncError::Io(io) => match io.kind() {
            ErrorKind::NotFound => (
                "File was removed or renamed during the cycle".to_string(),
                Some("Nothing to do; the next cycle picks up the current state.".to_string()),
            ),
            ErrorKind::PermissionDenied => (
                "Permission denied while accessing file".to_string(),
                Some("Check file permissions or run with a user that has access.".to_string()),
            ),
            ErrorKind::WriteZero | ErrorKind::BrokenPipe | ErrorKind::UnexpectedEof => (
                "File transfer was interrupted before completion".to_string(),
                Some("The next cycle retries; check disk stability if it persists.".to_string()),
            ),
            _ => (
                format!("I/O operation failed: {}", io),
                Some(
                    "The next cycle retries. If this keeps happening, check disk health and permissions."
                        .to_string(),
                ),
            ),
        },
        SyncError::PermissionDenied { .. } => (
            "Permission denied while accessing file".to_string(),
            Some("Check file permissions or run with a user that has access.".to_string()),
        ),
        SyncError::DiskFull { .. } => (
            "Not enough disk space to complete operation".to_string(),
            Some("Free disk space on the replica volume.".to_string()),
        ),
        SyncError::NotADirectory { .. } => (
            error.to_string(),
            Some("Remove or rename the conflicting path.".to_string()),
        ),
        SyncError::SourceMissing { .. } => (error.to_string(), None),
        SyncError::Config(msg) => (msg.clone(), None),
    }
}

fn error_kind_label(error: &SyncError) -> &'static str {
    match error {
        SyncError::Io(_) => "I/O error",
        SyncError::Config(_) => "Configuration error",
        SyncError::SourceMissing { .. } => "Missing source",
        SyncError::NotADirectory { .. } => "Not a directory",
        SyncError::PermissionDenied { .. } => "Permission denied",
        SyncError::DiskFull { .. } => "Disk full",
    }
}

fn format_error_summary(records: &[ErrorRecord]) -> String {
    let mut groups: BTreeMap<&'static str, Vec<&ErrorRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.kind).or_default().push(record);
    }

    let mut lines = Vec::new();
    lines.push("Error summary:".to_string());
    for (kind, items) in groups {
        lines.push(format!("  {} ({}):", kind, items.len()));
        for record in items.iter().take(3) {
            lines.push(format!("    - {}", record.message));
            if let Some(path) = &record.path {
                lines.push(format!("      Path: {}", path.display()));
            }
            if let Some(suggestion) = &record.suggestion {
                lines.push(format!("      Try: {}", suggestion));
            }
        }
        if items.len() > 3 {
            lines.push(format!("    - ... {} more", items.len() - 3));
        }
    }
    lines.join("\n")
}
