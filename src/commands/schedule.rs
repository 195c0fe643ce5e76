//! The sync loop: rotate, reconcile, sleep, repeat

use crate::commands::sync::{
    format_dry_run_actions, format_plan_preview, preview, reconcile, SyncReport,
};
use crate::config::Config;
use crate::diff::PlanStats;
use crate::logfile::{rotate_if_stale, SyncLog};
use crate::types::SyncError;
use crate::ui::Reporter;
use std::convert::Infallible;

/// Result of one successful cycle
#[derive(Debug)]
pub enum CycleOutcome {
    /// The replica was reconciled
    Synced(SyncReport),
    /// Dry run: the plan was printed, nothing changed
    Previewed(PlanStats),
}

impl CycleOutcome {
    /// True when every file was handled without a per-file failure
    pub fn is_clean(&self) -> bool {
        match self {
            CycleOutcome::Synced(report) => report.is_clean(),
            CycleOutcome::Previewed(_) => true,
        }
    }
}

/// Drives cycles for one prepared `Config`
#[derive(Debug)]
pub struct Scheduler {
    config: Config,
    reporter: Reporter,
}

impl Scheduler {
    /// Create a scheduler logging to `config.log_file`
    pub fn new(config: Config) -> Self {
        let reporter = Reporter::new(SyncLog::new(config.log_file.clone()));
        Self { config, reporter }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn reporter(&self) -> &Reporter {
        &self.reporter
    }

    /// One cycle: rotate the log if stale, then reconcile
    ///
    /// Errors are returned, not reported; see [`Scheduler::cycle`].
    pub fn run_cycle(&self) -> Result<CycleOutcome, SyncError> {
        if self.config.dry_run {
            let plan = preview(&self.config.source, &self.config.replica)?;
            self.reporter.notice(&format_plan_preview(&plan));
            self.reporter.notice(&format_dry_run_actions(&plan));
            return Ok(CycleOutcome::Previewed(plan.stats));
        }

        if let Some(archive) = rotate_if_stale(&self.config.log_file, self.config.retention_days)? {
            self.reporter.notice(&format!(
                "Rotating log file: {} -> {}",
                self.config.log_file.display(),
                archive.display()
            ));
        }

        let report = reconcile(&self.config.source, &self.config.replica, &self.reporter)?;
        Ok(CycleOutcome::Synced(report))
    }

    /// Run one cycle and report its outcome; a failed cycle is reported
    /// (console + log) and never propagated.
    ///
    /// Returns `true` when the cycle completed without any failure.
    pub fn cycle(&self) -> bool {
        match self.run_cycle() {
            Ok(CycleOutcome::Synced(report)) => {
                self.reporter.notice(&report.summary());
                report.is_clean()
            }
            Ok(CycleOutcome::Previewed(_)) => {
                self.reporter.notice("Dry-run mode: no changes were made.");
                true
            }
            Err(e) => {
                self.reporter.error(&e.to_string());
                false
            }
        }
    }

    /// Cycle forever, sleeping `interval_secs` after every cycle
    ///
    /// Only process termination ends the loop. A cycle that hangs on file I/O
    /// stalls the loop; there is no per-cycle timeout.
    pub async fn run_forever(&self) -> Infallible {
        loop {
            self.cycle();
            self.reporter.notice(&format!(
                "Next execution in {} seconds...",
                self.config.interval_secs
            ));
            tokio::time::sleep(self.config.interval()).await;
        }
    }
}
