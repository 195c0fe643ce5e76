//! Configuration management

mod prompt;

pub use prompt::{prompt_target, PromptedTarget};

use crate::logfile::{DEFAULT_LOG_FILE, DEFAULT_RETENTION_DAYS};
use crate::types::{map_file_error, SyncError};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(
    name = "flatsync",
    version,
    about = "Mirror the top-level files of a folder into a replica folder on a fixed interval"
)]
pub struct Cli {
    /// Source folder (authoritative)
    #[arg(value_name = "SOURCE")]
    pub source: Option<PathBuf>,

    /// Replica folder (created if missing; fully owned by flatsync)
    #[arg(value_name = "REPLICA")]
    pub replica: Option<PathBuf>,

    /// Seconds to wait between synchronization cycles
    #[arg(value_name = "INTERVAL", value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,

    /// Log file path; archives are written next to it
    #[arg(long, value_name = "PATH", env = "FLATSYNC_LOG_FILE", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Days a log may go unmodified before it is archived
    #[arg(
        long,
        value_name = "DAYS",
        env = "FLATSYNC_RETENTION_DAYS",
        default_value_t = DEFAULT_RETENTION_DAYS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub retention_days: u64,

    /// Run a single cycle and exit
    #[arg(long)]
    pub once: bool,

    /// Show what would change without touching the replica or the log
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// All three positionals present; otherwise the binary prompts for them
    pub fn has_target(&self) -> bool {
        self.source.is_some() && self.replica.is_some() && self.interval.is_some()
    }
}

/// Global configuration for flatsync
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Source directory
    pub source: PathBuf,

    /// Replica directory
    pub replica: PathBuf,

    /// Seconds between cycles (always >= 1)
    pub interval_secs: u64,

    /// Active log file
    pub log_file: PathBuf,

    /// Log retention window in days (always >= 1)
    pub retention_days: u64,

    /// Stop after one cycle
    pub once: bool,

    /// Plan only
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: PathBuf::new(),
            replica: PathBuf::new(),
            interval_secs: 60,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            retention_days: DEFAULT_RETENTION_DAYS,
            once: false,
            dry_run: false,
        }
    }
}

impl TryFrom<Cli> for Config {
    type Error = SyncError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let (source, replica, interval_secs) = match (cli.source, cli.replica, cli.interval) {
            (Some(source), Some(replica), Some(interval)) => (source, replica, interval),
            _ => {
                return Err(SyncError::Config(
                    "source, replica and interval are all required".to_string(),
                ))
            }
        };

        let config = Self {
            source,
            replica,
            interval_secs,
            log_file: cli.log_file,
            retention_days: cli.retention_days,
            once: cli.once,
            dry_run: cli.dry_run,
        };
        config.validate()?;
        Ok(config)
    }
}

impl Config {
    /// Build a config from interactively prompted values plus CLI flags
    pub fn from_prompt(target: PromptedTarget, cli: &Cli) -> Result<Self, SyncError> {
        let config = Self {
            source: target.source,
            replica: target.replica,
            interval_secs: target.interval_secs,
            log_file: cli.log_file.clone(),
            retention_days: cli.retention_days,
            once: cli.once,
            dry_run: cli.dry_run,
        };
        config.validate()?;
        Ok(config)
    }

    /// Pure value checks (no filesystem access)
    pub fn validate(&self) -> Result<(), SyncError> {
        if self.source.as_os_str().is_empty() {
            return Err(SyncError::Config("Source path is empty".to_string()));
        }
        if self.replica.as_os_str().is_empty() {
            return Err(SyncError::Config("Replica path is empty".to_string()));
        }
        if self.interval_secs == 0 {
            return Err(SyncError::Config(
                "Interval must be a positive number of seconds".to_string(),
            ));
        }
        if self.retention_days == 0 {
            return Err(SyncError::Config(
                "Retention must be a positive number of days".to_string(),
            ));
        }
        if self.source == self.replica {
            return Err(SyncError::Config(
                "Source and replica cannot be the same".to_string(),
            ));
        }
        Ok(())
    }

    /// Startup validation against the filesystem
    ///
    /// - the source must exist and be a directory
    /// - the replica is created when missing, and must be a directory
    /// - both are resolved to absolute paths, and must not be the same folder
    ///
    /// Returns `true` in the second field when the replica had to be created.
    pub fn prepare(mut self) -> Result<(Self, bool), SyncError> {
        self.validate()?;

        let source_metadata = match fs::metadata(&self.source) {
            Ok(m) => m,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SyncError::SourceMissing {
                    path: self.source.clone(),
                })
            }
            Err(e) => return Err(map_file_error(&self.source, e)),
        };
        if !source_metadata.is_dir() {
            return Err(SyncError::NotADirectory {
                path: self.source.clone(),
            });
        }

        let mut created_replica = false;
        match fs::metadata(&self.replica) {
            Ok(m) if m.is_dir() => {}
            Ok(_) => {
                return Err(SyncError::NotADirectory {
                    path: self.replica.clone(),
                })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                fs::create_dir_all(&self.replica).map_err(|e| map_file_error(&self.replica, e))?;
                created_replica = true;
            }
            Err(e) => return Err(map_file_error(&self.replica, e)),
        }

        self.source = fs::canonicalize(&self.source).map_err(|e| map_file_error(&self.source, e))?;
        self.replica =
            fs::canonicalize(&self.replica).map_err(|e| map_file_error(&self.replica, e))?;

        if self.source == self.replica {
            return Err(SyncError::Config(
                "Source and replica cannot be the same".to_string(),
            ));
        }

        Ok((self, created_replica))
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}
