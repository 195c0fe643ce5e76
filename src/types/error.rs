//! Error types for flatsync

use std::io::{Error as IoError, ErrorKind};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error types for flatsync operations
#[derive(Debug, Error)]
pub enum SyncError {
    /// Standard IO error (automatically converted via #[from])
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration or startup input
    #[error("Configuration error: {0}")]
    Config(String),

    /// Source directory is missing at startup
    #[error("The source folder '{}' does not exist", path.display())]
    SourceMissing { path: PathBuf },

    /// A path that must be a directory is something else
    #[error("Not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    /// Permission denied for specific path
    #[error("Permission denied: {}", path.display())]
    PermissionDenied { path: PathBuf },

    /// Disk full while writing a specific path
    #[error("Disk full while writing {}", path.display())]
    DiskFull { path: PathBuf },
}

impl SyncError {
    /// Check if this error comes from invalid configuration or input
    pub fn is_config_error(&self) -> bool {
        matches!(self, SyncError::Config(_))
    }

    /// Check if this error is related to permissions
    pub fn is_permission_error(&self) -> bool {
        matches!(self, SyncError::PermissionDenied { .. })
    }

    /// Check if this error is related to disk space
    pub fn is_disk_space_error(&self) -> bool {
        matches!(self, SyncError::DiskFull { .. })
    }

    /// Check if the underlying cause is a missing file or directory
    pub fn is_not_found(&self) -> bool {
        matches!(self, SyncError::Io(e) if e.kind() == ErrorKind::NotFound)
    }

    /// Duplicate an error for reporting. `io::Error` is not `Clone`, so the
    /// IO variant is rebuilt from its kind and message.
    pub fn duplicate(&self) -> SyncError {
        match self {
            SyncError::Io(e) => SyncError::Io(IoError::new(e.kind(), e.to_string())),
            SyncError::Config(msg) => SyncError::Config(msg.clone()),
            SyncError::SourceMissing { path } => SyncError::SourceMissing { path: path.clone() },
            SyncError::NotADirectory { path } => SyncError::NotADirectory { path: path.clone() },
            SyncError::PermissionDenied { path } => {
                SyncError::PermissionDenied { path: path.clone() }
            }
            SyncError::DiskFull { path } => SyncError::DiskFull { path: path.clone() },
        }
    }
}

/// Map an IO error on `path` onto the structured variants where one applies.
pub fn map_file_error(path: &Path, error: IoError) -> SyncError {
    if matches!(error.kind(), ErrorKind::PermissionDenied) {
        SyncError::PermissionDenied {
            path: path.to_path_buf(),
        }
    } else if matches!(error.kind(), ErrorKind::StorageFull)
        || matches!(error.raw_os_error(), Some(28 | 122))
    {
        SyncError::DiskFull {
            path: path.to_path_buf(),
        }
    } else {
        SyncError::Io(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_automatic_conversion() {
        let io_error = IoError::new(ErrorKind::NotFound, "file not found");
        let sync_error: SyncError = io_error.into();

        assert!(matches!(sync_error, SyncError::Io(_)));
        assert!(sync_error.to_string().contains("IO error"));
        assert!(sync_error.is_not_found());
    }

    #[test]
    fn test_io_error_from_function() {
        fn returns_io_error() -> Result<(), SyncError> {
            let _file = std::fs::File::open("/nonexistent/path/file.txt")?;
            Ok(())
        }

        let result = returns_io_error();
        assert!(matches!(result.unwrap_err(), SyncError::Io(_)));
    }

    #[test]
    fn test_source_missing_message() {
        let error = SyncError::SourceMissing {
            path: PathBuf::from("/data/in"),
        };
        assert!(error.to_string().contains("source folder"));
        assert!(error.to_string().contains("/data/in"));
    }

    #[test]
    fn test_permission_denied() {
        let error = SyncError::PermissionDenied {
            path: PathBuf::from("/protected/file.txt"),
        };
        assert!(error.to_string().contains("Permission denied"));
        assert!(error.to_string().contains("/protected/file.txt"));
        assert!(error.is_permission_error());
    }

    #[test]
    fn test_map_file_error_permission() {
        let err = map_file_error(
            Path::new("locked.txt"),
            IoError::new(ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.is_permission_error());
    }

    #[test]
    fn test_map_file_error_disk_full_from_raw_os_error() {
        let err = map_file_error(Path::new("big.bin"), IoError::from_raw_os_error(28));
        assert!(err.is_disk_space_error());
        assert!(err.to_string().contains("big.bin"));
    }

    #[test]
    fn test_map_file_error_passes_other_kinds_through() {
        let err = map_file_error(
            Path::new("gone.txt"),
            IoError::new(ErrorKind::NotFound, "missing"),
        );
        assert!(err.is_not_found());
    }

    #[test]
    fn test_duplicate_preserves_kind_and_message() {
        let original = SyncError::Io(IoError::new(ErrorKind::NotFound, "vanished"));
        let copy = original.duplicate();
        assert!(copy.is_not_found());
        assert_eq!(original.to_string(), copy.to_string());

        let config = SyncError::Config("bad".to_string());
        assert!(config.duplicate().is_config_error());
    }
}
