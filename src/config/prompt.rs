//! Interactive fallback when the target is not given on the command line

use crate::types::{map_file_error, SyncError};
use std::fs;
use std::io::{BufRead, ErrorKind, Write};
use std::path::PathBuf;

/// Values collected from the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptedTarget {
    pub source: PathBuf,
    pub replica: PathBuf,
    pub interval_secs: u64,
}

/// Ask for source, replica and interval, in that order
///
/// Blank paths and intervals that are not positive integers are asked for
/// again. The source must exist as soon as it is entered; the replica is
/// created later by `Config::prepare` when missing. Running out of input is a
/// configuration error rather than an endless prompt loop.
pub fn prompt_target<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<PromptedTarget, SyncError> {
    let source = prompt_path(
        input,
        output,
        "Enter the source folder path:",
        "Invalid input! Please enter a valid source folder path:",
    )?;
    match fs::metadata(&source) {
        Ok(m) if m.is_dir() => {}
        Ok(_) => return Err(SyncError::NotADirectory { path: source }),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(SyncError::SourceMissing { path: source })
        }
        Err(e) => return Err(map_file_error(&source, e)),
    }

    let replica = prompt_path(
        input,
        output,
        "Enter the replica folder path:",
        "Invalid input! Please enter a valid replica folder path:",
    )?;

    writeln!(output, "Enter the synchronization interval (seconds):")?;
    let interval_secs = loop {
        let line = read_line(input)?;
        match line.trim().parse::<u64>() {
            Ok(n) if n > 0 => break n,
            _ => writeln!(output, "Invalid value! Please enter a positive number:")?,
        }
    };

    Ok(PromptedTarget {
        source,
        replica,
        interval_secs,
    })
}

fn prompt_path<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
    retry: &str,
) -> Result<PathBuf, SyncError> {
    writeln!(output, "{}", question)?;
    loop {
        let line = read_line(input)?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            return Ok(PathBuf::from(trimmed));
        }
        writeln!(output, "{}", retry)?;
    }
}

fn read_line<R: BufRead>(input: &mut R) -> Result<String, SyncError> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(SyncError::Config(
            "input ended before all values were entered".to_string(),
        ));
    }
    Ok(line)
}
