//! Binary-level tests: argument handling, startup failures, prompt mode

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn flatsync(workdir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("flatsync").expect("binary built");
    cmd.current_dir(workdir.path())
        .env_remove("FLATSYNC_LOG_FILE")
        .env_remove("FLATSYNC_RETENTION_DAYS");
    cmd
}

#[test]
fn test_missing_source_exits_with_error() {
    let dir = TempDir::new().unwrap();

    flatsync(&dir)
        .args(["does-not-exist", "replica", "5", "--once"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ERROR:"))
        .stderr(predicate::str::contains("does-not-exist"));

    assert!(!dir.path().join("replica").exists());
    let log = fs::read_to_string(dir.path().join("sync_log.txt")).expect("startup error logged");
    assert!(log.contains("ERROR:"));
}

#[test]
fn test_dry_run_startup_error_is_not_logged() {
    let dir = TempDir::new().unwrap();

    flatsync(&dir)
        .args(["does-not-exist", "replica", "5", "--once", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ERROR:"));

    assert!(!dir.path().join("sync_log.txt").exists());
}

#[test]
fn test_zero_interval_is_rejected() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("source")).unwrap();

    flatsync(&dir)
        .args(["source", "replica", "0"])
        .assert()
        .failure();
}

#[test]
fn test_once_mirrors_and_exits() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("source")).unwrap();
    fs::write(dir.path().join("source/a.txt"), b"hello").unwrap();

    flatsync(&dir)
        .args(["source", "replica", "5", "--once"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Starting synchronization:"))
        .stdout(predicate::str::contains("Copied: "));

    assert_eq!(fs::read(dir.path().join("replica/a.txt")).unwrap(), b"hello");
    let log = fs::read_to_string(dir.path().join("sync_log.txt")).unwrap();
    assert!(log.contains("Starting synchronization:"));
    assert!(log.contains("Copied: "));
}

#[test]
fn test_custom_log_file_flag() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("source")).unwrap();
    fs::write(dir.path().join("source/a.txt"), b"a").unwrap();

    flatsync(&dir)
        .args(["source", "replica", "5", "--once", "--log-file", "logs/run.log"])
        .assert()
        .success();

    assert!(dir.path().join("logs/run.log").exists());
    assert!(!dir.path().join("sync_log.txt").exists());
}

#[test]
fn test_dry_run_touches_nothing() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("source")).unwrap();
    fs::create_dir(dir.path().join("replica")).unwrap();
    fs::write(dir.path().join("source/new.txt"), b"n").unwrap();
    fs::write(dir.path().join("replica/old.txt"), b"o").unwrap();

    flatsync(&dir)
        .args(["source", "replica", "5", "--once", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("COPY"))
        .stdout(predicate::str::contains("DELETE"));

    assert!(!dir.path().join("replica/new.txt").exists());
    assert!(dir.path().join("replica/old.txt").exists());
    assert!(!dir.path().join("sync_log.txt").exists());
}

#[test]
fn test_prompt_mode_reads_stdin() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("source")).unwrap();
    fs::write(dir.path().join("source/a.txt"), b"prompted").unwrap();

    flatsync(&dir)
        .arg("--once")
        .write_stdin("\nsource\nreplica\nabc\n7\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Enter the source folder path:"))
        .stdout(predicate::str::contains(
            "Invalid input! Please enter a valid source folder path:",
        ))
        .stdout(predicate::str::contains(
            "Invalid value! Please enter a positive number:",
        ));

    assert_eq!(
        fs::read(dir.path().join("replica/a.txt")).unwrap(),
        b"prompted"
    );
}

#[test]
fn test_prompt_mode_eof_fails() {
    let dir = TempDir::new().unwrap();

    flatsync(&dir)
        .arg("--once")
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("ERROR:"));
}
