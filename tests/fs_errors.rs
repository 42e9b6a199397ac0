//! Filesystem error handling.
//!
//! A file that cannot be opened is skipped with a diagnostic; the rest of
//! the run is unaffected and the exit code stays zero.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn loggrep() -> Command {
    let mut cmd = Command::cargo_bin("loggrep").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[cfg(unix)]
#[test]
fn permission_denied_file_is_skipped_with_diagnostic() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = TempDir::new().unwrap();
    let locked = tmp.path().join("locked.log");
    fs::write(&locked, "ERROR hidden\n").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
    fs::write(tmp.path().join("open.log"), "ERROR visible\n").unwrap();

    // Root can read anything; the assertion would be vacuous there.
    if fs::File::open(&locked).is_ok() {
        return;
    }

    loggrep()
        .args([tmp.path().to_str().unwrap(), "ERROR"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ERROR visible"))
        .stdout(predicate::str::contains("ERROR hidden").not())
        .stderr(predicate::str::contains("locked.log"));
}

#[test]
fn empty_directory_counts_as_no_files_found() {
    let tmp = TempDir::new().unwrap();

    loggrep()
        .args([tmp.path().to_str().unwrap(), "ERROR"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no files found"));
}

#[test]
fn empty_file_scans_cleanly_with_zero_matches() {
    let tmp = TempDir::new().unwrap();
    let log = tmp.path().join("empty.log");
    fs::write(&log, "").unwrap();

    loggrep()
        .args([log.to_str().unwrap(), "ERROR"])
        .assert()
        .success()
        .stdout("");
}
