use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_play_terminal_types_whole_session() {
    let dir = tempdir().unwrap();
    cargo_bin_cmd!("folio")
        .env("FOLIO_HOME", dir.path())
        .args(["play", "terminal", "--char-ms", "1", "--line-ms", "0", "--start-ms", "0"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("dhruv@portfolio:~$ whoami\n"))
        .stdout(predicate::str::ends_with("dhruv@portfolio:~$ _\n"));
}

#[test]
fn test_play_playground_stops_after_loops() {
    let dir = tempdir().unwrap();
    cargo_bin_cmd!("folio")
        .env("FOLIO_HOME", dir.path())
        .args(["play", "playground", "--char-ms", "1", "--line-ms", "0", "--loops", "1"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("const developer"));
}

#[test]
fn test_play_rejects_zero_char_interval() {
    let dir = tempdir().unwrap();
    cargo_bin_cmd!("folio")
        .env("FOLIO_HOME", dir.path())
        .args(["play", "terminal", "--char-ms", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid typewriter timing"));
}

#[test]
fn test_play_rejects_zero_loops() {
    cargo_bin_cmd!("folio")
        .args(["play", "playground", "--loops", "0"])
        .assert()
        .failure();
}

#[test]
fn test_play_writes_log_file() {
    let dir = tempdir().unwrap();
    cargo_bin_cmd!("folio")
        .env("FOLIO_HOME", dir.path())
        .env("FOLIO_LOG", "info")
        .args(["play", "terminal", "--char-ms", "1", "--line-ms", "0", "--start-ms", "0"])
        .assert()
        .success();
    assert!(dir.path().join("logs").join("folio.log").exists());
}
