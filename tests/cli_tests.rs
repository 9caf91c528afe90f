//! Command-line tests for the `pomodoro-timer` binary.
//!
//! Only subcommands that do not open a window are exercised here.

use assert_cmd::Command;
use predicates::prelude::*;

fn pomodoro() -> Command {
    Command::cargo_bin("pomodoro-timer").unwrap()
}

#[test]
fn test_help_lists_subcommands() {
    pomodoro()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_version() {
    pomodoro()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_config_path_uses_override() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.ini");

    pomodoro()
        .args(["config", "path", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.ini"));
}

#[test]
fn test_config_show_defaults_for_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.ini");

    pomodoro()
        .args(["config", "show", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("file not found, showing defaults"))
        .stdout(predicate::str::contains("custom_duration_minutes = 25"))
        .stdout(predicate::str::contains("pause_duration_minutes = 5"));

    assert!(!path.exists());
}

#[test]
fn test_config_show_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.ini");
    std::fs::write(&path, "[Timer]\ncustom_duration_minutes = 40\npause_duration_minutes = 0\n")
        .unwrap();

    pomodoro()
        .args(["config", "show", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("(loaded)"))
        .stdout(predicate::str::contains("custom_duration_minutes = 40"))
        .stdout(predicate::str::contains("pause_duration_minutes = 0"));
}

#[test]
fn test_completions_bash() {
    pomodoro()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pomodoro-timer"));
}

#[test]
fn test_unknown_subcommand_fails() {
    pomodoro()
        .arg("start")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}
