//! Tests for error handling and CLI flags.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_help() {
    let t = Test::new();

    let output = t.cmd().arg("--help").output().unwrap();
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("keyhold") || out.contains("Usage"));
}

#[test]
fn test_unknown_command_fails() {
    let t = Test::new();

    let output = t.cmd().arg("unknown-command").output().unwrap();
    assert_failure(&output);
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    let output = t.cmd().arg("--version").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_verbose_flag_accepted() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["--verbose", "store"])
        .write_stdin(commands::store_input(KEY, &[("V", "1")]))
        .output()
        .unwrap();
    assert_success(&output);
}

#[test]
fn test_completions() {
    let t = Test::new();

    for shell in ["bash", "zsh", "fish", "powershell", "elvish"] {
        let output = t.cmd().args(["completions", shell]).output().unwrap();
        assert_success(&output);
        assert_stdout_contains(&output, "keyhold");
    }
}

#[test]
fn test_empty_input_denied() {
    let t = Test::new();

    let output = t.cmd().arg("store").write_stdin("").output().unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "key validation failed");
}

#[test]
fn test_invalid_config_reported() {
    let t = Test::with_config("[policy\nbroken");

    let output = t.cmd().arg("store").write_stdin("").output().unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to parse config");
}

#[test]
fn test_explicit_config_missing() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["--config", "absent.toml", "store"])
        .write_stdin("")
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to read config");
}

#[test]
fn test_missing_env_file_hint() {
    let t = Test::new();

    t.cmd()
        .arg("shell")
        .write_stdin(format!("{}\n", KEY))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("env file not found"))
        .stderr(predicate::str::contains("run: keyhold store"));
}

#[test]
fn test_error_output_never_echoes_key() {
    let t = Test::new();

    t.cmd()
        .arg("store")
        .write_stdin(format!("{}\n", INVALID_KEY))
        .assert()
        .failure()
        .stdout(predicate::str::contains(INVALID_KEY).not())
        .stderr(predicate::str::contains(INVALID_KEY).not());
}
