//! Tests for `keyhold shell`.

use crate::support::*;

#[cfg(unix)]
#[test]
fn test_shell_exports_secrets() {
    let t = Test::with_secrets(&[("SHELL_SECRET", "from-shell")]);

    let output = t.shell(KEY);
    assert_success(&output);
    assert_stdout_contains(&output, "SHELL_SECRET=from-shell");
    assert_stderr_contains(&output, "1 secrets loaded");
    assert_stderr_contains(&output, "Left shell");
}

#[cfg(unix)]
#[test]
fn test_shell_alias() {
    let t = Test::with_secrets(&[("ALIASED", "yes")]);

    let output = t
        .cmd()
        .arg("2")
        .env("SHELL", "env")
        .write_stdin(format!("{}\n", KEY))
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "ALIASED=yes");
}

#[cfg(unix)]
#[test]
fn test_shell_strip_suffix() {
    let t = Test::with_config("[store]\nstrip_suffix = true\n");
    assert_success(&t.store(KEY, &[("API_KEY_PROD", "sk-prod")]));

    let output = t.shell(KEY);
    assert_success(&output);
    assert_stdout_contains(&output, "API_KEY=sk-prod");
    assert_stdout_excludes(&output, "API_KEY_PROD=");
}

#[test]
fn test_shell_invalid_key_shows_hint() {
    let t = Test::with_config("hint = \"starts with lh-\"\n");
    t.write_file(".env", "A=enc:AES256:AAAA\n");

    let input = format!("{}\n{}\n{}\n", INVALID_KEY, INVALID_KEY, INVALID_KEY);
    let output = t.cmd().arg("shell").write_stdin(input).output().unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "1 attempt left");
    assert_stderr_contains(&output, "hint: starts with lh-");
    assert_stderr_contains(&output, "key validation failed");
}
