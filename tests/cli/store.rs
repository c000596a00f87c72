//! Tests for `keyhold store`.

use crate::support::*;

#[test]
fn test_store_single_value() {
    let t = Test::new();

    let output = t.store(KEY, &[("API_KEY", "sk-test-12345")]);
    assert_success(&output);
    assert_stdout_contains(&output, "enc:AES256:");
    assert_stderr_contains(&output, "stored API_KEY");

    let env = t.read_env();
    assert!(env.starts_with("API_KEY=enc:AES256:"));
    assert!(!env.contains("sk-test-12345"));
}

#[test]
fn test_store_prints_value_written() {
    let t = Test::new();

    let output = t.store(KEY, &[("TOKEN", "abc")]);
    assert_success(&output);

    let printed = stdout(&output);
    let line = t.read_env();
    assert_eq!(line.trim_end(), format!("TOKEN={}", printed.trim()));
}

#[test]
fn test_store_multiple_values() {
    let t = Test::new();

    let output = t.store(KEY, STANDARD_SECRETS);
    assert_success(&output);

    let env = t.read_env();
    assert_eq!(env.lines().count(), STANDARD_SECRETS.len());
    for (name, value) in STANDARD_SECRETS {
        assert!(env.contains(&format!("{}=enc:AES256:", name)));
        assert!(!env.contains(value));
    }
}

#[test]
fn test_store_alias() {
    let t = Test::new();

    let output = t
        .cmd()
        .arg("1")
        .write_stdin(commands::store_input(KEY, &[("ALIASED", "v")]))
        .output()
        .unwrap();
    assert_success(&output);
    assert!(t.read_env().contains("ALIASED=enc:AES256:"));
}

#[test]
fn test_store_appends_to_existing_file() {
    let t = Test::new();
    t.write_file(".env", "# shared settings\nPLAIN=value");

    assert_success(&t.store(KEY, &[("SECRET", "x")]));

    let env = t.read_env();
    assert!(env.starts_with("# shared settings\nPLAIN=value\nSECRET=enc:AES256:"));
}

#[test]
fn test_store_duplicate_names_kept() {
    let t = Test::new();

    assert_success(&t.store(KEY, &[("TOKEN", "first")]));
    assert_success(&t.store(KEY, &[("TOKEN", "second")]));

    assert_eq!(t.read_env().matches("TOKEN=").count(), 2);
}

#[test]
fn test_store_invalid_name_is_skipped() {
    let t = Test::new();

    let output = t.store(KEY, &[("BAD NAME", "x"), ("GOOD_NAME", "y")]);
    assert_success(&output);
    assert_stderr_contains(&output, "invalid variable name");

    let env = t.read_env();
    assert!(!env.contains("BAD NAME"));
    assert!(env.contains("GOOD_NAME=enc:AES256:"));
}

#[test]
fn test_store_rejects_invalid_key() {
    let t = Test::new();

    let input = format!("{}\n{}\n{}\n", INVALID_KEY, INVALID_KEY, INVALID_KEY);
    let output = t.cmd().arg("store").write_stdin(input).output().unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "key validation failed");
    assert!(!t.env_path().exists());
}

#[test]
fn test_store_key_retry() {
    let t = Test::new();

    let mut input = format!("{}\n", INVALID_KEY);
    input.push_str(&commands::store_input(KEY, &[("RETRIED", "v")]));

    let output = t.cmd().arg("store").write_stdin(input).output().unwrap();
    assert_success(&output);
    assert_stderr_contains(&output, "invalid key, 2 attempts left");
    assert!(t.read_env().contains("RETRIED=enc:AES256:"));
}

#[test]
fn test_store_custom_env_file() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["--env-file", "secrets.env", "store"])
        .write_stdin(commands::store_input(KEY, &[("CUSTOM", "v")]))
        .output()
        .unwrap();
    assert_success(&output);

    assert!(!t.env_path().exists());
    let contents = std::fs::read_to_string(t.path("secrets.env")).unwrap();
    assert!(contents.contains("CUSTOM=enc:AES256:"));
}

#[cfg(unix)]
#[test]
fn test_store_unicode_roundtrip() {
    let t = Test::new();
    assert_roundtrip(&t, "GREETING", "こんにちは世界 🌍");
}

#[cfg(unix)]
#[test]
fn test_store_special_chars_roundtrip() {
    let t = Test::new();
    assert_roundtrip(&t, "PASSWORD", "p@ss=w0rd!#$%^&*()");
}
