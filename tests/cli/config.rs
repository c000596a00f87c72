//! Tests for configuration lookup and policy overrides.

use crate::support::*;

const RELAXED: &str = r#"
[policy]
min_length = 14
prefix = ""
suffix = "u"
charset = "!"
min_chars_present = 1
contains = ""
"#;

#[test]
fn test_local_config_policy() {
    let t = Test::with_config(RELAXED);

    assert_success(&t.store("test-pass-1234!u", &[("A", "b")]));
    // The default policy would have rejected that key.
    assert_failure(&Test::new().store("test-pass-1234!u", &[("A", "b")]));
}

#[test]
fn test_explicit_config_flag() {
    let t = Test::new();
    t.write_file("relaxed.toml", RELAXED);

    let output = t
        .cmd()
        .args(["--config", "relaxed.toml", "store"])
        .write_stdin(commands::store_input("test-pass-1234!u", &[("A", "b")]))
        .output()
        .unwrap();
    assert_success(&output);
}

#[test]
fn test_config_env_var() {
    let t = Test::new();
    t.write_file("relaxed.toml", RELAXED);

    let output = t
        .cmd()
        .env("KEYHOLD_CONFIG", t.path("relaxed.toml"))
        .arg("store")
        .write_stdin(commands::store_input("test-pass-1234!u", &[("A", "b")]))
        .output()
        .unwrap();
    assert_success(&output);
}

#[cfg(target_os = "linux")]
#[test]
fn test_global_config() {
    let t = Test::new();
    let dir = t.home.path().join(".config").join("keyhold");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), RELAXED).unwrap();

    assert_success(&t.store("test-pass-1234!u", &[("A", "b")]));
}

#[cfg(unix)]
#[test]
fn test_counter_nonce_is_deterministic() {
    let t = Test::with_config("[cipher]\nnonce = \"counter\"\n");

    assert_success(&t.store(KEY, &[("A", "same"), ("B", "same")]));

    let env = t.read_env();
    let values: Vec<&str> = env.lines().filter_map(|l| l.split_once('=')).map(|(_, v)| v).collect();
    assert_eq!(values.len(), 2);
    assert_eq!(values[0], values[1]);
}

#[test]
fn test_random_nonce_differs() {
    let t = Test::new();

    assert_success(&t.store(KEY, &[("A", "same"), ("B", "same")]));

    let env = t.read_env();
    let values: Vec<&str> = env.lines().filter_map(|l| l.split_once('=')).map(|(_, v)| v).collect();
    assert_ne!(values[0], values[1]);
}

#[test]
fn test_invalid_config_value() {
    let t = Test::with_config("[temporary]\nsecret = \"x\"\nmax_uses = 0\n");

    let output = t.cmd().arg("store").write_stdin("").output().unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "temporary.max_uses");
}
