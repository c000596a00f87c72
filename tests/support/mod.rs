//! Test support utilities for keyhold integration tests.
//!
//! Provides reusable test environment setup and helper commands.

#![allow(dead_code)]

pub mod commands;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::path::PathBuf;

use tempfile::TempDir;

/// Test environment with isolated temp directories.
///
/// Each test gets its own temporary project dir and home dir.
/// No process-global state is mutated; child processes use `.current_dir()`
/// so tests can safely run in parallel.
pub struct Test {
    /// Temporary directory for the test project
    pub dir: TempDir,
    /// Temporary home directory
    pub home: TempDir,
}

impl Test {
    /// Create a new environment using the built-in default config.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let home = TempDir::new().expect("failed to create temp home");

        Self { dir, home }
    }

    /// Create an environment with `.keyhold.toml` in the project dir.
    pub fn with_config(contents: &str) -> Self {
        let t = Self::new();
        t.write_file(".keyhold.toml", contents);
        t
    }

    /// Create an environment with secrets stored through the CLI.
    pub fn with_secrets(secrets: &[(&str, &str)]) -> Self {
        let t = Self::new();
        let output = t.store(KEY, secrets);
        assert!(
            output.status.success(),
            "Failed to store secrets: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        t
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn env_path(&self) -> PathBuf {
        self.path(".env")
    }

    pub fn state_path(&self) -> PathBuf {
        self.path(".keyhold.state")
    }

    pub fn write_file(&self, name: &str, contents: &str) {
        std::fs::write(self.path(name), contents).expect("failed to write file");
    }

    /// Contents of the project `.env`.
    pub fn read_env(&self) -> String {
        std::fs::read_to_string(self.env_path()).expect("failed to read .env")
    }
}
