//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

/// Piped answers for `keyhold store`: the key, then value, name and
/// "continue?" per entry.
pub fn store_input(key: &str, entries: &[(&str, &str)]) -> String {
    let mut input = format!("{}\n", key);
    for (i, (name, value)) in entries.iter().enumerate() {
        let more = if i + 1 < entries.len() { "y" } else { "n" };
        input.push_str(&format!("{}\n{}\n{}\n", value, name, more));
    }
    input
}

impl Test {
    /// Create a keyhold command with correct environment variables.
    ///
    /// Returns a Command configured with:
    /// - HOME and XDG_CONFIG_HOME inside the temporary home directory
    /// - Current directory set to the test project directory
    /// - No inherited KEYHOLD_* variables
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("keyhold").expect("failed to find keyhold binary");
        cmd.env("HOME", self.home.path());
        cmd.env("XDG_CONFIG_HOME", self.home.path().join(".config"));
        // Windows uses USERPROFILE instead of HOME for home directory
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("NO_COLOR", "1");
        for var in ["KEYHOLD_CONFIG", "KEYHOLD_ENV_FILE", "KEYHOLD_LOG"] {
            cmd.env_remove(var);
        }
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Shortcut for `keyhold store` with piped answers.
    pub fn store(&self, key: &str, entries: &[(&str, &str)]) -> Output {
        self.cmd()
            .arg("store")
            .write_stdin(store_input(key, entries))
            .output()
            .expect("failed to run keyhold store")
    }

    /// Shortcut for `keyhold run -- <command>`, answering the key prompt.
    pub fn run(&self, key: &str, command: &[&str]) -> Output {
        let mut cmd = self.cmd();
        cmd.arg("run").arg("--");
        for arg in command {
            cmd.arg(arg);
        }
        cmd.write_stdin(format!("{}\n", key))
            .output()
            .expect("failed to run keyhold run")
    }

    /// Shortcut for `keyhold shell` with `$SHELL` replaced by `env`, so the
    /// loaded environment is printed instead of waiting for input.
    pub fn shell(&self, key: &str) -> Output {
        self.cmd()
            .arg("shell")
            .env("SHELL", "env")
            .write_stdin(format!("{}\n", key))
            .output()
            .expect("failed to run keyhold shell")
    }
}
