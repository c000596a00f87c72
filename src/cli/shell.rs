//! Interactive shell command.
//!
//! Spawns a subshell with decrypted secrets loaded as environment variables.

use std::process::Command;

use crate::cli::run::{exit_code, inject, load_secrets};
use crate::cli::{output, Context};
use crate::error::Result;

/// Spawn an interactive shell with secrets loaded.
pub fn execute(ctx: &Context) -> Result<()> {
    let exit_code = spawn_shell(ctx)?;
    std::process::exit(exit_code);
}

fn spawn_shell(ctx: &Context) -> Result<i32> {
    let secrets = load_secrets(ctx)?;

    let shell = std::env::var("SHELL").unwrap_or_else(|_| "/bin/sh".to_string());

    output::success(&format!(
        "Entering shell. {} secrets loaded. Type 'exit' to leave.",
        secrets.len()
    ));
    output::blank();

    let mut cmd = Command::new(&shell);
    inject(&mut cmd, &secrets);
    drop(secrets);

    let status = cmd.status()?;

    output::blank();
    output::success("Left shell. Secrets cleared.");

    Ok(exit_code(status))
}
