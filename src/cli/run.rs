//! Run command.
//!
//! Executes a command with decrypted secrets injected as environment variables.

use std::process::{Command, ExitStatus};

use tracing::debug;

use crate::cli::{prompt, Context};
use crate::core::manager::Secrets;
use crate::error::{Error, Result, StoreError};

/// Run a command with secrets injected as environment variables.
pub fn execute(ctx: &Context, command: &[String]) -> Result<()> {
    let exit_code = run_with_secrets(ctx, command)?;
    std::process::exit(exit_code);
}

/// Unlock and decrypt the env file.
///
/// A missing env file is reported before the key is asked for, so no
/// temporary-credential use is spent on it.
pub(crate) fn load_secrets(ctx: &Context) -> Result<Secrets> {
    if !ctx.env_file.is_file() {
        return Err(StoreError::NotFound(ctx.env_file.clone()).into());
    }

    let manager = ctx.config.manager();
    let session = prompt::unlock(&manager, &ctx.prompt, ctx.config.hint())?;
    let secrets = session.load_all(&ctx.env_file)?;

    debug!(count = secrets.len(), "secrets loaded");
    Ok(secrets)
}

/// Apply secrets to a command's environment.
pub(crate) fn inject(cmd: &mut Command, secrets: &Secrets) {
    for (name, value) in secrets {
        cmd.env(name, value.as_str());
    }
}

/// Exit code for a finished child, following the shell's 128 + signal
/// convention when it was killed.
pub(crate) fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}

fn run_with_secrets(ctx: &Context, command: &[String]) -> Result<i32> {
    let (program, args) = command
        .split_first()
        .ok_or_else(|| Error::Other("no command specified".to_string()))?;

    let secrets = load_secrets(ctx)?;

    let mut cmd = Command::new(program);
    cmd.args(args);
    inject(&mut cmd, &secrets);
    // The command holds its own copies from here on.
    drop(secrets);

    debug!(program = %program, "spawning");
    let status = cmd.status()?;
    Ok(exit_code(status))
}
