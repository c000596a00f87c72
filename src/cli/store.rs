//! Store command.
//!
//! Unlocks once, then repeatedly asks for a value and a name, encrypts the
//! value and appends it to the env file.

use tracing::info;

use crate::cli::{output, prompt, Context};
use crate::error::{Error, Result};

/// Encrypt and append values until the user stops.
pub fn execute(ctx: &Context) -> Result<()> {
    let manager = ctx.config.manager();
    let session = prompt::unlock(&manager, &ctx.prompt, ctx.config.hint())?;

    let mut stored = 0usize;
    loop {
        let value = ctx.prompt.secret("Secret value")?;
        let name = ctx.prompt.text("Variable name")?;
        let name = name.trim();

        match session.store(&value, name, &ctx.env_file) {
            Ok(sealed) => {
                stored += 1;
                output::success(&format!("stored {}", output::key(name)));
                println!("{}", sealed);
            }
            // A bad name is recoverable; ask again.
            Err(Error::Validation(e)) => output::error(&e.to_string()),
            Err(e) => return Err(e),
        }

        if !ctx.prompt.confirm("Continue?")? {
            break;
        }
    }

    info!(stored, "store finished");
    if stored > 0 {
        output::dimmed(&format!(
            "{} value{} appended to {}",
            stored,
            if stored == 1 { "" } else { "s" },
            output::path(&ctx.env_file)
        ));
    }
    Ok(())
}
