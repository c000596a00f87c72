//! Interactive input.
//!
//! Uses hidden dialoguer prompts on a terminal. When stdin is a pipe every
//! answer is read as one line from stdin instead, so the tool can be
//! scripted.

use std::io::{self, BufRead, IsTerminal};

use dialoguer::{Confirm, Input, Password};
use tracing::debug;
use zeroize::Zeroizing;

use crate::cli::output;
use crate::core::cipher::Cipher;
use crate::core::constants::MAX_KEY_ATTEMPTS;
use crate::core::manager::{SecretManager, Session};
use crate::core::usage::UsageStore;
use crate::error::{Error, Result};

/// Source of user answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    /// dialoguer prompts on the terminal
    Interactive,
    /// One line of stdin per answer
    Piped,
}

impl Prompt {
    /// Pick the mode from whether stdin is a terminal.
    pub fn detect() -> Self {
        if io::stdin().is_terminal() {
            Self::Interactive
        } else {
            Self::Piped
        }
    }

    /// Ask for a hidden value. Empty answers are allowed.
    pub fn secret(&self, label: &str) -> Result<Zeroizing<String>> {
        self.try_secret(label)?.ok_or_else(|| end_of_input(label))
    }

    /// Like [`Prompt::secret`], but `None` once piped input is exhausted.
    fn try_secret(&self, label: &str) -> Result<Option<Zeroizing<String>>> {
        match self {
            Self::Interactive => Ok(Some(Zeroizing::new(
                Password::new()
                    .with_prompt(label)
                    .allow_empty_password(true)
                    .interact()?,
            ))),
            Self::Piped => read_line(),
        }
    }

    /// Ask for a visible value.
    pub fn text(&self, label: &str) -> Result<String> {
        match self {
            Self::Interactive => Ok(Input::<String>::new()
                .with_prompt(label)
                .allow_empty(true)
                .interact_text()?),
            Self::Piped => read_line()?
                .map(|line| line.to_string())
                .ok_or_else(|| end_of_input(label)),
        }
    }

    /// Ask a yes/no question. End of input means no.
    pub fn confirm(&self, label: &str) -> Result<bool> {
        match self {
            Self::Interactive => Ok(Confirm::new()
                .with_prompt(label)
                .default(false)
                .interact()?),
            Self::Piped => Ok(read_line()?
                .map(|answer| is_yes(&answer))
                .unwrap_or(false)),
        }
    }
}

/// Prompt for the key until it is accepted or attempts run out.
///
/// A temporary credential is charged once here; the returned session does
/// not validate again.
///
/// # Errors
///
/// Returns `Error::AccessDenied` after the last failed attempt, or the
/// underlying error if reading input fails.
pub fn unlock<'m, S, C>(
    manager: &'m SecretManager<S, C>,
    prompt: &Prompt,
    hint: Option<&str>,
) -> Result<Session<'m, S, C>>
where
    S: UsageStore,
    C: Cipher,
{
    for attempt in 1..=MAX_KEY_ATTEMPTS {
        let Some(key) = prompt.try_secret("Key")? else {
            break;
        };

        match manager.unlock(&key) {
            Ok(session) => return Ok(session),
            Err(Error::AccessDenied) => {
                let remaining = MAX_KEY_ATTEMPTS - attempt;
                debug!(attempt, remaining, "key rejected");
                if remaining > 0 {
                    output::warn(&format!(
                        "invalid key, {} attempt{} left",
                        remaining,
                        if remaining == 1 { "" } else { "s" }
                    ));
                }
            }
            Err(e) => return Err(e),
        }
    }

    if let Some(hint) = hint {
        output::hint(&format!("hint: {}", hint));
    }
    Err(Error::AccessDenied)
}

fn read_line() -> Result<Option<Zeroizing<String>>> {
    let mut line = Zeroizing::new(String::new());
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let len = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(len);
    Ok(Some(line))
}

fn end_of_input(label: &str) -> Error {
    Error::Other(format!("unexpected end of input while reading {}", label.to_lowercase()))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
