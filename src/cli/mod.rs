//! Command-line interface.

pub mod completions;
pub mod output;
pub mod prompt;
pub mod run;
pub mod shell;
pub mod store;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::config::Config;
use crate::core::constants;
use crate::error::Result;
use prompt::Prompt;

/// Keyhold - policy-gated encrypted secrets for .env files.
#[derive(Parser)]
#[command(
    name = "keyhold",
    about = "Policy-gated encrypted secrets for .env files",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a config file (default: ./.keyhold.toml)
    #[arg(long, global = true, env = "KEYHOLD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to the env file
    #[arg(
        long,
        global = true,
        env = "KEYHOLD_ENV_FILE",
        default_value = constants::ENV_FILE
    )]
    pub env_file: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Encrypt values and append them to the env file
    #[command(alias = "1")]
    Store,

    /// Spawn a shell with decrypted secrets loaded as environment variables
    #[command(alias = "2")]
    Shell,

    /// Run a command with decrypted secrets injected as env vars
    Run {
        /// Command and arguments to run
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        command: Vec<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Everything a command needs besides its own arguments.
pub struct Context {
    pub config: Config,
    pub env_file: PathBuf,
    pub prompt: Prompt,
}

impl Context {
    /// Load the configuration and detect the input mode.
    pub fn load(config: Option<PathBuf>, env_file: PathBuf) -> Result<Self> {
        Ok(Self {
            config: Config::discover(config.as_deref())?,
            env_file,
            prompt: Prompt::detect(),
        })
    }
}

/// Execute a command.
pub fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Store => store::execute(&Context::load(cli.config, cli.env_file)?),
        Command::Shell => shell::execute(&Context::load(cli.config, cli.env_file)?),
        Command::Run { command } => {
            run::execute(&Context::load(cli.config, cli.env_file)?, &command)
        }
        Command::Completions { shell } => completions::execute(shell),
    }
}
