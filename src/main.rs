//! Keyhold - policy-gated encrypted secrets for .env files.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use keyhold::cli::output;
use keyhold::cli::{execute, Cli};
use keyhold::error::{CipherError, Error, StoreError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("KEYHOLD_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("keyhold=debug")
        } else {
            EnvFilter::new("keyhold=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute(cli) {
        // Format error with suggestion if available
        let suggestion = match &e {
            Error::Store(StoreError::NotFound(_)) => Some("run: keyhold store"),
            Error::Cipher(CipherError::DecryptionFailed) => {
                Some("no encrypted value opened with this key; run: keyhold store")
            }
            Error::Config(_) => Some("check .keyhold.toml or the --config path"),
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
