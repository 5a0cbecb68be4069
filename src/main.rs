//! Unseal - per-group gpg-encrypted secrets for the command line.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use unseal::cli::output;
use unseal::cli::{execute, Cli};
use unseal::core::constants;
use unseal::error::{CipherError, Error, StoreError};

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr; stdout is reserved for command output
    let filter = EnvFilter::try_from_env(constants::LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("unseal=debug")
        } else {
            EnvFilter::new("unseal=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    if let Err(e) = execute(cli) {
        let suggestion = match &e {
            Error::GroupRequired => Some("pass --group <name> or set UNSEAL_GROUP".to_string()),
            Error::MissingCommand => {
                Some("usage: unseal -g <group> wrap <program> [args...]".to_string())
            }
            Error::Store(StoreError::NotFound { group, .. }) => {
                Some(format!("run: unseal -g {} edit", group))
            }
            Error::Cipher(CipherError::NotInstalled(_)) => {
                Some("install GnuPG or point UNSEAL_GPG at it".to_string())
            }
            Error::CleanupFailed { .. } => Some("delete the file above by hand".to_string()),
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(&hint);
        }
        std::process::exit(1);
    }
}
