//! Command-line interface.

pub mod completions;
pub mod context;
pub mod decrypt;
pub mod edit;
pub mod output;
pub mod path;
pub mod wrap;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use context::Context;

/// Unseal - per-group encrypted secrets for the command line.
#[derive(Parser)]
#[command(
    name = "unseal",
    about = "Keep per-group secrets in gpg-encrypted files and inject them into programs",
    version,
    after_help = "gpg and the editor read from the terminal, so unattended runs can \
                  block on a passphrase prompt."
)]
pub struct Cli {
    /// Secrets group to operate on
    #[arg(short, long, global = true, env = "UNSEAL_GROUP")]
    pub group: Option<String>,

    /// Directory holding <group>.gpg files [default: ~/.secrets]
    #[arg(long, global = true, env = "UNSEAL_SECRETS_DIR", value_name = "DIR")]
    pub secrets_dir: Option<PathBuf>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Print the decrypted secrets
    Decrypt,

    /// Edit the secrets in $EDITOR and re-encrypt them
    Edit,

    /// Run a program with the secrets as environment variables
    Wrap {
        /// Exit with the program's exit code instead of reporting it
        #[arg(long)]
        propagate_exit_code: bool,

        /// Program and arguments to run
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// Print the path of the group's encrypted file
    Path,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a command.
pub fn execute(cli: Cli) -> crate::error::Result<()> {
    use Command::*;

    let Cli {
        group,
        secrets_dir,
        command,
        ..
    } = cli;

    match command {
        Decrypt => decrypt::execute(&Context::load(group, secrets_dir)?),
        Edit => edit::execute(&Context::load(group, secrets_dir)?),
        Wrap {
            propagate_exit_code,
            command,
        } => wrap::execute(group, secrets_dir, &command, propagate_exit_code),
        Path => path::execute(&Context::load(group, secrets_dir)?),
        Completions { shell } => completions::execute(shell),
    }
}
