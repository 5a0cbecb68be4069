//! Run a program with a group's secrets in its environment.
//!
//! Secrets are decrypted in memory, parsed, and set on the child's
//! `Command`; this process's own environment is never modified.

use std::process::{Command, ExitStatus};

use tracing::debug;

use crate::core::cipher::Cipher;
use crate::core::domain::EnvMap;
use crate::core::exec;
use crate::core::store::SecretsStore;
use crate::error::{Error, Result};

/// Decrypt `store` and run `argv` with the secrets as environment variables.
///
/// stdin, stdout and stderr are inherited. Returns the child's exit status
/// once it finishes; a non-zero status is not an error here.
///
/// # Errors
///
/// Returns `Error::MissingCommand` for an empty `argv`,
/// `StoreError::NotFound` if the store is absent, the cipher's error if
/// decryption fails, and `Error::SpawnFailed` if the program cannot be
/// started.
pub fn run(store: &SecretsStore, cipher: &dyn Cipher, argv: &[String]) -> Result<ExitStatus> {
    let (program, args) = argv.split_first().ok_or(Error::MissingCommand)?;
    store.require_exists()?;

    let env = {
        let plaintext = store.decrypt(cipher)?;
        EnvMap::parse(&plaintext)
    };
    debug!(group = %store.group(), vars = env.len(), program = %program, "wrapping");

    let mut cmd = command(&env, program, args);
    exec::interactive(&mut cmd).map_err(|source| Error::SpawnFailed {
        program: program.clone(),
        source,
    })
}

/// Build the child command for `program` and `args` with `env` layered
/// over the inherited environment.
pub fn command(env: &EnvMap, program: &str, args: &[String]) -> Command {
    let mut cmd = Command::new(program);
    cmd.args(args).envs(env.iter());
    cmd
}
