//! Wrap command.
//!
//! Runs a program with the group's secrets injected as environment variables.

use std::path::PathBuf;

use crate::cli::{output, Context};
use crate::core::{exec, wrap};
use crate::error::{Error, Result};

/// Exit code a shell uses for a command that could not be run.
const NOT_RUN: i32 = 127;

/// Run `command` with the secrets of `group`.
///
/// A program that cannot be started or exits non-zero is reported on
/// stderr without failing this process. With `propagate_exit_code` this
/// process exits with the program's code instead (127 if it never ran).
pub fn execute(
    group: Option<String>,
    secrets_dir: Option<PathBuf>,
    command: &[String],
    propagate_exit_code: bool,
) -> Result<()> {
    let program = command.first().ok_or(Error::MissingCommand)?;

    let ctx = Context::load(group, secrets_dir)?;
    let store = ctx.store()?;

    let status = match wrap::run(&store, ctx.cipher().as_ref(), command) {
        Ok(status) => status,
        Err(e @ Error::SpawnFailed { .. }) => {
            output::error(&e.to_string());
            if propagate_exit_code {
                std::process::exit(NOT_RUN);
            }
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    if status.success() {
        return Ok(());
    }

    let code = exec::exit_code(status);
    if propagate_exit_code {
        std::process::exit(code);
    }

    output::warn(&format!("{} exited with status {}", program, code));
    Ok(())
}
