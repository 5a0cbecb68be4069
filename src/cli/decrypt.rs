//! Decrypt command.
//!
//! Prints the group's plaintext to stdout.

use std::io::Write;

use crate::cli::Context;
use crate::error::Result;

/// Print the decrypted secrets.
pub fn execute(ctx: &Context) -> Result<()> {
    let store = ctx.store()?;
    store.require_exists()?;

    let plaintext = store.decrypt(ctx.cipher().as_ref())?;

    let mut out = std::io::stdout().lock();
    writeln!(out, "{}", plaintext.as_str())?;
    out.flush()?;
    Ok(())
}
