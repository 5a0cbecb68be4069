//! Path command.

use crate::cli::{output, Context};
use crate::error::Result;

/// Print the location of the group's encrypted file.
///
/// The path is printed even when the file does not exist yet; a note goes
/// to stderr in that case.
pub fn execute(ctx: &Context) -> Result<()> {
    let store = ctx.store()?;
    println!("{}", store.path().display());

    if !store.exists()? {
        output::hint(&format!(
            "absent; create it with: {}",
            output::cmd(&format!("unseal -g {} edit", store.group()))
        ));
    }
    Ok(())
}
