//! Edit command.
//!
//! Opens the group's secrets in the user's editor and re-encrypts them.

use crate::cli::{output, Context};
use crate::core::edit::{EditWorkflow, Editor};
use crate::error::Result;

/// Edit the secrets for the selected group.
///
/// Prints one status line to stderr on success. If the store was installed
/// but a plaintext temp file could not be removed, every such file is
/// reported and the first failure is returned so the process exits non-zero.
pub fn execute(ctx: &Context) -> Result<()> {
    let store = ctx.store()?;
    let cipher = ctx.cipher();
    let editor = Editor::parse(&ctx.settings.editor);

    let outcome =
        EditWorkflow::new(&store, cipher.as_ref(), &editor, &ctx.settings.temp_dir).run()?;

    let verb = if outcome.created { "created" } else { "updated" };
    output::success(&format!("{} secrets for {}", verb, store.group()));

    let mut failures = outcome.cleanup_failures.into_iter();
    match failures.next() {
        None => Ok(()),
        Some(first) => {
            output::warn("secrets were saved, but plaintext was left on disk");
            for e in failures {
                output::error(&e.to_string());
            }
            Err(first)
        }
    }
}
