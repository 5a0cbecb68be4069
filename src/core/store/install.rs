//! Atomic replacement of the store file.
//!
//! A rename on the same filesystem is atomic: readers see either the old
//! store or the new one. When the rename fails (typically because the temp
//! directory is on another device) the ciphertext is copied into a staging
//! file next to the store and renamed from there, so the store path still
//! never holds a partial file.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::Builder;
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::constants;

/// Move `source` onto `dest`.
///
/// On success `dest` is owner-only. `source` is gone after a rename but
/// left in place by the copy fallback; removing it is up to the caller. On
/// failure `dest` is unchanged and any staging file has been removed.
pub(super) fn install(source: &Path, dest: &Path) -> io::Result<()> {
    // Before the rename: a failure here must leave `dest` untouched.
    restrict(source)?;

    match fs::rename(source, dest) {
        Ok(()) => {
            debug!(dest = %dest.display(), "installed by rename");
            Ok(())
        }
        Err(rename_err) => {
            debug!(error = %rename_err, "rename failed, copying instead");
            copy_then_rename(source, dest)
        }
    }
}

fn copy_then_rename(source: &Path, dest: &Path) -> io::Result<()> {
    let bytes = Zeroizing::new(fs::read(source)?);
    let dir = dest
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let prefix = format!(
        ".{}.",
        dest.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    );

    // Dropping the staging file on any error below removes it.
    let mut staged = Builder::new()
        .prefix(&prefix)
        .suffix(".tmp")
        .tempfile_in(dir)?;
    staged.write_all(&bytes)?;
    staged.as_file().sync_all()?;
    restrict(staged.path())?;
    staged.persist(dest).map_err(|e| e.error)?;

    debug!(dest = %dest.display(), "installed by copy");
    Ok(())
}

fn restrict(path: &Path) -> io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(constants::FILE_MODE))?;
    }
    #[cfg(not(unix))]
    let _ = path;

    Ok(())
}
