//! Ephemeral files.
//!
//! Owner-only temporary files that hold plaintext (or freshly produced
//! ciphertext) for the duration of one operation, inside a private
//! directory. Every guard deletes its path when dropped; `close`/`remove` do
//! the same but return the failure, since a file left behind may be
//! unencrypted secrets on disk.

use std::fs::{self, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use tempfile::{Builder, NamedTempFile};
use tracing::{debug, error, trace};

use crate::core::constants;
use crate::error::{Error, Result};

/// A uniquely named, owner-only (0600) temporary file.
pub struct EphemeralFile {
    inner: Option<NamedTempFile>,
    path: PathBuf,
}

impl EphemeralFile {
    /// Create a file in `dir` holding `contents`.
    ///
    /// # Errors
    ///
    /// Returns `Error::TempFile` if the file cannot be created, restricted
    /// or written. A partially created file is removed before returning.
    pub fn create_in(dir: &Path, contents: &str) -> Result<Self> {
        let mut file = Builder::new()
            .prefix(constants::TEMP_PREFIX)
            .rand_bytes(8)
            .tempfile_in(dir)
            .map_err(Error::TempFile)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.as_file()
                .set_permissions(fs::Permissions::from_mode(constants::FILE_MODE))
                .map_err(Error::TempFile)?;
        }

        file.write_all(contents.as_bytes())
            .and_then(|_| file.flush())
            .map_err(Error::TempFile)?;

        let path = file.path().to_path_buf();
        debug!(path = %path.display(), "created ephemeral file");

        Ok(Self {
            inner: Some(file),
            path,
        })
    }

    /// Path of the file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite, close and delete the file.
    ///
    /// A file that is already gone (an editor may delete or replace it)
    /// counts as removed.
    ///
    /// # Errors
    ///
    /// Returns `Error::CleanupFailed` if the file still exists afterwards.
    pub fn close(mut self) -> Result<()> {
        self.cleanup()
    }

    fn cleanup(&mut self) -> Result<()> {
        let Some(file) = self.inner.take() else {
            return Ok(());
        };

        scrub(&self.path);

        match file.close() {
            Ok(()) => {
                debug!(path = %self.path.display(), "removed ephemeral file");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(Error::CleanupFailed {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

impl Drop for EphemeralFile {
    fn drop(&mut self) {
        if let Err(e) = self.cleanup() {
            error!("{}", e);
        }
    }
}

/// A path that a child process writes to, deleted when the guard goes.
///
/// Used for the ciphertext produced next to an [`EphemeralFile`]. After a
/// rename-based install the file is already gone and removal is a no-op.
pub struct EphemeralPath {
    path: PathBuf,
    armed: bool,
}

impl EphemeralPath {
    /// Guard `path`. The file need not exist yet.
    pub fn new(path: PathBuf) -> Self {
        Self { path, armed: true }
    }

    /// Path being guarded
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the file now.
    ///
    /// # Errors
    ///
    /// Returns `Error::CleanupFailed` if the file exists and cannot be
    /// removed.
    pub fn remove(mut self) -> Result<()> {
        self.cleanup()
    }

    fn cleanup(&mut self) -> Result<()> {
        if !std::mem::replace(&mut self.armed, false) {
            return Ok(());
        }
        remove_with(&self.path, |p| fs::remove_file(p))
    }
}

impl Drop for EphemeralPath {
    fn drop(&mut self) {
        if let Err(e) = self.cleanup() {
            error!("{}", e);
        }
    }
}

/// A private (0700) directory for the ephemeral files of one operation.
///
/// Other users cannot see or pre-create names inside it. Only the empty
/// directory is removed: anything still inside when it is closed, such as
/// an editor backup, stays in place and the removal is reported.
pub struct EphemeralDir {
    path: PathBuf,
    armed: bool,
}

impl EphemeralDir {
    /// Create a uniquely named directory in `dir`.
    ///
    /// # Errors
    ///
    /// Returns `Error::TempFile` if the directory cannot be created or
    /// restricted.
    pub fn create_in(dir: &Path) -> Result<Self> {
        let path = Builder::new()
            .prefix(constants::TEMP_PREFIX)
            .rand_bytes(8)
            .tempdir_in(dir)
            .map_err(Error::TempFile)?
            .keep();
        let guard = Self { path, armed: true };

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&guard.path, fs::Permissions::from_mode(constants::DIR_MODE))
                .map_err(Error::TempFile)?;
        }

        debug!(path = %guard.path.display(), "created ephemeral directory");
        Ok(guard)
    }

    /// Path of the directory
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the directory.
    ///
    /// # Errors
    ///
    /// Returns `Error::CleanupFailed` if it cannot be removed, typically
    /// because something was left inside.
    pub fn close(mut self) -> Result<()> {
        self.cleanup()
    }

    fn cleanup(&mut self) -> Result<()> {
        if !std::mem::replace(&mut self.armed, false) {
            return Ok(());
        }
        remove_with(&self.path, |p| fs::remove_dir(p))
    }
}

impl Drop for EphemeralDir {
    fn drop(&mut self) {
        if let Err(e) = self.cleanup() {
            error!("{}", e);
        }
    }
}

/// Remove `path` with `remove`; already gone counts as removed.
fn remove_with(path: &Path, remove: fn(&Path) -> io::Result<()>) -> Result<()> {
    match remove(path) {
        Ok(()) => {
            debug!(path = %path.display(), "removed ephemeral path");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(Error::CleanupFailed {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Best-effort overwrite of a file's bytes with zeros before unlinking.
fn scrub(path: &Path) {
    let result = (|| -> io::Result<()> {
        let len = fs::metadata(path)?.len();
        let mut file = OpenOptions::new().write(true).open(path)?;
        io::copy(&mut io::repeat(0).take(len), &mut file)?;
        file.sync_all()
    })();

    if let Err(e) = result {
        trace!(path = %path.display(), error = %e, "scrub skipped");
    }
}
