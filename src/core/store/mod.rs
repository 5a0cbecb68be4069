//! Encrypted store for one group.
//!
//! A store is the single file `<secrets-root>/<group>.gpg`. It is either
//! absent (no secrets yet) or present (assumed to be valid ciphertext).
//! Nothing is cached between invocations: every command resolves the path
//! again from the group name.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use fs4::fs_std::FileExt;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::core::cipher::Cipher;
use crate::core::constants;
use crate::core::domain::Group;
use crate::core::types::Plaintext;
use crate::error::{Result, StoreError};

mod install;

/// The encrypted secrets file of a group.
#[derive(Debug, Clone)]
pub struct SecretsStore {
    root: PathBuf,
    group: Group,
    path: PathBuf,
}

impl SecretsStore {
    /// Resolve the store for `group` under `root`.
    pub fn open(root: impl Into<PathBuf>, group: Group) -> Self {
        let root = root.into();
        let path = root.join(format!("{}.{}", group.as_str(), constants::STORE_EXT));
        Self { root, group, path }
    }

    /// Path of the encrypted file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Group this store belongs to
    pub fn group(&self) -> &Group {
        &self.group
    }

    /// Secrets root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether the encrypted file exists.
    ///
    /// # Errors
    ///
    /// A missing file is `Ok(false)`. Any other stat failure, such as
    /// permission denied on the secrets root, is returned as an error rather
    /// than being mistaken for an empty store.
    pub fn exists(&self) -> Result<bool> {
        match fs::symlink_metadata(&self.path) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Fail unless the encrypted file exists.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the store is absent.
    pub fn require_exists(&self) -> Result<()> {
        if self.exists()? {
            return Ok(());
        }

        Err(StoreError::NotFound {
            group: self.group.to_string(),
            path: self.path.clone(),
        }
        .into())
    }

    /// Decrypt the store, trimmed of surrounding whitespace.
    ///
    /// An absent store decrypts to empty text.
    ///
    /// # Errors
    ///
    /// Returns the cipher's error if decryption fails.
    pub fn decrypt(&self, cipher: &dyn Cipher) -> Result<Plaintext> {
        if !self.exists()? {
            debug!(group = %self.group, "store absent, starting empty");
            return Ok(Zeroizing::new(String::new()));
        }

        debug!(group = %self.group, cipher = cipher.name(), "decrypting store");
        let raw = cipher.decrypt(&self.path)?;
        let trimmed = raw.trim();

        if trimmed.len() == raw.len() {
            return Ok(raw);
        }
        Ok(Zeroizing::new(trimmed.to_string()))
    }

    /// Install `encrypted` as the new store, replacing any previous one.
    ///
    /// On success `encrypted` has usually been renamed away; if the copy
    /// fallback was used it is still there and the caller removes it. On
    /// failure the previous store, if any, is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ReplaceFailed` if neither a rename nor the copy
    /// fallback succeeds.
    pub fn replace_with(&self, encrypted: &Path) -> Result<()> {
        self.ensure_root()?;

        install::install(encrypted, &self.path).map_err(|source| StoreError::ReplaceFailed {
            path: self.path.clone(),
            source,
        })?;

        info!(group = %self.group, path = %self.path.display(), "store installed");
        Ok(())
    }

    /// Take the group's advisory edit lock, blocking until it is free.
    ///
    /// The lock is released when the returned guard is dropped.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Lock` if the lock file cannot be opened or
    /// locked.
    pub fn lock(&self) -> Result<StoreLock> {
        self.ensure_root()?;

        let path = self
            .root
            .join(format!("{}.{}", self.group.as_str(), constants::LOCK_EXT));
        let lock_err = |source| StoreError::Lock {
            path: path.clone(),
            source,
        };

        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(lock_err)?;

        debug!(path = %path.display(), "waiting for edit lock");
        file.lock_exclusive().map_err(lock_err)?;
        debug!(path = %path.display(), "edit lock acquired");

        Ok(StoreLock { _file: file })
    }

    /// Create the secrets root with owner-only permissions if missing.
    fn ensure_root(&self) -> Result<()> {
        if self.root.is_dir() {
            return Ok(());
        }

        fs::create_dir_all(&self.root)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.root, fs::Permissions::from_mode(constants::DIR_MODE))?;
        }

        debug!(path = %self.root.display(), "created secrets root");
        Ok(())
    }
}

/// Held advisory lock on a group; released on drop.
#[derive(Debug)]
pub struct StoreLock {
    _file: File,
}
