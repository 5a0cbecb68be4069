//! Error types.
//!
//! Domain errors are grouped by the component that raises them and wrapped
//! by the top-level [`Error`].

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error for all unseal operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("group name is required")]
    GroupRequired,

    #[error("invalid group name '{0}': must not contain path separators")]
    InvalidGroup(String),

    #[error("wrap requires at least an external program to run")]
    MissingCommand,

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("error editing secrets file: {0}")]
    EditFailed(String),

    #[error("temporary file error: {0}")]
    TempFile(#[source] std::io::Error),

    #[error("failed to start '{program}': {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "could not remove temporary file {}: {source}. Unencrypted secrets may have leaked",
        .path.display()
    )]
    CleanupFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the external encryption engine.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("decryption failed: {0}")]
    DecryptFailed(String),

    #[error("encryption failed: {0}")]
    EncryptFailed(String),

    #[error("{0} not found on PATH")]
    NotInstalled(String),
}

/// Errors from locating and replacing the encrypted store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("secrets file for group '{group}' does not exist ({})", .path.display())]
    NotFound { group: String, path: PathBuf },

    #[error("unable to move encrypted file into {}: {source}", .path.display())]
    ReplaceFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to lock {}: {source}", .path.display())]
    Lock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from loading settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unable to determine home directory")]
    NoHome,

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
