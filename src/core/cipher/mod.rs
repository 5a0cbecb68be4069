//! Encryption engine abstraction.
//!
//! The store never encrypts anything itself: it hands files to a [`Cipher`].
//! The only backend is [`Gpg`], which drives the `gpg` CLI with
//! passphrase-based (symmetric) encryption.
//!
//! ## Adding a New Backend
//!
//! 1. Implement the `Cipher` trait
//! 2. Add the implementation in a new file (e.g., `age.rs`)
//! 3. Select it in [`from_settings`]

use std::path::Path;

use crate::core::config::Settings;
use crate::core::types::Plaintext;
use crate::error::Result;

mod gpg;

pub use gpg::Gpg;

/// Encryption engine.
///
/// Both operations work on files and may prompt the user on the terminal.
pub trait Cipher {
    /// Decrypt the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::DecryptFailed` if the file is missing, is not
    /// valid ciphertext, or the passphrase is wrong.
    fn decrypt(&self, path: &Path) -> Result<Plaintext>;

    /// Encrypt `source` with a passphrase, writing armored ciphertext to
    /// `dest`.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::EncryptFailed` if the engine fails.
    fn encrypt_symmetric(&self, source: &Path, dest: &Path) -> Result<()>;

    /// Backend name for logging.
    fn name(&self) -> &'static str;
}

/// Build the configured cipher backend.
pub fn from_settings(settings: &Settings) -> Box<dyn Cipher> {
    Box::new(Gpg::new(&settings.gpg, &settings.cipher_algo))
}
