//! GPG cipher backend.
//!
//! Drives the `gpg` CLI in symmetric mode. gpg asks for the passphrase
//! itself (through pinentry or the terminal), so stdin is inherited while
//! stdout and stderr are captured.
//!
//! ## Requirements
//!
//! - `gpg` CLI must be installed (or `UNSEAL_GPG` must point at it)

use std::path::Path;
use std::process::Command;

use tracing::trace;
use zeroize::Zeroizing;

use super::Cipher;
use crate::core::exec;
use crate::core::types::Plaintext;
use crate::error::{CipherError, Result};

/// Flags passed on every invocation.
const QUIET: [&str; 2] = ["--quiet", "--no-verbose"];

/// GPG cipher backend using the gpg CLI
#[derive(Debug, Clone)]
pub struct Gpg {
    program: String,
    cipher_algo: String,
}

impl Gpg {
    /// Create a backend running `program` with `--cipher-algo cipher_algo`.
    pub fn new(program: &str, cipher_algo: &str) -> Self {
        Self {
            program: program.to_string(),
            cipher_algo: cipher_algo.to_string(),
        }
    }

    /// Check that the gpg program can be found.
    fn check_gpg(&self) -> Result<()> {
        which::which(&self.program)
            .map_err(|_| CipherError::NotInstalled(self.program.clone()))?;
        Ok(())
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(QUIET);
        cmd
    }
}

impl Cipher for Gpg {
    fn name(&self) -> &'static str {
        "gpg"
    }

    fn decrypt(&self, path: &Path) -> Result<Plaintext> {
        trace!(path = %path.display(), "decrypting with GPG");

        self.check_gpg()?;

        let mut cmd = self.command();
        cmd.arg("-d").arg(path);

        let output = exec::captured(&mut cmd)
            .map_err(|e| CipherError::DecryptFailed(format!("failed to spawn gpg: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CipherError::DecryptFailed(format!(
                "gpg exited with {}: {}",
                output.status,
                stderr.trim()
            ))
            .into());
        }

        let plaintext = String::from_utf8(output.stdout).map_err(|e| {
            // Wipe the rejected bytes as well
            drop(Zeroizing::new(e.into_bytes()));
            CipherError::DecryptFailed("decrypted secrets are not valid UTF-8".to_string())
        })?;

        trace!(plaintext_len = plaintext.len(), "decrypted with GPG");
        Ok(Zeroizing::new(plaintext))
    }

    fn encrypt_symmetric(&self, source: &Path, dest: &Path) -> Result<()> {
        trace!(
            source = %source.display(),
            dest = %dest.display(),
            "encrypting with GPG"
        );

        self.check_gpg()?;

        let mut cmd = self.command();
        cmd.args(["--armor", "--cipher-algo", &self.cipher_algo, "-c", "-o"])
            .arg(dest)
            .arg(source);

        let output = exec::captured(&mut cmd)
            .map_err(|e| CipherError::EncryptFailed(format!("failed to spawn gpg: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CipherError::EncryptFailed(format!(
                "gpg exited with {}: {}",
                output.status,
                stderr.trim()
            ))
            .into());
        }

        trace!("encrypted with GPG");
        Ok(())
    }
}
