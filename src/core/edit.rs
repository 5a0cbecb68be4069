//! Interactive edit of a group's secrets.
//!
//! ```text
//! Start -> Decrypted -> Edited -> Encrypted -> Installed
//! ```
//!
//! The plaintext only ever exists on disk as an [`EphemeralFile`] inside a
//! private [`EphemeralDir`]. It is deleted right after encryption whether or
//! not encryption worked, and on every earlier exit path. An edit that changes nothing is still encrypted
//! and installed again.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, error};

use crate::core::cipher::Cipher;
use crate::core::constants;
use crate::core::ephemeral::{EphemeralDir, EphemeralFile, EphemeralPath};
use crate::core::exec;
use crate::core::store::SecretsStore;
use crate::error::{Error, Result};

/// Editor command line, e.g. `vi` or `code --wait`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editor {
    program: String,
    args: Vec<String>,
}

impl Editor {
    /// Split an editor command line on whitespace.
    ///
    /// A blank command line falls back to the default editor. Arguments
    /// cannot be quoted, so a program path containing spaces only works when
    /// the whole command line names an existing file, which is then run
    /// without arguments.
    pub fn parse(command_line: &str) -> Self {
        let trimmed = command_line.trim();
        if trimmed.contains(char::is_whitespace) && Path::new(trimmed).is_file() {
            return Self {
                program: trimmed.to_string(),
                args: Vec::new(),
            };
        }

        let mut parts = command_line.split_whitespace().map(str::to_string);
        match parts.next() {
            Some(program) => Self {
                program,
                args: parts.collect(),
            },
            None => Self {
                program: constants::DEFAULT_EDITOR.to_string(),
                args: Vec::new(),
            },
        }
    }

    /// Program to run
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Open `path` and wait for the editor to exit.
    ///
    /// # Errors
    ///
    /// Returns `Error::EditFailed` if the editor cannot be started or exits
    /// unsuccessfully.
    pub fn open(&self, path: &Path) -> Result<()> {
        debug!(editor = %self.program, "opening editor");

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).arg(path);

        let status = exec::interactive(&mut cmd)
            .map_err(|e| Error::EditFailed(format!("failed to start {}: {}", self.program, e)))?;

        if !status.success() {
            return Err(Error::EditFailed(format!(
                "{} exited with {}",
                self.program, status
            )));
        }

        Ok(())
    }
}

/// Progress of an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    Start,
    Decrypted,
    Edited,
    Encrypted,
    Installed,
}

impl fmt::Display for EditState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::Decrypted => "decrypted",
            Self::Edited => "edited",
            Self::Encrypted => "encrypted",
            Self::Installed => "installed",
        };
        f.write_str(name)
    }
}

/// Result of a successful edit.
#[derive(Debug)]
pub struct EditOutcome {
    /// The store did not exist before this edit
    pub created: bool,
    /// Temp files that could not be removed even though the edit succeeded
    pub cleanup_failures: Vec<Error>,
}

/// One edit of one group's store.
pub struct EditWorkflow<'a> {
    store: &'a SecretsStore,
    cipher: &'a dyn Cipher,
    editor: &'a Editor,
    temp_dir: PathBuf,
    state: EditState,
}

impl<'a> EditWorkflow<'a> {
    /// Prepare an edit; ephemeral files are created in `temp_dir`.
    pub fn new(
        store: &'a SecretsStore,
        cipher: &'a dyn Cipher,
        editor: &'a Editor,
        temp_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            store,
            cipher,
            editor,
            temp_dir: temp_dir.into(),
            state: EditState::Start,
        }
    }

    /// Current state
    pub fn state(&self) -> EditState {
        self.state
    }

    /// Decrypt, edit, re-encrypt and install.
    ///
    /// Holds the group's advisory lock throughout, so concurrent edits of
    /// the same group run one after another.
    ///
    /// # Errors
    ///
    /// Returns the first failing step's error: decryption, temp file
    /// creation, `EditFailed`, `EncryptFailed` or `ReplaceFailed`. Cleanup
    /// failures on an error path are logged, never returned in place of
    /// that error.
    pub fn run(&mut self) -> Result<EditOutcome> {
        let _lock = self.store.lock()?;
        let created = !self.store.exists()?;

        let plaintext = self.store.decrypt(self.cipher)?;
        let workspace = EphemeralDir::create_in(&self.temp_dir)?;
        let ephemeral = EphemeralFile::create_in(workspace.path(), &plaintext)?;
        drop(plaintext);
        self.advance(EditState::Decrypted);

        // On the error paths below the workspace guard removes the (by then
        // empty) directory when dropped.
        if let Err(e) = self.editor.open(ephemeral.path()) {
            report(ephemeral.close());
            return Err(e);
        }
        self.advance(EditState::Edited);

        let ciphertext = EphemeralPath::new(encrypted_path(ephemeral.path()));
        let encrypted = self
            .cipher
            .encrypt_symmetric(ephemeral.path(), ciphertext.path());

        let mut cleanup_failures = Vec::new();
        collect(&mut cleanup_failures, ephemeral.close());
        encrypted?;
        self.advance(EditState::Encrypted);

        if let Err(e) = self.store.replace_with(ciphertext.path()) {
            report(ciphertext.remove());
            return Err(e);
        }
        self.advance(EditState::Installed);

        // Gone after a rename; left behind by the copy fallback.
        collect(&mut cleanup_failures, ciphertext.remove());

        // A leftover that keeps the workspace alive was reported above.
        let closed = workspace.close();
        if cleanup_failures.is_empty() {
            collect(&mut cleanup_failures, closed);
        } else {
            report(closed);
        }

        Ok(EditOutcome {
            created,
            cleanup_failures,
        })
    }

    fn advance(&mut self, next: EditState) {
        debug!(group = %self.store.group(), from = %self.state, to = %next, "edit");
        self.state = next;
    }
}

/// `<plaintext path>.gpg`, next to the plaintext.
fn encrypted_path(plaintext: &Path) -> PathBuf {
    let mut path = OsString::from(plaintext.as_os_str());
    path.push(".");
    path.push(constants::STORE_EXT);
    PathBuf::from(path)
}

fn report(cleanup: Result<()>) {
    if let Err(e) = cleanup {
        error!("{}", e);
    }
}

fn collect(failures: &mut Vec<Error>, cleanup: Result<()>) {
    if let Err(e) = cleanup {
        error!("{}", e);
        failures.push(e);
    }
}
