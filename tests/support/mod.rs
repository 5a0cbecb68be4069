//! Test support utilities for unseal integration tests.
//!
//! Provides an isolated home, temp and secrets directory per test plus a
//! fake `gpg` whose "ciphertext" is the plaintext behind a header line.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod skip;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Test environment with isolated temp directories.
///
/// No process-global state is mutated: every child process gets its own
/// HOME and TMPDIR, so tests can safely run in parallel.
pub struct Test {
    /// Temporary home directory; the store lives in `.secrets` below it
    pub home: TempDir,
    /// TMPDIR handed to unseal, so leftover plaintext can be detected
    pub tmp: TempDir,
    /// Scratch space for editor scripts and marker files
    pub work: TempDir,
}

impl Test {
    /// Create a new empty test environment.
    pub fn new() -> Self {
        let home = TempDir::new().expect("failed to create temp home");
        let tmp = TempDir::new().expect("failed to create temp dir");
        let work = TempDir::new().expect("failed to create work dir");

        Self { home, tmp, work }
    }

    /// Create a test environment with `group` already holding `contents`.
    pub fn with_store(group: &str, contents: &str) -> Self {
        let t = Self::new();
        t.seed(group, contents);
        t
    }

    /// Default secrets directory.
    pub fn secrets_dir(&self) -> PathBuf {
        self.home.path().join(".secrets")
    }

    /// Path of the encrypted file for `group`.
    pub fn store_path(&self, group: &str) -> PathBuf {
        self.secrets_dir().join(format!("{}.gpg", group))
    }

    /// Write an encrypted store for `group` directly, bypassing unseal.
    pub fn seed(&self, group: &str, contents: &str) {
        fs::create_dir_all(self.secrets_dir()).expect("failed to create secrets dir");
        fs::write(self.store_path(group), fake_encrypt(contents))
            .expect("failed to write store");
    }

    /// Decrypt `group`'s store directly, bypassing unseal.
    pub fn read_store(&self, group: &str) -> String {
        let raw = fs::read_to_string(self.store_path(group)).expect("failed to read store");
        raw.strip_prefix(FAKE_HEADER)
            .expect("store is not fake-encrypted")
            .to_string()
    }

    /// Write an editor script and return the EDITOR value running it.
    ///
    /// The script receives the plaintext file path as `$1`.
    pub fn editor(&self, body: &str) -> String {
        let script = self.work.path().join("editor.sh");
        fs::write(&script, format!("#!/bin/sh\nset -e\n{}\n", body))
            .expect("failed to write editor script");
        format!("sh {}", script.display())
    }

    /// EDITOR value that replaces the file with `contents`.
    pub fn editor_writing(&self, contents: &str) -> String {
        let source = self.work.path().join("new-contents");
        fs::write(&source, contents).expect("failed to write editor input");
        self.editor(&format!("cat '{}' > \"$1\"", source.display()))
    }

    /// Path under the work directory, for marker files.
    pub fn work_path(&self, name: &str) -> PathBuf {
        self.work.path().join(name)
    }

    /// Files unseal left in its temp directory.
    pub fn temp_leftovers(&self) -> Vec<PathBuf> {
        list(self.tmp.path())
    }
}

fn list(dir: &Path) -> Vec<PathBuf> {
    fs::read_dir(dir)
        .map(|entries| entries.filter_map(|e| e.ok()).map(|e| e.path()).collect())
        .unwrap_or_default()
}
