//! Command helper methods for Test.

use super::{fake_gpg, Test};
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create an unseal command with an isolated environment.
    ///
    /// Returns a Command configured with:
    /// - HOME set to the temporary home directory
    /// - TMPDIR set to the temporary scratch directory
    /// - UNSEAL_GPG pointing at the fake gpg
    /// - EDITOR set to a no-op
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("unseal").expect("failed to find unseal binary");
        cmd.env("HOME", self.home.path());
        // Windows uses USERPROFILE instead of HOME for home directory
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("TMPDIR", self.tmp.path());
        cmd.env("UNSEAL_GPG", fake_gpg());
        cmd.env("EDITOR", "true");
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("UNSEAL_GROUP");
        cmd.env_remove("UNSEAL_SECRETS_DIR");
        cmd.env_remove("UNSEAL_LOG");
        cmd.env_remove("FAKE_GPG_FAIL");
        cmd.current_dir(self.work.path());
        cmd
    }

    /// Shortcut for `unseal -g <group> decrypt`.
    pub fn decrypt(&self, group: &str) -> Output {
        self.cmd()
            .args(["-g", group, "decrypt"])
            .output()
            .expect("failed to run unseal decrypt")
    }

    /// Shortcut for `unseal -g <group> edit` with `editor` as EDITOR.
    pub fn edit(&self, group: &str, editor: &str) -> Output {
        self.cmd()
            .env("EDITOR", editor)
            .args(["-g", group, "edit"])
            .output()
            .expect("failed to run unseal edit")
    }

    /// Shortcut for `unseal -g <group> wrap <command...>`.
    pub fn wrap(&self, group: &str, command: &[&str]) -> Output {
        self.cmd()
            .args(["-g", group, "wrap"])
            .args(command)
            .output()
            .expect("failed to run unseal wrap")
    }

    /// Shortcut for `unseal -g <group> path`.
    pub fn path(&self, group: &str) -> Output {
        self.cmd()
            .args(["-g", group, "path"])
            .output()
            .expect("failed to run unseal path")
    }
}
