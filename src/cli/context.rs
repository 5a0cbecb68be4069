//! Per-invocation context shared by the store commands.

use std::path::PathBuf;

use crate::core::cipher::{self, Cipher};
use crate::core::config::{Overrides, Settings};
use crate::core::domain::Group;
use crate::core::store::SecretsStore;
use crate::error::Result;

/// Resolved settings plus the group named on the command line.
pub struct Context {
    pub settings: Settings,
    group: Option<String>,
}

impl Context {
    /// Resolve settings from flags, environment and the config file.
    ///
    /// The group is validated lazily by [`Context::store`] so that a bad
    /// group name is reported after argument checks.
    pub fn load(group: Option<String>, secrets_dir: Option<PathBuf>) -> Result<Self> {
        let overrides = Overrides {
            secrets_dir,
            ..Overrides::from_env()
        };

        Ok(Self {
            settings: Settings::load(overrides)?,
            group,
        })
    }

    /// The store for the requested group.
    ///
    /// # Errors
    ///
    /// Returns `Error::GroupRequired` if no group was given, or
    /// `Error::InvalidGroup` if it cannot name a file.
    pub fn store(&self) -> Result<SecretsStore> {
        let group = Group::new(self.group.as_deref().unwrap_or_default())?;
        Ok(SecretsStore::open(&self.settings.secrets_dir, group))
    }

    /// The configured encryption engine.
    pub fn cipher(&self) -> Box<dyn Cipher> {
        cipher::from_settings(&self.settings)
    }
}
