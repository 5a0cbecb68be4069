//! Settings resolution.
//!
//! Every setting is resolved once per invocation, in order of precedence:
//! CLI flag, environment variable, `~/.secrets/config.toml`, built-in default.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Contents of the optional `config.toml`.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Directory holding `<group>.gpg` stores
    #[serde(default)]
    pub secrets_dir: Option<PathBuf>,
    /// Editor command, used when `EDITOR` is unset
    #[serde(default)]
    pub editor: Option<String>,
    /// Encryption engine program
    #[serde(default)]
    pub gpg: Option<String>,
    /// Symmetric cipher passed to gpg
    #[serde(default)]
    pub cipher_algo: Option<String>,
}

impl FileConfig {
    /// Load from `path`.
    ///
    /// A missing file yields the default (empty) configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Read` if the file exists but cannot be read,
    /// or `ConfigError::Parse` if the TOML is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");

        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                }
                .into())
            }
        };

        let config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(config)
    }
}

/// Overrides taken from the environment and the command line.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    /// `--secrets-dir` / `UNSEAL_SECRETS_DIR`
    pub secrets_dir: Option<PathBuf>,
    /// `EDITOR`
    pub editor: Option<String>,
    /// `UNSEAL_GPG`
    pub gpg: Option<String>,
}

impl Overrides {
    /// Read `EDITOR` and `UNSEAL_GPG` from the process environment.
    ///
    /// Empty values count as unset.
    pub fn from_env() -> Self {
        fn non_empty(name: &str) -> Option<String> {
            std::env::var(name).ok().filter(|v| !v.trim().is_empty())
        }

        Self {
            secrets_dir: None,
            editor: non_empty("EDITOR"),
            gpg: non_empty("UNSEAL_GPG"),
        }
    }
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory holding `<group>.gpg` stores
    pub secrets_dir: PathBuf,
    /// Editor command line (program and leading arguments)
    pub editor: String,
    /// Encryption engine program
    pub gpg: String,
    /// Symmetric cipher passed to gpg
    pub cipher_algo: String,
    /// Directory for ephemeral plaintext files
    pub temp_dir: PathBuf,
}

impl Settings {
    /// Resolve settings using the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoHome` if HOME cannot be determined, or any
    /// error from loading the config file.
    pub fn load(overrides: Overrides) -> Result<Self> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHome)?;
        Self::resolve(&home, overrides)
    }

    /// Resolve settings relative to an explicit home directory.
    pub fn resolve(home: &Path, overrides: Overrides) -> Result<Self> {
        let default_dir = home.join(constants::SECRETS_DIR);
        let file = FileConfig::load(&default_dir.join(constants::CONFIG_FILE))?;

        let settings = Self {
            secrets_dir: overrides
                .secrets_dir
                .or(file.secrets_dir)
                .unwrap_or(default_dir),
            editor: overrides
                .editor
                .or(file.editor)
                .unwrap_or_else(|| constants::DEFAULT_EDITOR.to_string()),
            gpg: overrides
                .gpg
                .or(file.gpg)
                .unwrap_or_else(|| constants::DEFAULT_GPG.to_string()),
            cipher_algo: file
                .cipher_algo
                .unwrap_or_else(|| constants::DEFAULT_CIPHER_ALGO.to_string()),
            temp_dir: std::env::temp_dir(),
        };

        debug!(
            secrets_dir = %settings.secrets_dir.display(),
            editor = %settings.editor,
            gpg = %settings.gpg,
            "settings resolved"
        );

        Ok(settings)
    }
}
