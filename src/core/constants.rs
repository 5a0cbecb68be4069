//! Constants used throughout unseal.
//!
//! Centralizes magic strings and configuration values.

/// Secrets root relative to HOME (~/.secrets).
pub const SECRETS_DIR: &str = ".secrets";

/// File extension of an encrypted store (`<group>.gpg`).
pub const STORE_EXT: &str = "gpg";

/// File extension of the per-group advisory lock (`<group>.lock`).
pub const LOCK_EXT: &str = "lock";

/// Optional settings file inside the secrets root.
pub const CONFIG_FILE: &str = "config.toml";

/// Editor used when `EDITOR` is unset.
pub const DEFAULT_EDITOR: &str = "vi";

/// Encryption engine program.
pub const DEFAULT_GPG: &str = "gpg";

/// Symmetric cipher passed to `gpg --cipher-algo`.
pub const DEFAULT_CIPHER_ALGO: &str = "AES256";

/// Prefix of ephemeral plaintext files in the temp directory.
pub const TEMP_PREFIX: &str = "unseal.";

/// Owner-only read/write.
pub const FILE_MODE: u32 = 0o600;

/// Owner-only directory.
pub const DIR_MODE: u32 = 0o700;

/// Environment variable overriding the log filter.
pub const LOG_ENV: &str = "UNSEAL_LOG";
