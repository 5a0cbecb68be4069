//! Type aliases for domain concepts.

use zeroize::Zeroizing;

/// Decrypted `KEY=VALUE` text, wiped from memory on drop.
pub type Plaintext = Zeroizing<String>;

/// An environment variable name.
pub type VarName = String;
