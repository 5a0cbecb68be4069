//! Unseal - per-group encrypted secrets for the command line.
//!
//! Each group's secrets live in one gpg-encrypted file of `KEY=VALUE`
//! lines. They can be printed, edited in `$EDITOR` and re-encrypted, or
//! injected as environment variables into a wrapped program.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── decrypt       # Print decrypted secrets
//! │   ├── edit          # Edit and re-encrypt
//! │   ├── wrap          # Run with injected secrets
//! │   ├── path          # Show the store location
//! │   ├── completions   # Shell completions
//! │   ├── context       # Settings, store and cipher for a command
//! │   └── output        # Styled status lines on stderr
//! └── core/             # Core library components
//!     ├── config        # Settings resolution
//!     ├── cipher/       # Encryption engine (gpg)
//!     ├── domain/       # Group name, env parsing
//!     ├── ephemeral     # Owner-only temp files
//!     ├── store/        # <root>/<group>.gpg and atomic install
//!     ├── edit          # Edit state machine
//!     └── wrap          # Child process with secrets
//! ```

pub mod cli;
pub mod core;
pub mod error;
