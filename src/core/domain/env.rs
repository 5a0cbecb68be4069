//! Env type.
//!
//! Parses decrypted `KEY=VALUE` text into the variables handed to a child
//! process.

use std::collections::HashMap;

use tracing::trace;
use zeroize::Zeroizing;

use crate::core::types::VarName;

/// Variables decoded from a store, keyed by name.
///
/// Values are wiped from memory when the map is dropped.
#[derive(Debug, Clone, Default)]
pub struct EnvMap {
    vars: HashMap<VarName, Zeroizing<String>>,
}

impl EnvMap {
    /// Parse line-oriented `KEY=VALUE` text.
    ///
    /// CRLF is normalized to LF and blank lines are skipped. Each line is
    /// split on its first `=`, so values may themselves contain `=`. Keys and
    /// values are kept verbatim, surrounding whitespace included. A line
    /// without `=` is ignored. On duplicate keys the last line wins.
    pub fn parse(raw: &str) -> Self {
        let normalized = Zeroizing::new(raw.replace("\r\n", "\n"));
        let mut vars = HashMap::new();

        for (index, line) in normalized.split('\n').enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            match line.split_once('=') {
                Some((key, value)) => {
                    vars.insert(key.to_string(), Zeroizing::new(value.to_string()));
                }
                None => trace!(line = index + 1, "skipping line without '='"),
            }
        }

        trace!(vars = vars.len(), "parsed environment");
        Self { vars }
    }

    /// Get a value by name
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(|v| v.as_str())
    }

    /// Variable names, sorted
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.vars.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// All variables as name/value pairs, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of variables
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether empty
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
