//! Shared CLI output helpers.
//!
//! Everything here writes to stderr so that stdout carries only data
//! (`decrypt` output, `path` output, completions).
//!
//! Color scheme (respects NO_COLOR):
//! - Green: success
//! - Red: errors
//! - Yellow: warnings
//! - Cyan: paths, commands, hints

use console::style;

/// Check if color output is enabled for stderr.
fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none() && console::colors_enabled_stderr()
}

/// Print a success message with checkmark (green).
///
/// Example: `✓ created secrets for ci`
pub fn success(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("✓").for_stderr().green(), msg);
    } else {
        eprintln!("✓ {}", msg);
    }
}

/// Print an error message (red).
///
/// Example: `✗ group name is required`
pub fn error(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("✗").for_stderr().red(), msg);
    } else {
        eprintln!("✗ {}", msg);
    }
}

/// Print a warning message (yellow).
///
/// Example: `⚠ ls exited with status 2`
pub fn warn(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("⚠").for_stderr().yellow(), msg);
    } else {
        eprintln!("⚠ {}", msg);
    }
}

/// Print a hint message (cyan).
///
/// Example: `→ run: unseal -g ci edit`
pub fn hint(msg: &str) {
    if colors_enabled() {
        eprintln!(
            "{} {}",
            style("→").for_stderr().cyan(),
            style(msg).for_stderr().cyan()
        );
    } else {
        eprintln!("→ {}", msg);
    }
}

/// Format a command string in green.
///
/// Returns a colored string that can be used inline.
pub fn cmd(c: &str) -> String {
    if colors_enabled() {
        style(c).for_stderr().green().to_string()
    } else {
        c.to_string()
    }
}
