//! Subprocess helpers.
//!
//! Every external program unseal runs keeps the real terminal on stdin, so
//! gpg can prompt for a passphrase and editors can take input. Output is
//! either captured (gpg) or passed straight through (editor, wrapped
//! program).

use std::io;
use std::process::{Command, ExitStatus, Output, Stdio};

use tracing::trace;

/// Run to completion with stdin inherited and stdout/stderr captured.
pub fn captured(cmd: &mut Command) -> io::Result<Output> {
    trace!(program = ?cmd.get_program(), "running captured");
    cmd.stdin(Stdio::inherit())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
}

/// Run to completion with all standard streams inherited.
pub fn interactive(cmd: &mut Command) -> io::Result<ExitStatus> {
    trace!(program = ?cmd.get_program(), "running interactive");
    cmd.stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
}

/// Exit code a shell would report: the code itself, or 128 + signal.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}
