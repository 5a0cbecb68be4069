//! Skip macros for tests that depend on the host.

/// Skip a test if a real gpg is not installed.
#[macro_export]
macro_rules! skip_without_gpg {
    () => {
        if which::which("gpg").is_err() {
            eprintln!("SKIPPED: gpg not installed");
            return;
        }
    };
}
