//! Tests for `unseal wrap`.

use crate::support::*;

#[test]
fn test_wrap_injects_env_vars() {
    let t = Test::with_store("ci", STANDARD_SECRETS);

    let output = t.wrap(
        "ci",
        &["sh", "-c", "printf '%s|%s|%s' \"$DATABASE_URL\" \"$API_KEY\" \"$GREETING\""],
    );
    assert_success(&output);
    assert_eq!(
        stdout(&output),
        "postgres://localhost/mydb?sslmode=require|sk-test-12345|hello world"
    );
}

#[test]
fn test_wrap_keeps_inherited_env() {
    let t = Test::with_store("ci", "A=1");

    let output = t
        .cmd()
        .env("OUTER", "kept")
        .args(["-g", "ci", "wrap", "sh", "-c", "printf '%s %s' \"$A\" \"$OUTER\""])
        .output()
        .unwrap();
    assert_success(&output);
    assert_eq!(stdout(&output), "1 kept");
}

#[test]
fn test_wrap_secret_overrides_inherited() {
    let t = Test::with_store("ci", "OUTER=from-secrets");

    let output = t
        .cmd()
        .env("OUTER", "from-parent")
        .args(["-g", "ci", "wrap", "sh", "-c", "printf '%s' \"$OUTER\""])
        .output()
        .unwrap();
    assert_success(&output);
    assert_eq!(stdout(&output), "from-secrets");
}

#[test]
fn test_wrap_parsing_rules() {
    let t = Test::with_store("ci", "A=1\r\n\r\nnot a pair\r\nB=x=y\r\nA=2\r\nEMPTY=\r\n");

    let output = t.wrap(
        "ci",
        &["sh", "-c", "printf '%s|%s|%s' \"$A\" \"$B\" \"${EMPTY-unset}\""],
    );
    assert_success(&output);
    assert_eq!(stdout(&output), "2|x=y|");
}

#[test]
fn test_wrap_passes_child_flags() {
    let t = Test::with_store("ci", "A=1");

    let output = t.wrap("ci", &["sh", "-c", "printf '%s' \"$*\"", "sh", "-n", "--long"]);
    assert_success(&output);
    assert_eq!(stdout(&output), "-n --long");
}

#[test]
fn test_wrap_is_repeatable() {
    let t = Test::with_store("ci", "TOKEN=abc");
    let argv = ["sh", "-c", "printf '%s' \"$TOKEN\""];

    let first = t.wrap("ci", &argv);
    let second = t.wrap("ci", &argv);
    assert_success(&first);
    assert_success(&second);
    assert_eq!(stdout(&first), "abc");
    assert_eq!(stdout(&second), "abc");
}

#[test]
fn test_wrap_reports_child_failure() {
    let t = Test::with_store("ci", "A=1");

    let output = t.wrap("ci", &["sh", "-c", "exit 3"]);
    assert_success(&output);
    assert_stderr_contains(&output, "exited with status 3");
}

#[test]
fn test_wrap_propagate_exit_code() {
    let t = Test::with_store("ci", "A=1");

    let output = t
        .cmd()
        .args(["-g", "ci", "wrap", "--propagate-exit-code", "sh", "-c", "exit 3"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_wrap_missing_command() {
    let t = Test::with_store("ci", "A=1");

    let output = t.wrap("ci", &[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "requires at least an external program");
}

#[test]
fn test_wrap_missing_store_does_not_run() {
    let t = Test::new();
    let marker = t.work_path("ran");
    let script = format!("touch '{}'", marker.display());

    let output = t.wrap("ci", &["sh", "-c", &script]);
    assert_failure(&output);
    assert_stderr_contains(&output, "does not exist");
    assert!(!marker.exists());
}

#[test]
fn test_wrap_decrypt_failure_does_not_run() {
    let t = Test::with_store("ci", "A=1");
    let marker = t.work_path("ran");
    let script = format!("touch '{}'", marker.display());

    let output = t
        .cmd()
        .env("FAKE_GPG_FAIL", "decrypt")
        .args(["-g", "ci", "wrap", "sh", "-c", &script])
        .output()
        .unwrap();
    assert_failure(&output);
    assert!(!marker.exists());
}

#[test]
fn test_wrap_program_not_found() {
    let t = Test::with_store("ci", "A=1");

    // Reported, but the wrapper itself still succeeds
    let output = t.wrap("ci", &["/nonexistent/program"]);
    assert_success(&output);
    assert_stderr_contains(&output, "failed to start '/nonexistent/program'");
}

#[test]
fn test_wrap_program_not_found_propagated() {
    let t = Test::with_store("ci", "A=1");

    let output = t
        .cmd()
        .args(["-g", "ci", "wrap", "--propagate-exit-code", "/nonexistent/program"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(127));
    assert_stderr_contains(&output, "failed to start '/nonexistent/program'");
}

#[test]
fn test_wrap_writes_no_temp_files() {
    let t = Test::with_store("ci", "A=1");

    assert_success(&t.wrap("ci", &["true"]));
    assert!(t.temp_leftovers().is_empty(), "{:?}", t.temp_leftovers());
}
