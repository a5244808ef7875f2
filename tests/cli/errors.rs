//! Tests for error handling and CLI flags.

use crate::support::*;

#[test]
fn test_help() {
    let t = Test::new();

    let output = t.cmd().arg("--help").output().unwrap();
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("passdig") || out.contains("Usage"));
}

#[test]
fn test_unknown_command_fails() {
    let t = Test::new();

    let output = t.cmd().arg("unknown-command").output().unwrap();
    assert_failure(&output);
}

#[test]
fn test_verbose_flag_accepted() {
    let t = Test::with_files(&["a.gpg"]);

    let output = t.cmd().args(["--verbose", "ls"]).output().unwrap();
    assert_success(&output);
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    let output = t.cmd().arg("--version").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "passdig");
}

#[test]
fn test_malformed_config_fails_with_hint() {
    let t = Test::new();
    let config = t.write_home("bad.toml", b"[search\nthreshold =");

    let output = t
        .cmd()
        .arg("--config")
        .arg(&config)
        .arg("ls")
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "toml parse error");
    assert_stderr_contains(&output, "config.toml");
}

#[test]
fn test_missing_explicit_config_fails() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["--config", "/nonexistent/passdig.toml", "ls"])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "config error");
}

#[test]
fn test_completions_bash_outputs_script() {
    let t = Test::new();

    let output = t.cmd().args(["completions", "bash"]).output().unwrap();
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("_passdig") || out.contains("complete"));
}

#[test]
fn test_completions_zsh() {
    let t = Test::new();

    let output = t.cmd().args(["completions", "zsh"]).output().unwrap();
    assert_success(&output);
    let out = stdout(&output);
    assert!(
        out.contains("#compdef") || out.contains("_passdig"),
        "zsh completion should contain zsh-specific syntax"
    );
}

#[test]
fn test_completions_fish() {
    let t = Test::new();

    let output = t.cmd().args(["completions", "fish"]).output().unwrap();
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("complete") && out.contains("passdig"));
}
