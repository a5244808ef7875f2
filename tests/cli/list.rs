//! Tests for `passdig ls`.

use crate::support::*;

#[test]
fn test_ls_lists_entry_names() {
    let t = Test::with_files(&["email/github.gpg", "bank.gpg", ".git/x.gpg", "notes.txt"]);

    let output = t.ls();
    assert_success(&output);
    assert_stdout_contains(&output, "2 entries");
    assert_stdout_contains(&output, "email/github");
    assert_stdout_contains(&output, "bank");
    assert_stdout_excludes(&output, ".git");
    assert_stdout_excludes(&output, "notes");
}

#[test]
fn test_ls_json() {
    let t = Test::with_files(&["b.gpg", "a/c.gpg"]);

    let output = t.cmd().args(["ls", "--json"]).output().unwrap();
    assert_success(&output);

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["count"], 2);
    assert_eq!(json["entries"], serde_json::json!(["a/c", "b"]));
}

#[test]
fn test_ls_empty_store() {
    let t = Test::new();

    let output = t.ls();
    assert_success(&output);
    assert_stdout_contains(&output, "no entries");
}

#[test]
fn test_store_flag_overrides_env() {
    let t = Test::new();
    let other = tempfile::TempDir::new().unwrap();
    std::fs::write(other.path().join("elsewhere.gpg"), b"x").unwrap();

    let output = t
        .cmd()
        .arg("--store")
        .arg(other.path())
        .arg("ls")
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "elsewhere");
}
