//! CLI surface tests

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_commands() {
    Command::cargo_bin("vidpress")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("compress"))
        .stdout(predicate::str::contains("inspect"));
}

#[test]
fn test_compress_requires_input() {
    Command::cargo_bin("vidpress")
        .unwrap()
        .arg("compress")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--input"));
}

#[test]
fn test_inspect_missing_file_fails() {
    Command::cargo_bin("vidpress")
        .unwrap()
        .args(["inspect", "--input", "/nonexistent/clip.mp4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}
