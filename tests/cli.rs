//! Binary tests: argument handling, exit codes and narration.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;

fn imy_bundler() -> Command {
    cargo_bin_cmd!("imy_bundler")
}

#[test]
fn too_few_arguments_exit_with_usage() {
    let output = tempfile::tempdir().unwrap();
    let out_dir = output.path().join("out");

    imy_bundler()
        .args(["in", out_dir.to_str().unwrap(), "311"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage"));

    assert!(!out_dir.exists());
}

#[test]
fn packages_and_reports_bundle() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::create_dir_all(input.path().join("pkgA")).unwrap();
    fs::write(input.path().join("pkgA/mod.py"), b"x = 1\n").unwrap();

    imy_bundler()
        .arg(input.path())
        .arg(output.path())
        .args(["311", "manylinux_x86_64", "--timestamp", "99"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote artifacts in:"))
        .stdout(predicate::str::contains("bundle-py311-99.zip"));

    assert!(output.path().join("requirements-pkgA.imy").is_file());
    assert!(output.path().join("build.json").is_file());
    assert!(output.path().join("bundle-py311-99.zip").is_file());
}

#[test]
fn quiet_mode_prints_only_bundle_path() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::create_dir_all(input.path().join("pkgA")).unwrap();
    fs::write(input.path().join("pkgA/mod.py"), b"x = 1\n").unwrap();

    imy_bundler()
        .arg(input.path())
        .arg(output.path())
        .args(["311", "x86_64", "--timestamp", "1", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Bundle:"))
        .stdout(predicate::str::contains("Recorded").not());
}

#[test]
fn missing_input_directory_is_fatal() {
    let scratch = tempfile::tempdir().unwrap();

    imy_bundler()
        .arg(scratch.path().join("does-not-exist"))
        .arg(scratch.path().join("out"))
        .args(["311", "x86_64"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn invalid_values_after_parsing_exit_with_usage_code() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::create_dir_all(input.path().join("pkgA")).unwrap();
    fs::write(input.path().join("pkgA/mod.py"), b"x = 1\n").unwrap();

    let empty_version = output.path().join("empty-version");
    imy_bundler()
        .arg(input.path())
        .arg(&empty_version)
        .args(["", "x86_64"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Python version cannot be empty"));
    assert!(!empty_version.exists());

    let bad_extension = output.path().join("bad-extension");
    imy_bundler()
        .arg(input.path())
        .arg(&bad_extension)
        .args(["311", "x86_64", "--archive-extension", "a/b"])
        .assert()
        .code(2)
        .stderr(
            predicate::str::contains("Invalid archive extension: a/b")
                .and(predicate::str::contains("caused by").not()),
        );
    assert!(!bad_extension.exists());
}
