//! End-to-end tests for the `sol-rewrite` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn sol_rewrite() -> Command {
    Command::cargo_bin("sol-rewrite").unwrap()
}

fn write_file(dir: &Path, rel: &str, content: &str) {
    let path = dir.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn revert_spacing_reports_fixed_files() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "A.sol", "revertNotOwner();\n");
    write_file(dir.path(), "B.sol", "revert NotOwner();\n");

    let expected = format!("Fixed {}\n", dir.path().join("A.sol").display());
    sol_rewrite()
        .arg("revert-spacing")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(expected);

    assert_eq!(
        fs::read_to_string(dir.path().join("A.sol")).unwrap(),
        "revert NotOwner();\n"
    );
}

#[test]
fn pragma_reports_updates_and_done() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "periphery/Router.sol", "pragma solidity =0.8.15;\n");

    let expected = format!(
        "Updated: {}\nDone!\n",
        dir.path().join("periphery/Router.sol").display()
    );
    sol_rewrite()
        .arg("pragma")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn pragma_with_custom_versions() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "Router.sol", "pragma solidity 0.7.6;\n");

    sol_rewrite()
        .args(["pragma", "--from", "0.7.6", "--to", "^0.8.24"])
        .arg(dir.path())
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(dir.path().join("Router.sol")).unwrap(),
        "pragma solidity ^0.8.24;\n"
    );
}

#[test]
fn missing_root_still_prints_done() {
    let dir = TempDir::new().unwrap();

    sol_rewrite()
        .arg("pragma")
        .arg(dir.path().join("nowhere"))
        .assert()
        .success()
        .stdout("Done!\n");
}

#[test]
fn show_diff_prints_the_change() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "A.sol", "revertFoo();\n");

    sol_rewrite()
        .args(["revert-spacing", "--show-diff"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(
            predicate::str::contains("-revertFoo();")
                .and(predicate::str::contains("+revert Foo();")),
        );
}

#[test]
fn run_uses_config_report_and_root_override() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "other/A.sol", "revertFoo();\n");
    let config = dir.path().join("rewrite.yaml");
    fs::write(
        &config,
        "root: contracts\nreport: \"Touched \"\nrules:\n  - type: revert_spacing\n",
    )
    .unwrap();

    sol_rewrite()
        .arg("run")
        .arg("--config")
        .arg(&config)
        .arg("--root")
        .arg(dir.path().join("other"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Touched "));
}

#[test]
fn run_rejects_config_without_rules() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("rewrite.yaml");
    fs::write(&config, "root: .\nrules: []\n").unwrap();

    sol_rewrite()
        .arg("run")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least one rule"));
}

#[test]
fn unreadable_file_fails_the_run() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("Bad.sol"), [0xffu8, 0xfe]).unwrap();

    sol_rewrite()
        .arg("revert-spacing")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Bad.sol"));
}
