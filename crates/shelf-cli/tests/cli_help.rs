//! Smoke tests for the CLI surface.


use predicates::str::contains;
use tempfile::tempdir;

#[test]
fn help_lists_the_subcommands() {
    let home = tempdir().unwrap();
    fixtures::shelf_cmd_offline(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("Terminal client for a shelf item service"))
        .stdout(contains("login"))
        .stdout(contains("logout"))
        .stdout(contains("me"))
        .stdout(contains("items"))
        .stdout(contains("config"));
}

#[test]
fn version_prints() {
    let home = tempdir().unwrap();
    fixtures::shelf_cmd_offline(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(contains("shelf"));
}

#[test]
fn items_help_lists_crud() {
    let home = tempdir().unwrap();
    fixtures::shelf_cmd_offline(home.path())
        .args(["items", "--help"])
        .assert()
        .success()
        .stdout(contains("list"))
        .stdout(contains("create"))
        .stdout(contains("update"))
        .stdout(contains("delete"));
}
