//! Config subcommand tests.


use predicates::str::contains;
use tempfile::tempdir;

#[test]
fn config_path_respects_shelf_home() {
    let home = tempdir().unwrap();
    fixtures::shelf_cmd_offline(home.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(contains(home.path().to_string_lossy().to_string()))
        .stdout(contains("config.toml"));
}

#[test]
fn config_init_writes_a_default_file_once() {
    let home = tempdir().unwrap();
    fixtures::shelf_cmd_offline(home.path())
        .args(["config", "init"])
        .assert()
        .success();

    let contents = std::fs::read_to_string(home.path().join("config.toml")).unwrap();
    assert!(contents.contains("base_url"));

    // Second init refuses to overwrite.
    fixtures::shelf_cmd_offline(home.path())
        .args(["config", "init"])
        .assert()
        .failure();
}
