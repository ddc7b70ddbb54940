//! Login/logout end-to-end tests against a mock server.


use predicates::str::contains;
use tempfile::tempdir;
use wiremock::MockServer;

#[tokio::test(flavor = "multi_thread")]
async fn login_persists_the_returned_token() {
    let home = tempdir().unwrap();
    let server = MockServer::start().await;
    fixtures::mount_login_success(&server, fixtures::TOKEN).await;

    fixtures::shelf_cmd(home.path(), &server.uri())
        .args(["login", "--email", "demo@demo.com", "--password", "password"])
        .assert()
        .success()
        .stdout(contains("Logged in as demo@demo.com"));

    let stored = std::fs::read_to_string(fixtures::credentials_path(home.path())).unwrap();
    assert!(stored.contains(fixtures::TOKEN));
}

#[tokio::test(flavor = "multi_thread")]
async fn rejected_login_persists_nothing() {
    let home = tempdir().unwrap();
    let server = MockServer::start().await;
    fixtures::mount_login_rejection(&server).await;

    fixtures::shelf_cmd(home.path(), &server.uri())
        .args(["login", "--email", "demo@demo.com", "--password", "wrong"])
        .assert()
        .failure()
        .stderr(contains("Login failed"));

    assert!(!fixtures::credentials_path(home.path()).exists());
}

#[test]
fn logout_removes_the_stored_token() {
    let home = tempdir().unwrap();
    fixtures::write_credentials(home.path(), fixtures::TOKEN);

    fixtures::shelf_cmd_offline(home.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(contains("Logged out."));

    assert!(!fixtures::credentials_path(home.path()).exists());
}

#[test]
fn logout_without_a_session_is_fine() {
    let home = tempdir().unwrap();

    fixtures::shelf_cmd_offline(home.path())
        .arg("logout")
        .assert()
        .success();
}
