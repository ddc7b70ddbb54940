//! ApiClient integration tests against a mock server.

use serde_json::json;
use shelf_core::api::ApiClient;
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn login_sends_form_body_and_returns_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("username=demo%40demo.com"))
        .and(body_string_contains("password=password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok-123",
            "token_type": "bearer",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let token = client.login("demo@demo.com", "password").await.unwrap();
    assert_eq!(token, "tok-123");
}

#[tokio::test]
async fn login_rejection_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Invalid credentials",
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let err = client.login("demo@demo.com", "wrong").await.unwrap_err();
    assert!(err.to_string().contains("401"));
}

#[tokio::test]
async fn current_user_sends_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/me"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "email": "demo@demo.com",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let user = client.current_user("tok-123").await.unwrap();
    assert_eq!(user.email, "demo@demo.com");
    assert_eq!(user.full_name, None);
}

#[tokio::test]
async fn current_user_failure_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    assert!(client.current_user("stale").await.is_err());
}

#[tokio::test]
async fn create_then_list_contains_the_new_item() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/items"))
        .and(header("authorization", "Bearer tok-123"))
        .and(body_json(json!({
            "name": "Widget",
            "description": "A widget",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "name": "Widget",
            "description": "A widget",
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Widget", "description": "A widget"},
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let created = client
        .create_item("tok-123", "Widget", "A widget")
        .await
        .unwrap();
    assert_eq!(created.id, 1);

    let items = client.list_items("tok-123").await.unwrap();
    assert!(
        items
            .iter()
            .any(|i| i.name == "Widget" && i.description == "A widget")
    );
}

#[tokio::test]
async fn update_targets_the_item_path() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/items/4"))
        .and(body_json(json!({
            "name": "Widget",
            "description": "Refreshed",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 4,
            "name": "Widget",
            "description": "Refreshed",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let updated = client
        .update_item("tok-123", 4, "Widget", "Refreshed")
        .await
        .unwrap();
    assert_eq!(updated.id, 4);
    assert_eq!(updated.description, "Refreshed");
}

#[tokio::test]
async fn delete_removes_exactly_the_requested_id() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/items/2"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Item deleted",
        })))
        .expect(1)
        .mount(&server)
        .await;

    // The refresh after the delete no longer contains id 2, but still
    // contains everything else.
    Mock::given(method("GET"))
        .and(path("/api/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Widget", "description": "A widget"},
            {"id": 3, "name": "Gadget", "description": "A gadget"},
        ])))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    client.delete_item("tok-123", 2).await.unwrap();

    let items = client.list_items("tok-123").await.unwrap();
    let ids: Vec<i64> = items.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[tokio::test]
async fn list_failure_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/items"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    assert!(client.list_items("tok-123").await.is_err());
}
