//! Registration, login, logout and profile endpoints

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::*;

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new().await;

    let response = app.server.get("/health").await;

    response.assert_status_ok();
    response.assert_json(&json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_register_returns_public_profile() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/users/register")
        .json(&json!({
            "username": "alice",
            "email": "Alice@Example.com",
            "password": TEST_PASSWORD,
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["username"], "alice");
    assert_eq!(body["email"], "alice@example.com");
    assert!(body.get("password_hash").is_none());
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn test_register_rejects_invalid_input() {
    let app = TestApp::new().await;

    let cases = [
        json!({ "username": "ab", "email": "ab@example.com", "password": TEST_PASSWORD }),
        json!({ "username": "alice", "email": "not-an-email", "password": TEST_PASSWORD }),
        json!({ "username": "alice", "email": "alice@example.com", "password": "short" }),
    ];

    for case in cases {
        let response = app.server.post("/api/users/register").json(&case).await;
        assert_error(&response, StatusCode::BAD_REQUEST);
    }

    assert_eq!(app.count("users").await, 0);
}

#[tokio::test]
async fn test_register_duplicate_username_and_email() {
    let app = TestApp::new().await;
    create_test_user(&app, "alice").await;

    let response = app
        .server
        .post("/api/users/register")
        .json(&json!({
            "username": "alice",
            "email": "other@example.com",
            "password": TEST_PASSWORD,
        }))
        .await;
    let message = assert_error(&response, StatusCode::BAD_REQUEST);
    assert_contains!(message, "Username");

    let response = app
        .server
        .post("/api/users/register")
        .json(&json!({
            "username": "alice2",
            "email": "alice@example.com",
            "password": TEST_PASSWORD,
        }))
        .await;
    let message = assert_error(&response, StatusCode::BAD_REQUEST);
    assert_contains!(message, "Email");

    assert_eq!(app.count("users").await, 1);
}

#[tokio::test]
async fn test_login_errors() {
    let app = TestApp::new().await;
    create_test_user(&app, "alice").await;

    let response = app
        .server
        .post("/api/users/login")
        .json(&json!({ "email": "nobody@example.com", "password": TEST_PASSWORD }))
        .await;
    assert_error(&response, StatusCode::NOT_FOUND);

    let response = app
        .server
        .post("/api/users/login")
        .json(&json!({ "email": "alice@example.com", "password": "wrong-password" }))
        .await;
    assert_error(&response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = TestApp::new().await;

    let response = app.server.get("/api/messages/recent").await;
    assert_error(&response, StatusCode::UNAUTHORIZED);

    let response = app
        .server
        .get("/api/contacts")
        .authorization_bearer("not-a-jwt")
        .await;
    assert_error(&response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = TestApp::new().await;

    let response = app.server.get("/api/nowhere").await;
    assert_error(&response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_login_and_logout_toggle_online() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;

    let profile: serde_json::Value = app
        .server
        .get(&format!("/api/users/profile/{}", alice.id))
        .authorization_bearer(&alice.token)
        .await
        .json();
    assert_eq!(profile["is_online"], true);

    let response = app
        .server
        .post("/api/users/logout")
        .authorization_bearer(&alice.token)
        .await;
    response.assert_status_ok();

    let profile: serde_json::Value = app
        .server
        .get(&format!("/api/users/profile/{}", alice.id))
        .authorization_bearer(&alice.token)
        .await
        .json();
    assert_eq!(profile["is_online"], false);
}

#[tokio::test]
async fn test_get_profile() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let bob = create_test_user(&app, "bob").await;

    let response = app
        .server
        .get(&format!("/api/users/profile/{}", bob.id))
        .authorization_bearer(&alice.token)
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["username"], "bob");
    assert!(body.get("password_hash").is_none());

    let response = app
        .server
        .get(&format!("/api/users/profile/{}", uuid::Uuid::now_v7()))
        .authorization_bearer(&alice.token)
        .await;
    assert_error(&response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_own_profile() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;

    let response = app
        .server
        .put(&format!("/api/users/profile/{}", alice.id))
        .authorization_bearer(&alice.token)
        .json(&json!({ "username": "alice_new" }))
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = app
        .server
        .get(&format!("/api/users/profile/{}", alice.id))
        .authorization_bearer(&alice.token)
        .await
        .json();
    assert_eq!(body["username"], "alice_new");
    assert_eq!(body["email"], "alice@example.com");
}

#[tokio::test]
async fn test_update_profile_forbidden_and_duplicate() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let bob = create_test_user(&app, "bob").await;

    let response = app
        .server
        .put(&format!("/api/users/profile/{}", bob.id))
        .authorization_bearer(&alice.token)
        .json(&json!({ "username": "hijacked" }))
        .await;
    assert_error(&response, StatusCode::FORBIDDEN);

    let response = app
        .server
        .put(&format!("/api/users/profile/{}", alice.id))
        .authorization_bearer(&alice.token)
        .json(&json!({ "email": "bob@example.com" }))
        .await;
    assert_error(&response, StatusCode::BAD_REQUEST);
}
