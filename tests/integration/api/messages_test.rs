//! Sending, listing, reading and searching messages

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use crate::common::*;

#[tokio::test]
async fn test_send_message() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let bob = create_test_user(&app, "bob").await;

    let response = app
        .server
        .post("/api/messages")
        .authorization_bearer(&alice.token)
        .json(&json!({ "content": "  hello bob  ", "receiver_id": bob.id }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["content"], "hello bob");
    assert_eq!(body["sender_id"], json!(alice.id));
    assert_eq!(body["receiver_id"], json!(bob.id));
    assert_eq!(body["read"], false);
    assert_eq!(app.count("messages").await, 1);
}

#[tokio::test]
async fn test_send_message_errors() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let bob = create_test_user(&app, "bob").await;

    let response = app
        .server
        .post("/api/messages")
        .authorization_bearer(&alice.token)
        .json(&json!({ "content": "   ", "receiver_id": bob.id }))
        .await;
    assert_error(&response, StatusCode::BAD_REQUEST);

    let response = app
        .server
        .post("/api/messages")
        .authorization_bearer(&alice.token)
        .json(&json!({ "content": "hi", "receiver_id": Uuid::now_v7() }))
        .await;
    assert_error(&response, StatusCode::NOT_FOUND);

    assert_eq!(app.count("messages").await, 0);
}

#[tokio::test]
async fn test_blocked_sender_cannot_message() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let bob = create_test_user(&app, "bob").await;

    app.server
        .post(&format!("/api/users/block/{}", alice.id))
        .authorization_bearer(&bob.token)
        .await
        .assert_status_ok();

    let response = app
        .server
        .post("/api/messages")
        .authorization_bearer(&alice.token)
        .json(&json!({ "content": "hi", "receiver_id": bob.id }))
        .await;
    assert_error(&response, StatusCode::FORBIDDEN);

    // The blocker can still write
    send_message(&app, &bob, &alice, "bye").await;
}

#[tokio::test]
async fn test_recent_conversations_grouped_and_counted() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let bob = create_test_user(&app, "bob").await;
    let carol = create_test_user(&app, "carol").await;

    send_message(&app, &bob, &alice, "hi alice").await;
    send_message(&app, &alice, &bob, "hi bob").await;
    send_message(&app, &bob, &alice, "how are you").await;
    send_message(&app, &carol, &alice, "hey, it's carol").await;

    let response = app
        .server
        .get("/api/messages/recent")
        .authorization_bearer(&alice.token)
        .await;
    response.assert_status_ok();

    let conversations: Vec<serde_json::Value> = response.json();
    assert_eq!(conversations.len(), 2);

    // Carol wrote last
    assert_eq!(conversations[0]["conversationId"], json!(carol.id));
    assert_eq!(conversations[0]["otherUser"]["username"], "carol");
    assert_eq!(conversations[0]["unreadCount"], 1);

    assert_eq!(conversations[1]["conversationId"], json!(bob.id));
    assert_eq!(conversations[1]["messages"].as_array().map(Vec::len), Some(3));
    assert_eq!(conversations[1]["unreadCount"], 2);
}

#[tokio::test]
async fn test_recent_includes_silent_contacts() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let bob = create_test_user(&app, "bob").await;

    make_contacts(&app, &alice, &bob).await;

    let conversations: Vec<serde_json::Value> = app
        .server
        .get("/api/messages/recent")
        .authorization_bearer(&alice.token)
        .await
        .json();

    assert_eq!(conversations.len(), 1);
    assert_eq!(conversations[0]["conversationId"], json!(bob.id));
    assert_eq!(conversations[0]["messages"], json!([]));
    assert_eq!(conversations[0]["unreadCount"], 0);
}

#[tokio::test]
async fn test_conversation_with_is_chronological() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let bob = create_test_user(&app, "bob").await;
    let carol = create_test_user(&app, "carol").await;

    send_message(&app, &alice, &bob, "one").await;
    send_message(&app, &bob, &alice, "two").await;
    send_message(&app, &carol, &alice, "elsewhere").await;
    send_message(&app, &alice, &bob, "three").await;

    let messages: Vec<serde_json::Value> = app
        .server
        .get(&format!("/api/messages/with/{}", bob.id))
        .authorization_bearer(&alice.token)
        .await
        .json();

    let contents: Vec<&str> = messages.iter().filter_map(|m| m["content"].as_str()).collect();
    assert_eq!(contents, vec!["one", "two", "three"]);
    assert_eq!(messages[1]["sender_username"], "bob");
    assert_eq!(messages[1]["receiver_username"], "alice");
}

#[tokio::test]
async fn test_mark_message_read() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let bob = create_test_user(&app, "bob").await;

    let message_id = send_message(&app, &alice, &bob, "read me").await;

    // Only the receiver may mark it
    let response = app
        .server
        .put(&format!("/api/messages/{}/read", message_id))
        .authorization_bearer(&alice.token)
        .await;
    assert_error(&response, StatusCode::FORBIDDEN);

    let response = app
        .server
        .put(&format!("/api/messages/{}/read", Uuid::now_v7()))
        .authorization_bearer(&bob.token)
        .await;
    assert_error(&response, StatusCode::NOT_FOUND);

    app.server
        .put(&format!("/api/messages/{}/read", message_id))
        .authorization_bearer(&bob.token)
        .await
        .assert_status_ok();

    // Idempotent
    app.server
        .put(&format!("/api/messages/{}/read", message_id))
        .authorization_bearer(&bob.token)
        .await
        .assert_status_ok();

    let body: serde_json::Value = app
        .server
        .get("/api/messages/unread-count")
        .authorization_bearer(&bob.token)
        .await
        .json();
    assert_eq!(body["unread"], 0);
}

#[tokio::test]
async fn test_mark_all_read_from_sender() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let bob = create_test_user(&app, "bob").await;
    let carol = create_test_user(&app, "carol").await;

    send_message(&app, &bob, &alice, "1").await;
    send_message(&app, &bob, &alice, "2").await;
    send_message(&app, &carol, &alice, "3").await;
    send_message(&app, &alice, &bob, "outgoing").await;

    let body: serde_json::Value = app
        .server
        .get("/api/messages/unread-count")
        .authorization_bearer(&alice.token)
        .await
        .json();
    assert_eq!(body["unread"], 3);

    let response = app
        .server
        .put(&format!("/api/messages/read-all/{}", bob.id))
        .authorization_bearer(&alice.token)
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["updated"], 2);

    let body: serde_json::Value = app
        .server
        .get("/api/messages/unread-count")
        .authorization_bearer(&alice.token)
        .await
        .json();
    assert_eq!(body["unread"], 1);

    // Bob's own unread message from alice is untouched
    let body: serde_json::Value = app
        .server
        .get("/api/messages/unread-count")
        .authorization_bearer(&bob.token)
        .await
        .json();
    assert_eq!(body["unread"], 1);
}

#[tokio::test]
async fn test_search_messages() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let bob = create_test_user(&app, "bob").await;
    let carol = create_test_user(&app, "carol").await;

    send_message(&app, &alice, &bob, "Lunch tomorrow?").await;
    send_message(&app, &bob, &alice, "no lunch for me").await;
    send_message(&app, &bob, &carol, "lunch with carol").await;
    send_message(&app, &alice, &bob, "100% sure").await;

    let results: Vec<serde_json::Value> = app
        .server
        .get("/api/messages/search")
        .add_query_param("q", "LUNCH")
        .authorization_bearer(&alice.token)
        .await
        .json();

    let contents: Vec<&str> = results.iter().filter_map(|m| m["content"].as_str()).collect();
    assert_eq!(contents, vec!["no lunch for me", "Lunch tomorrow?"]);

    // Wildcards are matched literally
    let results: Vec<serde_json::Value> = app
        .server
        .get("/api/messages/search")
        .add_query_param("q", "%")
        .authorization_bearer(&alice.token)
        .await
        .json();
    assert_eq!(results.len(), 1);

    let response = app
        .server
        .get("/api/messages/search")
        .add_query_param("q", "  ")
        .authorization_bearer(&alice.token)
        .await;
    assert_error(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_non_ascii_case_insensitive() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let bob = create_test_user(&app, "bob").await;

    send_message(&app, &alice, &bob, "ÉCOLE demain").await;
    send_message(&app, &bob, &alice, "rien à voir").await;

    for query in ["ÉCOLE", "école", "École"] {
        let results: Vec<serde_json::Value> = app
            .server
            .get("/api/messages/search")
            .add_query_param("q", query)
            .authorization_bearer(&alice.token)
            .await
            .json();

        assert_eq!(results.len(), 1, "query {}", query);
        assert_eq!(results[0]["content"], "ÉCOLE demain");
    }
}
