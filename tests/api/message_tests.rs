//! Message API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{body_json, create_skill, register_user, TestApp};

async fn setup() -> (TestApp, String, String, i64) {
    let app = TestApp::new();
    let (alice_cookie, _) = register_user(&app, "alice").await;
    let (bob_cookie, bob_id) = register_user(&app, "bob").await;
    let alice_skill = create_skill(&app, &alice_cookie, "Guitar lessons", "offering", "music").await;
    let bob_skill = create_skill(&app, &bob_cookie, "Spanish lessons", "offering", "language").await;

    let response = app
        .post_json(
            "/api/exchanges",
            &json!({
                "responderId": bob_id,
                "initiatorSkillId": alice_skill,
                "responderSkillId": bob_skill,
            }),
            Some(&alice_cookie),
        )
        .await;
    let exchange_id = body_json(response).await["id"].as_i64().unwrap();

    (app, alice_cookie, bob_cookie, exchange_id)
}

#[tokio::test]
async fn test_participants_can_message_each_other() {
    let (app, alice_cookie, bob_cookie, exchange_id) = setup().await;

    let response = app
        .post_json(
            &format!("/api/exchanges/{exchange_id}/messages"),
            &json!({ "content": "Hi! When works for you?" }),
            Some(&alice_cookie),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let message = body_json(response).await;
    assert_eq!(message["content"], "Hi! When works for you?");
    assert_eq!(message["exchangeId"], exchange_id);

    let response = app
        .post_json(
            &format!("/api/exchanges/{exchange_id}/messages"),
            &json!({ "content": "Tuesdays are good" }),
            Some(&bob_cookie),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_thread_lists_messages_in_order() {
    let (app, alice_cookie, bob_cookie, exchange_id) = setup().await;

    for (cookie, content) in [
        (&alice_cookie, "first"),
        (&bob_cookie, "second"),
        (&alice_cookie, "third"),
    ] {
        app.post_json(
            &format!("/api/exchanges/{exchange_id}/messages"),
            &json!({ "content": content }),
            Some(cookie),
        )
        .await;
    }

    let response = app
        .get(&format!("/api/exchanges/{exchange_id}/messages"), Some(&bob_cookie))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let messages = body_json(response).await;
    let contents: Vec<&str> = messages
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["content"].as_str().unwrap())
        .collect();
    assert_eq!(contents, ["first", "second", "third"]);
}

#[tokio::test]
async fn test_strangers_cannot_read_or_write_the_thread() {
    let (app, _, _, exchange_id) = setup().await;
    let (carol_cookie, _) = register_user(&app, "carol").await;

    let read = app
        .get(&format!("/api/exchanges/{exchange_id}/messages"), Some(&carol_cookie))
        .await;
    assert_eq!(read.status(), StatusCode::FORBIDDEN);

    let write = app
        .post_json(
            &format!("/api/exchanges/{exchange_id}/messages"),
            &json!({ "content": "let me in" }),
            Some(&carol_cookie),
        )
        .await;
    assert_eq!(write.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_thread_requires_session() {
    let (app, _, _, exchange_id) = setup().await;

    let response = app
        .get(&format!("/api/exchanges/{exchange_id}/messages"), None)
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_thread_on_missing_exchange_is_not_found() {
    let (app, alice_cookie, _, _) = setup().await;

    let response = app
        .get("/api/exchanges/9999/messages", Some(&alice_cookie))
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_empty_message_is_rejected() {
    let (app, alice_cookie, _, exchange_id) = setup().await;

    let response = app
        .post_json(
            &format!("/api/exchanges/{exchange_id}/messages"),
            &json!({ "content": "" }),
            Some(&alice_cookie),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
