//! User API Tests

use axum::http::StatusCode;
use serde_json::json;

use crate::common::{body_json, register_user, TestApp};

#[tokio::test]
async fn test_get_user_profile_is_public() {
    let app = TestApp::new();
    let (_, alice_id) = register_user(&app, "alice").await;

    let response = app.get(&format!("/api/users/{alice_id}"), None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let user = body_json(response).await;
    assert_eq!(user["username"], "alice");
    assert!(user.get("passwordHash").is_none());
}

#[tokio::test]
async fn test_get_missing_user_is_not_found() {
    let app = TestApp::new();

    let response = app.get("/api/users/9999", None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["message"], "User not found");
}

#[tokio::test]
async fn test_update_own_profile() {
    let app = TestApp::new();
    let (cookie, alice_id) = register_user(&app, "alice").await;

    let response = app
        .put_json(
            &format!("/api/users/{alice_id}"),
            &json!({ "fullName": "Alice Renamed", "bio": "new bio" }),
            Some(&cookie),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let user = body_json(response).await;
    assert_eq!(user["fullName"], "Alice Renamed");
    assert_eq!(user["bio"], "new bio");
    // Untouched fields survive a partial update.
    assert_eq!(user["username"], "alice");
}

#[tokio::test]
async fn test_cannot_update_another_users_profile() {
    let app = TestApp::new();
    let (_, alice_id) = register_user(&app, "alice").await;
    let (bob_cookie, _) = register_user(&app, "bob").await;

    let response = app
        .put_json(
            &format!("/api/users/{alice_id}"),
            &json!({ "fullName": "Hijacked" }),
            Some(&bob_cookie),
        )
        .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["message"], "You can only update your own profile");
}

#[tokio::test]
async fn test_profile_update_rejects_protected_fields() {
    let app = TestApp::new();
    let (cookie, alice_id) = register_user(&app, "alice").await;

    for forbidden in [
        json!({ "username": "newname" }),
        json!({ "exchangeCount": 42 }),
        json!({ "id": 7 }),
    ] {
        let response = app
            .put_json(&format!("/api/users/{alice_id}"), &forbidden, Some(&cookie))
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_profile_update_requires_session() {
    let app = TestApp::new();
    let (_, alice_id) = register_user(&app, "alice").await;

    let response = app
        .put_json(
            &format!("/api/users/{alice_id}"),
            &json!({ "fullName": "Anonymous Edit" }),
            None,
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
