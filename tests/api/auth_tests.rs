//! Authentication API Tests

use axum::http::StatusCode;
use serde_json::json;

use crate::common::{body_json, register_user, session_cookie, TestApp};

#[tokio::test]
async fn test_register_returns_created_user_without_password() {
    let app = TestApp::new();

    let response = app
        .post_json(
            "/api/auth/register",
            &json!({
                "username": "alice",
                "email": "alice@example.com",
                "password": "correct horse battery",
                "fullName": "Alice Doe",
                "bio": "I teach guitar",
            }),
            None,
        )
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let user = body_json(response).await;
    assert_eq!(user["username"], "alice");
    assert_eq!(user["fullName"], "Alice Doe");
    assert_eq!(user["rating"], 0);
    assert_eq!(user["exchangeCount"], 0);
    assert!(user.get("password").is_none());
    assert!(user.get("passwordHash").is_none());
}

#[tokio::test]
async fn test_register_does_not_establish_a_session() {
    let app = TestApp::new();

    let response = app
        .post_json(
            "/api/auth/register",
            &json!({
                "username": "alice",
                "email": "alice@example.com",
                "password": "correct horse battery",
                "fullName": "Alice Doe",
            }),
            None,
        )
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(session_cookie(&response).is_none());
}

#[tokio::test]
async fn test_register_rejects_duplicate_username() {
    let app = TestApp::new();
    register_user(&app, "alice").await;

    let response = app
        .post_json(
            "/api/auth/register",
            &json!({
                "username": "alice",
                "email": "second@example.com",
                "password": "correct horse battery",
                "fullName": "Second Alice",
            }),
            None,
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Username already exists");
}

#[tokio::test]
async fn test_register_rejects_duplicate_email() {
    let app = TestApp::new();
    register_user(&app, "alice").await;

    let response = app
        .post_json(
            "/api/auth/register",
            &json!({
                "username": "alice2",
                "email": "alice@example.com",
                "password": "correct horse battery",
                "fullName": "Alice Again",
            }),
            None,
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Email already exists");
}

#[tokio::test]
async fn test_register_reports_field_validation_errors() {
    let app = TestApp::new();

    let response = app
        .post_json(
            "/api/auth/register",
            &json!({
                "username": "alice",
                "email": "not-an-email",
                "password": "short",
                "fullName": "Alice Doe",
            }),
            None,
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"email"));
    assert!(fields.contains(&"password"));
}

#[tokio::test]
async fn test_register_rejects_unknown_fields() {
    let app = TestApp::new();

    let response = app
        .post_json(
            "/api/auth/register",
            &json!({
                "username": "alice",
                "email": "alice@example.com",
                "password": "correct horse battery",
                "fullName": "Alice Doe",
                "rating": 100,
            }),
            None,
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_succeeds_with_correct_credentials() {
    let app = TestApp::new();
    register_user(&app, "alice").await;

    let response = app
        .post_json(
            "/api/auth/login",
            &json!({ "username": "alice", "password": "correct horse battery" }),
            None,
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response).expect("login should set a session cookie");

    let session = app.get("/api/auth/session", Some(&cookie)).await;
    let body = body_json(session).await;
    assert_eq!(body["authenticated"], true);
    assert_eq!(body["user"]["username"], "alice");
    assert!(body["user"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_login_rejects_wrong_password() {
    let app = TestApp::new();
    register_user(&app, "alice").await;

    let response = app
        .post_json(
            "/api/auth/login",
            &json!({ "username": "alice", "password": "wrong password" }),
            None,
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_rejects_unknown_username() {
    let app = TestApp::new();

    let response = app
        .post_json(
            "/api/auth/login",
            &json!({ "username": "nobody", "password": "whatever else" }),
            None,
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_session_probe_is_anonymous_without_cookie() {
    let app = TestApp::new();

    let response = app.get("/api/auth/session", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["authenticated"], false);
    assert!(body.get("user").is_none());
}

#[tokio::test]
async fn test_logout_destroys_the_session() {
    let app = TestApp::new();
    let (cookie, _) = register_user(&app, "alice").await;

    let response = app
        .post_json("/api/auth/logout", &json!({}), Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Logged out successfully");

    let session = app.get("/api/auth/session", Some(&cookie)).await;
    let body = body_json(session).await;
    assert_eq!(body["authenticated"], false);
}

#[tokio::test]
async fn test_protected_endpoint_requires_session() {
    let app = TestApp::new();

    let response = app.get("/api/exchanges", None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Authentication required");
}
