//! Exchange API Tests
//!
//! Covers proposal validation, the status lifecycle, participant-only
//! access, and the completion side effect on exchange counts.

use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::{body_json, create_skill, register_user, TestApp};

struct Barter {
    app: TestApp,
    alice_cookie: String,
    alice_id: i64,
    bob_cookie: String,
    bob_id: i64,
    alice_skill: i64,
    bob_skill: i64,
}

async fn barter() -> Barter {
    let app = TestApp::new();
    let (alice_cookie, alice_id) = register_user(&app, "alice").await;
    let (bob_cookie, bob_id) = register_user(&app, "bob").await;
    let alice_skill = create_skill(&app, &alice_cookie, "Guitar lessons", "offering", "music").await;
    let bob_skill = create_skill(&app, &bob_cookie, "Spanish lessons", "offering", "language").await;

    Barter {
        app,
        alice_cookie,
        alice_id,
        bob_cookie,
        bob_id,
        alice_skill,
        bob_skill,
    }
}

impl Barter {
    async fn propose(&self) -> Value {
        let response = self
            .app
            .post_json(
                "/api/exchanges",
                &json!({
                    "responderId": self.bob_id,
                    "initiatorSkillId": self.alice_skill,
                    "responderSkillId": self.bob_skill,
                }),
                Some(&self.alice_cookie),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await
    }

    async fn set_status(&self, id: i64, cookie: &str, status: &str) -> axum::response::Response {
        self.app
            .put_json(
                &format!("/api/exchanges/{id}/status"),
                &json!({ "status": status }),
                Some(cookie),
            )
            .await
    }
}

#[tokio::test]
async fn test_proposal_starts_pending() {
    let b = barter().await;

    let exchange = b.propose().await;

    assert_eq!(exchange["status"], "pending");
    assert_eq!(exchange["initiatorId"], b.alice_id);
    assert_eq!(exchange["responderId"], b.bob_id);
    assert_eq!(exchange["createdAt"], exchange["updatedAt"]);
}

#[tokio::test]
async fn test_proposal_rejects_unknown_skill_ids() {
    let b = barter().await;

    let response = b
        .app
        .post_json(
            "/api/exchanges",
            &json!({
                "responderId": b.bob_id,
                "initiatorSkillId": 9999,
                "responderSkillId": b.bob_skill,
            }),
            Some(&b.alice_cookie),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Invalid skill IDs");
}

#[tokio::test]
async fn test_proposal_rejects_offering_anothers_skill() {
    let b = barter().await;

    // Alice tries to offer bob's skill as her side of the trade.
    let response = b
        .app
        .post_json(
            "/api/exchanges",
            &json!({
                "responderId": b.bob_id,
                "initiatorSkillId": b.bob_skill,
                "responderSkillId": b.bob_skill,
            }),
            Some(&b.alice_cookie),
        )
        .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["message"], "You can only offer your own skills");
}

#[tokio::test]
async fn test_proposal_rejects_mismatched_responder_skill() {
    let b = barter().await;
    let (carol_cookie, _) = register_user(&b.app, "carol").await;
    let carol_skill = create_skill(&b.app, &carol_cookie, "Baking", "offering", "cooking").await;

    let response = b
        .app
        .post_json(
            "/api/exchanges",
            &json!({
                "responderId": b.bob_id,
                "initiatorSkillId": b.alice_skill,
                "responderSkillId": carol_skill,
            }),
            Some(&b.alice_cookie),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Responder skill does not belong to responder");
}

#[tokio::test]
async fn test_proposal_rejects_client_supplied_status() {
    let b = barter().await;

    let response = b
        .app
        .post_json(
            "/api/exchanges",
            &json!({
                "responderId": b.bob_id,
                "initiatorSkillId": b.alice_skill,
                "responderSkillId": b.bob_skill,
                "status": "completed",
            }),
            Some(&b.alice_cookie),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_listing_is_enriched_and_leaks_no_password() {
    let b = barter().await;
    b.propose().await;

    let response = b.app.get("/api/exchanges", Some(&b.bob_cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let exchanges = body_json(response).await;
    let exchange = &exchanges.as_array().unwrap()[0];
    assert_eq!(exchange["initiator"]["username"], "alice");
    assert_eq!(exchange["responder"]["username"], "bob");
    assert_eq!(exchange["initiatorSkill"]["title"], "Guitar lessons");
    assert_eq!(exchange["responderSkill"]["title"], "Spanish lessons");
    assert!(exchange["initiator"].get("passwordHash").is_none());
    assert!(exchange["responder"].get("password").is_none());
}

#[tokio::test]
async fn test_deleted_skill_renders_null_in_exchange() {
    let b = barter().await;
    let exchange = b.propose().await;
    let id = exchange["id"].as_i64().unwrap();

    let deleted = b
        .app
        .delete(&format!("/api/skills/{}", b.bob_skill), Some(&b.bob_cookie))
        .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let response = b.app.get(&format!("/api/exchanges/{id}"), Some(&b.alice_cookie)).await;
    let exchange = body_json(response).await;
    assert!(exchange["responderSkill"].is_null());
    assert_eq!(exchange["initiatorSkill"]["title"], "Guitar lessons");
}

#[tokio::test]
async fn test_only_participants_can_view_an_exchange() {
    let b = barter().await;
    let exchange = b.propose().await;
    let id = exchange["id"].as_i64().unwrap();
    let (carol_cookie, _) = register_user(&b.app, "carol").await;

    let response = b.app.get(&format!("/api/exchanges/{id}"), Some(&carol_cookie)).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["message"], "You are not part of this exchange");
}

#[tokio::test]
async fn test_only_responder_can_accept() {
    let b = barter().await;
    let exchange = b.propose().await;
    let id = exchange["id"].as_i64().unwrap();

    let response = b.set_status(id, &b.alice_cookie, "accepted").await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Only the responder can accept or reject");

    let response = b.set_status(id, &b.bob_cookie, "accepted").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "accepted");
}

#[tokio::test]
async fn test_accepting_twice_fails() {
    let b = barter().await;
    let exchange = b.propose().await;
    let id = exchange["id"].as_i64().unwrap();

    b.set_status(id, &b.bob_cookie, "accepted").await;
    let response = b.set_status(id, &b.bob_cookie, "accepted").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_completion_increments_both_exchange_counts() {
    let b = barter().await;
    let exchange = b.propose().await;
    let id = exchange["id"].as_i64().unwrap();

    b.set_status(id, &b.bob_cookie, "accepted").await;
    let response = b.set_status(id, &b.alice_cookie, "completed").await;
    assert_eq!(response.status(), StatusCode::OK);

    for user_id in [b.alice_id, b.bob_id] {
        let user = body_json(b.app.get(&format!("/api/users/{user_id}"), None).await).await;
        assert_eq!(user["exchangeCount"], 1, "user {user_id} count");
    }
}

#[tokio::test]
async fn test_rejected_exchange_is_terminal() {
    let b = barter().await;
    let exchange = b.propose().await;
    let id = exchange["id"].as_i64().unwrap();

    b.set_status(id, &b.bob_cookie, "rejected").await;
    let response = b.set_status(id, &b.bob_cookie, "completed").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Exchange is already rejected");
}

#[tokio::test]
async fn test_unknown_status_value_is_rejected() {
    let b = barter().await;
    let exchange = b.propose().await;
    let id = exchange["id"].as_i64().unwrap();

    let response = b.set_status(id, &b.bob_cookie, "cancelled").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_transition_on_missing_exchange_is_not_found() {
    let b = barter().await;

    let response = b.set_status(9999, &b.bob_cookie, "accepted").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
