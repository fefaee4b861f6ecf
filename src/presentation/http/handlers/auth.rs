//! Authentication Handlers

use axum::{extract::State, http::StatusCode, Json};
use serde_json::json;
use tower_sessions::Session;

use crate::application::dto::request::{LoginRequest, RegisterRequest};
use crate::application::dto::response::{SessionResponse, UserResponse};
use crate::application::services::{AuthService, AuthServiceImpl, Registration};
use crate::presentation::middleware::SESSION_USER_KEY;
use crate::shared::error::AppError;
use crate::shared::validation::validate_body;
use crate::startup::AppState;

use super::super::extractors::JsonBody;

/// Register a new user. Does not establish a session; the client logs in
/// separately.
pub async fn register(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    validate_body(&body)?;

    let auth_service = AuthServiceImpl::new(state.store.clone());
    let user = auth_service
        .register(Registration {
            username: body.username,
            email: body.email,
            password: body.password,
            full_name: body.full_name,
            avatar: body.avatar,
            bio: body.bio,
        })
        .await?;

    tracing::info!(user_id = user.id, "User registered");

    Ok((StatusCode::CREATED, Json(UserResponse::from_user(user))))
}

/// Login with credentials
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    JsonBody(body): JsonBody<LoginRequest>,
) -> Result<Json<UserResponse>, AppError> {
    validate_body(&body)?;

    let auth_service = AuthServiceImpl::new(state.store.clone());
    let user = auth_service.authenticate(&body.username, &body.password).await?;

    // Rotate the session id on privilege change.
    session.cycle_id().await?;
    session.insert(SESSION_USER_KEY, user.id).await?;

    Ok(Json(UserResponse::from_user(user)))
}

/// Logout (destroy the session)
pub async fn logout(session: Session) -> Result<Json<serde_json::Value>, AppError> {
    session.flush().await.map_err(|e| {
        tracing::error!("Failed to destroy session: {}", e);
        AppError::Internal("Logout failed".into())
    })?;

    Ok(Json(json!({ "message": "Logged out successfully" })))
}

/// Report whether the caller has an authenticated session, and who they are.
pub async fn session_status(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<SessionResponse>, AppError> {
    let Some(user_id) = session.get::<i64>(SESSION_USER_KEY).await? else {
        return Ok(Json(SessionResponse::anonymous()));
    };

    // A session can outlive its user only through manual data surgery, but
    // a stale cookie should still degrade to anonymous.
    match state.store.find_user(user_id).await? {
        Some(user) => Ok(Json(SessionResponse::authenticated(user))),
        None => Ok(Json(SessionResponse::anonymous())),
    }
}
