//! User Handlers

use axum::{
    extract::{Path, State},
    Extension, Json,
};

use crate::application::dto::request::UpdateUserRequest;
use crate::application::dto::response::UserResponse;
use crate::domain::entities::UserProfileUpdate;
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::shared::validation::validate_body;
use crate::startup::AppState;

use super::super::extractors::JsonBody;

/// Fetch a user's public profile.
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state
        .store
        .find_user(id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    Ok(Json(UserResponse::from_user(user)))
}

/// Update the caller's own profile.
pub async fn update_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
    JsonBody(body): JsonBody<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    if auth.user_id != id {
        return Err(AppError::Forbidden(
            "You can only update your own profile".into(),
        ));
    }

    validate_body(&body)?;

    let update = UserProfileUpdate {
        full_name: body.full_name,
        avatar: body.avatar,
        bio: body.bio,
    };

    let user = state
        .store
        .update_user_profile(id, &update)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    Ok(Json(UserResponse::from_user(user)))
}
