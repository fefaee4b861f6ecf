//! Skill Handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use crate::application::dto::request::{CreateSkillRequest, SkillQueryParams, UpdateSkillRequest};
use crate::application::dto::response::SkillResponse;
use crate::domain::entities::{NewSkill, Skill, SkillUpdate};
use crate::domain::storage::Storage;
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::shared::validation::validate_body;
use crate::startup::AppState;

use super::super::extractors::JsonBody;

/// Attach each skill's owner. A missing owner (never the case in practice)
/// just leaves the slot off the payload.
async fn enrich_skills(
    store: &dyn Storage,
    skills: Vec<Skill>,
) -> Result<Vec<SkillResponse>, AppError> {
    let mut responses = Vec::with_capacity(skills.len());
    for skill in skills {
        let user = store.find_user(skill.user_id).await?;
        responses.push(SkillResponse::from_skill(skill, user));
    }
    Ok(responses)
}

/// List skills, optionally filtered. Filter precedence is userId, then
/// category, then type.
pub async fn list_skills(
    State(state): State<AppState>,
    Query(params): Query<SkillQueryParams>,
) -> Result<Json<Vec<SkillResponse>>, AppError> {
    let skills = if let Some(user_id) = params.user_id {
        state.store.skills_by_user(user_id).await?
    } else if let Some(category) = params.category {
        state.store.skills_by_category(&category).await?
    } else if let Some(skill_type) = params.skill_type {
        state.store.skills_by_type(skill_type).await?
    } else {
        state.store.all_skills().await?
    };

    let responses = enrich_skills(state.store.as_ref(), skills).await?;
    Ok(Json(responses))
}

/// Fetch a single skill with its owner.
pub async fn get_skill(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SkillResponse>, AppError> {
    let skill = state
        .store
        .find_skill(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Skill not found".into()))?;

    let user = state.store.find_user(skill.user_id).await?;
    Ok(Json(SkillResponse::from_skill(skill, user)))
}

/// Create a skill owned by the caller.
pub async fn create_skill(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    JsonBody(body): JsonBody<CreateSkillRequest>,
) -> Result<(StatusCode, Json<SkillResponse>), AppError> {
    validate_body(&body)?;

    let new_skill = NewSkill {
        user_id: auth.user_id,
        title: body.title,
        description: body.description,
        skill_type: body.skill_type,
        category: body.category,
        tags: body.tags,
    };

    let skill = state.store.create_skill(&new_skill).await?;

    Ok((
        StatusCode::CREATED,
        Json(SkillResponse::from_skill(skill, None)),
    ))
}

/// Update a skill the caller owns.
pub async fn update_skill(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
    JsonBody(body): JsonBody<UpdateSkillRequest>,
) -> Result<Json<SkillResponse>, AppError> {
    validate_body(&body)?;

    let skill = state
        .store
        .find_skill(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Skill not found".into()))?;

    if skill.user_id != auth.user_id {
        return Err(AppError::Forbidden(
            "You can only update your own skills".into(),
        ));
    }

    let update = SkillUpdate {
        title: body.title,
        description: body.description,
        category: body.category,
        tags: body.tags,
    };

    let skill = state
        .store
        .update_skill(id, &update)
        .await?
        .ok_or_else(|| AppError::NotFound("Skill not found".into()))?;

    Ok(Json(SkillResponse::from_skill(skill, None)))
}

/// Delete a skill the caller owns.
pub async fn delete_skill(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let skill = state
        .store
        .find_skill(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Skill not found".into()))?;

    if skill.user_id != auth.user_id {
        return Err(AppError::Forbidden(
            "You can only delete your own skills".into(),
        ));
    }

    state.store.delete_skill(id).await?;

    // The deletion flag alone is not trusted; confirm the row is gone.
    if state.store.find_skill(id).await?.is_some() {
        return Err(AppError::Internal("Failed to delete skill".into()));
    }

    Ok(StatusCode::NO_CONTENT)
}
