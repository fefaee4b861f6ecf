//! Exchange Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use crate::application::dto::request::{CreateExchangeRequest, UpdateExchangeStatusRequest};
use crate::application::dto::response::ExchangeResponse;
use crate::application::services::{ExchangeProposal, ExchangeService, ExchangeServiceImpl};
use crate::domain::entities::Exchange;
use crate::domain::storage::Storage;
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

use super::super::extractors::JsonBody;

/// Attach both participants and both skills. A skill deleted since the
/// proposal serializes as null; participants are never deleted.
async fn enrich_exchange(
    store: &dyn Storage,
    exchange: Exchange,
) -> Result<ExchangeResponse, AppError> {
    let initiator = store.find_user(exchange.initiator_id).await?;
    let responder = store.find_user(exchange.responder_id).await?;
    let initiator_skill = store.find_skill(exchange.initiator_skill_id).await?;
    let responder_skill = store.find_skill(exchange.responder_skill_id).await?;

    Ok(ExchangeResponse::from_exchange(exchange)
        .with_participants(initiator, responder)
        .with_skills(initiator_skill, responder_skill))
}

/// List the caller's exchanges, most recently updated first.
pub async fn list_exchanges(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Vec<ExchangeResponse>>, AppError> {
    let exchanges = state.store.exchanges_for_user(auth.user_id).await?;

    let mut responses = Vec::with_capacity(exchanges.len());
    for exchange in exchanges {
        responses.push(enrich_exchange(state.store.as_ref(), exchange).await?);
    }

    Ok(Json(responses))
}

/// Fetch a single exchange the caller participates in.
pub async fn get_exchange(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<ExchangeResponse>, AppError> {
    let exchange = state
        .store
        .find_exchange(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Exchange not found".into()))?;

    if !exchange.is_participant(auth.user_id) {
        return Err(AppError::Forbidden(
            "You are not part of this exchange".into(),
        ));
    }

    let response = enrich_exchange(state.store.as_ref(), exchange).await?;
    Ok(Json(response))
}

/// Propose a new exchange with the caller as initiator.
pub async fn create_exchange(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    JsonBody(body): JsonBody<CreateExchangeRequest>,
) -> Result<(StatusCode, Json<ExchangeResponse>), AppError> {
    let exchange_service = ExchangeServiceImpl::new(state.store.clone());

    let exchange = exchange_service
        .propose(ExchangeProposal {
            initiator_id: auth.user_id,
            responder_id: body.responder_id,
            initiator_skill_id: body.initiator_skill_id,
            responder_skill_id: body.responder_skill_id,
        })
        .await?;

    tracing::info!(exchange_id = exchange.id, "Exchange proposed");

    Ok((
        StatusCode::CREATED,
        Json(ExchangeResponse::from_exchange(exchange)),
    ))
}

/// Transition an exchange's status on behalf of the caller.
pub async fn update_exchange_status(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
    JsonBody(body): JsonBody<UpdateExchangeStatusRequest>,
) -> Result<Json<ExchangeResponse>, AppError> {
    let exchange_service = ExchangeServiceImpl::new(state.store.clone());

    let exchange = exchange_service
        .set_status(id, auth.user_id, body.status)
        .await?;

    Ok(Json(ExchangeResponse::from_exchange(exchange)))
}
