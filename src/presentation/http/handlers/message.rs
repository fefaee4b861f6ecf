//! Message Handlers
//!
//! Per-exchange message threads, readable and writable only by the two
//! participants.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use crate::application::dto::request::CreateMessageRequest;
use crate::application::dto::response::MessageResponse;
use crate::domain::entities::{Exchange, NewMessage};
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::shared::validation::validate_body;
use crate::startup::AppState;

use super::super::extractors::JsonBody;

/// Load the exchange and check the caller may touch its thread.
async fn participant_exchange(
    state: &AppState,
    exchange_id: i64,
    user_id: i64,
) -> Result<Exchange, AppError> {
    let exchange = state
        .store
        .find_exchange(exchange_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Exchange not found".into()))?;

    if !exchange.is_participant(user_id) {
        return Err(AppError::Forbidden(
            "You are not part of this exchange".into(),
        ));
    }

    Ok(exchange)
}

/// List an exchange's messages in chronological order.
pub async fn list_messages(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(exchange_id): Path<i64>,
) -> Result<Json<Vec<MessageResponse>>, AppError> {
    participant_exchange(&state, exchange_id, auth.user_id).await?;

    let messages = state.store.messages_for_exchange(exchange_id).await?;
    Ok(Json(messages.into_iter().map(MessageResponse::from).collect()))
}

/// Post a message to an exchange's thread.
pub async fn create_message(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(exchange_id): Path<i64>,
    JsonBody(body): JsonBody<CreateMessageRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    validate_body(&body)?;
    participant_exchange(&state, exchange_id, auth.user_id).await?;

    let message = state
        .store
        .create_message(&NewMessage {
            exchange_id,
            sender_id: auth.user_id,
            content: body.content,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(MessageResponse::from(message))))
}
