//! Exchange Service
//!
//! Proposal validation and lifecycle transitions. Authorization and state
//! checks live in the domain policy; this service loads the data, asks the
//! policy, and issues the guarded write.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::entities::{Exchange, ExchangeStatus, NewExchange};
use crate::domain::services::{authorize_transition, TransitionDenied};
use crate::domain::storage::Storage;
use crate::shared::error::AppError;

/// Exchange service trait for dependency injection
#[async_trait]
pub trait ExchangeService: Send + Sync {
    /// Validate and create a new pending exchange.
    async fn propose(&self, proposal: ExchangeProposal) -> Result<Exchange, ExchangeError>;

    /// Move an exchange to a new status on behalf of `actor_id`.
    async fn set_status(
        &self,
        exchange_id: i64,
        actor_id: i64,
        target: ExchangeStatus,
    ) -> Result<Exchange, ExchangeError>;
}

/// Validated proposal input. The initiator is the session user.
#[derive(Debug, Clone)]
pub struct ExchangeProposal {
    pub initiator_id: i64,
    pub responder_id: i64,
    pub initiator_skill_id: i64,
    pub responder_skill_id: i64,
}

/// Exchange errors
#[derive(Debug, thiserror::Error)]
pub enum ExchangeError {
    #[error("Exchange not found")]
    NotFound,

    #[error("Invalid skill IDs")]
    UnknownSkill,

    #[error("You can only offer your own skills")]
    ForeignInitiatorSkill,

    #[error("Responder skill does not belong to responder")]
    ResponderSkillMismatch,

    #[error(transparent)]
    Transition(#[from] TransitionDenied),

    #[error(transparent)]
    Storage(#[from] AppError),
}

impl From<ExchangeError> for AppError {
    fn from(error: ExchangeError) -> Self {
        match error {
            ExchangeError::NotFound => AppError::NotFound(error.to_string()),
            ExchangeError::UnknownSkill | ExchangeError::ResponderSkillMismatch => {
                AppError::BadRequest(error.to_string())
            }
            ExchangeError::ForeignInitiatorSkill => AppError::Forbidden(error.to_string()),
            ExchangeError::Transition(denied) => match denied {
                TransitionDenied::OnlyResponder | TransitionDenied::NotParticipant => {
                    AppError::Forbidden(denied.to_string())
                }
                TransitionDenied::Terminal(_) | TransitionDenied::InvalidTransition => {
                    AppError::BadRequest(denied.to_string())
                }
            },
            ExchangeError::Storage(inner) => inner,
        }
    }
}

/// ExchangeService implementation over the storage gateway.
pub struct ExchangeServiceImpl {
    store: Arc<dyn Storage>,
}

impl ExchangeServiceImpl {
    pub fn new(store: Arc<dyn Storage>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ExchangeService for ExchangeServiceImpl {
    async fn propose(&self, proposal: ExchangeProposal) -> Result<Exchange, ExchangeError> {
        let initiator_skill = self.store.find_skill(proposal.initiator_skill_id).await?;
        let responder_skill = self.store.find_skill(proposal.responder_skill_id).await?;

        let (Some(initiator_skill), Some(responder_skill)) = (initiator_skill, responder_skill)
        else {
            return Err(ExchangeError::UnknownSkill);
        };

        if initiator_skill.user_id != proposal.initiator_id {
            return Err(ExchangeError::ForeignInitiatorSkill);
        }
        if responder_skill.user_id != proposal.responder_id {
            return Err(ExchangeError::ResponderSkillMismatch);
        }

        let new_exchange = NewExchange {
            initiator_id: proposal.initiator_id,
            responder_id: proposal.responder_id,
            initiator_skill_id: proposal.initiator_skill_id,
            responder_skill_id: proposal.responder_skill_id,
        };

        Ok(self.store.create_exchange(&new_exchange).await?)
    }

    async fn set_status(
        &self,
        exchange_id: i64,
        actor_id: i64,
        target: ExchangeStatus,
    ) -> Result<Exchange, ExchangeError> {
        let exchange = self
            .store
            .find_exchange(exchange_id)
            .await?
            .ok_or(ExchangeError::NotFound)?;

        authorize_transition(&exchange, actor_id, target)?;

        let updated = match target {
            ExchangeStatus::Completed => self.store.complete_exchange(exchange_id).await?,
            ExchangeStatus::Accepted | ExchangeStatus::Rejected => {
                self.store.settle_exchange(exchange_id, target).await?
            }
            // authorize_transition never lets a pending target through.
            ExchangeStatus::Pending => None,
        };

        // None means the guarded write saw a different status than we read:
        // a concurrent transition won the race.
        updated.ok_or(ExchangeError::Transition(TransitionDenied::InvalidTransition))
    }
}
