//! Exchange transition policy.
//!
//! Pure decision logic for who may move an exchange into which state:
//!
//! - `accepted` / `rejected`: only the responder, only from `pending`
//! - `completed`: either participant, from `pending` or `accepted`
//! - `pending` is never a valid target
//! - `rejected` and `completed` are terminal
//!
//! Authorization is evaluated before state validity, so a non-responder
//! requesting `accepted` on a terminal exchange still gets the Forbidden
//! outcome. Callers translate `TransitionDenied` into HTTP status codes.

use crate::domain::entities::{Exchange, ExchangeStatus};

/// Why a requested transition was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TransitionDenied {
    #[error("Only the responder can accept or reject")]
    OnlyResponder,

    #[error("You are not part of this exchange")]
    NotParticipant,

    #[error("Exchange is already {0}")]
    Terminal(ExchangeStatus),

    #[error("Invalid status transition")]
    InvalidTransition,
}

/// Decide whether `actor_id` may move `exchange` to `to`.
pub fn authorize_transition(
    exchange: &Exchange,
    actor_id: i64,
    to: ExchangeStatus,
) -> Result<(), TransitionDenied> {
    match to {
        // No transition ever returns to pending.
        ExchangeStatus::Pending => Err(TransitionDenied::InvalidTransition),

        ExchangeStatus::Accepted | ExchangeStatus::Rejected => {
            if actor_id != exchange.responder_id {
                return Err(TransitionDenied::OnlyResponder);
            }
            match exchange.status {
                ExchangeStatus::Pending => Ok(()),
                from if from.is_terminal() => Err(TransitionDenied::Terminal(from)),
                _ => Err(TransitionDenied::InvalidTransition),
            }
        }

        ExchangeStatus::Completed => {
            if !exchange.is_participant(actor_id) {
                return Err(TransitionDenied::NotParticipant);
            }
            match exchange.status {
                ExchangeStatus::Pending | ExchangeStatus::Accepted => Ok(()),
                from => Err(TransitionDenied::Terminal(from)),
            }
        }
    }
}
