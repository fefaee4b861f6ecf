//! Exchange entity and repository trait.
//!
//! Maps to the `exchanges` table in the database schema. The status field is
//! the heart of the lifecycle rules: `pending` branches to `accepted` or
//! `rejected`, and `pending`/`accepted` may move to `completed`. `rejected`
//! and `completed` are terminal.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Lifecycle state of an exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExchangeStatus {
    Pending,
    Accepted,
    Rejected,
    Completed,
}

impl ExchangeStatus {
    /// Convert from database string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "accepted" => Some(Self::Accepted),
            "rejected" => Some(Self::Rejected),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Completed => "completed",
        }
    }

    /// Terminal states permit no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Completed)
    }
}

impl std::fmt::Display for ExchangeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A proposed or ongoing barter between two users.
///
/// Maps to the `exchanges` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - initiator_id / responder_id: BIGINT NOT NULL
/// - initiator_skill_id / responder_skill_id: BIGINT NOT NULL
/// - status: TEXT NOT NULL
/// - created_at / updated_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exchange {
    pub id: i64,
    pub initiator_id: i64,
    pub responder_id: i64,
    pub initiator_skill_id: i64,
    pub responder_skill_id: i64,
    pub status: ExchangeStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Exchange {
    /// Whether the given user is the initiator or responder.
    pub fn is_participant(&self, user_id: i64) -> bool {
        self.initiator_id == user_id || self.responder_id == user_id
    }
}

/// Input for creating an exchange. Status is always forced to `pending`.
#[derive(Debug, Clone)]
pub struct NewExchange {
    pub initiator_id: i64,
    pub responder_id: i64,
    pub initiator_skill_id: i64,
    pub responder_skill_id: i64,
}

/// Repository trait for Exchange data access operations.
///
/// `settle_exchange` and `complete_exchange` are conditional writes: the
/// current-status guard is atomic with the status update, which is what
/// keeps the completion side effect exactly-once under concurrent calls.
#[async_trait]
pub trait ExchangeRepository: Send + Sync {
    /// Find an exchange by id.
    async fn find_exchange(&self, id: i64) -> Result<Option<Exchange>, AppError>;

    /// List exchanges where the user is initiator or responder, most
    /// recently updated first.
    async fn exchanges_for_user(&self, user_id: i64) -> Result<Vec<Exchange>, AppError>;

    /// Create a new exchange with status `pending` and
    /// `created_at == updated_at`.
    async fn create_exchange(&self, new: &NewExchange) -> Result<Exchange, AppError>;

    /// Move a pending exchange to `accepted` or `rejected`, refreshing
    /// `updated_at`. Returns `None` when the exchange is absent or no
    /// longer pending.
    async fn settle_exchange(
        &self,
        id: i64,
        status: ExchangeStatus,
    ) -> Result<Option<Exchange>, AppError>;

    /// Move a pending or accepted exchange to `completed`, refreshing
    /// `updated_at` and incrementing both participants' `exchange_count`
    /// by one, atomically. Returns `None` when the exchange is absent or
    /// already terminal, in which case no counter changes.
    async fn complete_exchange(&self, id: i64) -> Result<Option<Exchange>, AppError>;
}
