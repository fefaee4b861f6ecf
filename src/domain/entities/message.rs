//! Message entity and repository trait.
//!
//! Maps to the `messages` table. Messages are scoped to one exchange,
//! immutable once created, and never deleted.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// A chat message within an exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub exchange_id: i64,
    /// Must be a participant of the exchange; enforced at the API surface.
    pub sender_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a message.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub exchange_id: i64,
    pub sender_id: i64,
    pub content: String,
}

/// Repository trait for Message data access operations.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Find a message by id.
    async fn find_message(&self, id: i64) -> Result<Option<Message>, AppError>;

    /// List all messages for an exchange in chronological order.
    async fn messages_for_exchange(&self, exchange_id: i64) -> Result<Vec<Message>, AppError>;

    /// Create a new message, stamping `created_at`.
    async fn create_message(&self, new: &NewMessage) -> Result<Message, AppError>;
}
