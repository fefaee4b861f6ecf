//! Message Repository Implementation
//!
//! PostgreSQL implementation of the MessageRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::PgStorage;
use crate::domain::entities::{Message, MessageRepository, NewMessage};
use crate::shared::error::AppError;

/// Database row representation matching the messages table schema.
#[derive(Debug, sqlx::FromRow)]
struct MessageRow {
    id: i64,
    exchange_id: i64,
    sender_id: i64,
    content: String,
    created_at: DateTime<Utc>,
}

impl MessageRow {
    fn into_message(self) -> Message {
        Message {
            id: self.id,
            exchange_id: self.exchange_id,
            sender_id: self.sender_id,
            content: self.content,
            created_at: self.created_at,
        }
    }
}

#[async_trait]
impl MessageRepository for PgStorage {
    async fn find_message(&self, id: i64) -> Result<Option<Message>, AppError> {
        let row = sqlx::query_as::<_, MessageRow>(
            "SELECT id, exchange_id, sender_id, content, created_at FROM messages WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        Ok(row.map(MessageRow::into_message))
    }

    async fn messages_for_exchange(&self, exchange_id: i64) -> Result<Vec<Message>, AppError> {
        let rows = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT id, exchange_id, sender_id, content, created_at
            FROM messages
            WHERE exchange_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(exchange_id)
        .fetch_all(self.pool())
        .await?;

        Ok(rows.into_iter().map(MessageRow::into_message).collect())
    }

    async fn create_message(&self, new: &NewMessage) -> Result<Message, AppError> {
        let row = sqlx::query_as::<_, MessageRow>(
            r#"
            INSERT INTO messages (exchange_id, sender_id, content)
            VALUES ($1, $2, $3)
            RETURNING id, exchange_id, sender_id, content, created_at
            "#,
        )
        .bind(new.exchange_id)
        .bind(new.sender_id)
        .bind(&new.content)
        .fetch_one(self.pool())
        .await?;

        Ok(row.into_message())
    }
}
