//! Exchange Repository Implementation
//!
//! PostgreSQL implementation of the ExchangeRepository trait. The status
//! transitions are conditional UPDATEs guarded on the current status, so
//! the terminal-state check is atomic with the write; completion wraps the
//! status change and both counter increments in one transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::PgStorage;
use crate::domain::entities::{Exchange, ExchangeRepository, ExchangeStatus, NewExchange};
use crate::shared::error::AppError;

/// Database row representation matching the exchanges table schema.
#[derive(Debug, sqlx::FromRow)]
struct ExchangeRow {
    id: i64,
    initiator_id: i64,
    responder_id: i64,
    initiator_skill_id: i64,
    responder_skill_id: i64,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ExchangeRow {
    fn into_exchange(self) -> Result<Exchange, AppError> {
        let status = ExchangeStatus::parse(&self.status).ok_or_else(|| {
            AppError::Internal(format!("Unknown exchange status in storage: {}", self.status))
        })?;

        Ok(Exchange {
            id: self.id,
            initiator_id: self.initiator_id,
            responder_id: self.responder_id,
            initiator_skill_id: self.initiator_skill_id,
            responder_skill_id: self.responder_skill_id,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const EXCHANGE_COLUMNS: &str = "id, initiator_id, responder_id, initiator_skill_id, \
                                responder_skill_id, status, created_at, updated_at";

#[async_trait]
impl ExchangeRepository for PgStorage {
    async fn find_exchange(&self, id: i64) -> Result<Option<Exchange>, AppError> {
        let row = sqlx::query_as::<_, ExchangeRow>(&format!(
            "SELECT {EXCHANGE_COLUMNS} FROM exchanges WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        row.map(ExchangeRow::into_exchange).transpose()
    }

    async fn exchanges_for_user(&self, user_id: i64) -> Result<Vec<Exchange>, AppError> {
        let rows = sqlx::query_as::<_, ExchangeRow>(&format!(
            r#"
            SELECT {EXCHANGE_COLUMNS}
            FROM exchanges
            WHERE initiator_id = $1 OR responder_id = $1
            ORDER BY updated_at DESC, id DESC
            "#
        ))
        .bind(user_id)
        .fetch_all(self.pool())
        .await?;

        rows.into_iter().map(ExchangeRow::into_exchange).collect()
    }

    async fn create_exchange(&self, new: &NewExchange) -> Result<Exchange, AppError> {
        let row = sqlx::query_as::<_, ExchangeRow>(&format!(
            r#"
            INSERT INTO exchanges
                (initiator_id, responder_id, initiator_skill_id, responder_skill_id, status)
            VALUES ($1, $2, $3, $4, 'pending')
            RETURNING {EXCHANGE_COLUMNS}
            "#
        ))
        .bind(new.initiator_id)
        .bind(new.responder_id)
        .bind(new.initiator_skill_id)
        .bind(new.responder_skill_id)
        .fetch_one(self.pool())
        .await?;

        row.into_exchange()
    }

    async fn settle_exchange(
        &self,
        id: i64,
        status: ExchangeStatus,
    ) -> Result<Option<Exchange>, AppError> {
        debug_assert!(matches!(
            status,
            ExchangeStatus::Accepted | ExchangeStatus::Rejected
        ));

        let row = sqlx::query_as::<_, ExchangeRow>(&format!(
            r#"
            UPDATE exchanges
            SET status = $2, updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING {EXCHANGE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(self.pool())
        .await?;

        row.map(ExchangeRow::into_exchange).transpose()
    }

    async fn complete_exchange(&self, id: i64) -> Result<Option<Exchange>, AppError> {
        let mut tx = self.pool().begin().await?;

        let row = sqlx::query_as::<_, ExchangeRow>(&format!(
            r#"
            UPDATE exchanges
            SET status = 'completed', updated_at = NOW()
            WHERE id = $1 AND status IN ('pending', 'accepted')
            RETURNING {EXCHANGE_COLUMNS}
            "#
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            tx.rollback().await?;
            return Ok(None);
        };

        // One increment per participant slot; a self-exchange counts twice,
        // matching the in-memory backend.
        for user_id in [row.initiator_id, row.responder_id] {
            sqlx::query("UPDATE users SET exchange_count = exchange_count + 1 WHERE id = $1")
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        row.into_exchange().map(Some)
    }
}
