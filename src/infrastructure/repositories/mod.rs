//! Repository Implementations
//!
//! PostgreSQL implementations of the domain repository traits. `PgStorage`
//! is one handle over the connection pool; each entity's trait impl lives
//! in its own file.

pub mod exchange_repository;
pub mod message_repository;
pub mod skill_repository;
pub mod user_repository;

use sqlx::PgPool;

/// PostgreSQL storage backend.
///
/// Implements all four repository traits (and therefore `Storage`) against
/// a shared connection pool. Uses sqlx with runtime-checked queries.
#[derive(Clone)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    /// Create a new PgStorage with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) fn pool(&self) -> &PgPool {
        &self.pool
    }
}
