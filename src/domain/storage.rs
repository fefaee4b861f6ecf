//! Persistence gateway supertrait.
//!
//! Bundles the four per-entity repository traits so the rest of the
//! application can hold a single `Arc<dyn Storage>` and the backing
//! implementation (in-memory or Postgres) can be selected at startup.

use crate::domain::entities::{
    ExchangeRepository, MessageRepository, SkillRepository, UserRepository,
};

/// The complete data-access surface of the application.
///
/// Implemented by `MemoryStorage` and `PgStorage`; both must satisfy the
/// identical contracts documented on the individual repository traits.
pub trait Storage:
    UserRepository + SkillRepository + ExchangeRepository + MessageRepository
{
}

impl<T> Storage for T where
    T: UserRepository + SkillRepository + ExchangeRepository + MessageRepository
{
}
