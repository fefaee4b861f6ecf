//! Infrastructure Layer
//!
//! Concrete implementations of the domain repository traits: a PostgreSQL
//! backend (`PgStorage`) and an in-memory backend (`MemoryStorage`), plus
//! database pool management.

pub mod database;
pub mod memory;
pub mod repositories;

pub use memory::MemoryStorage;
pub use repositories::PgStorage;
