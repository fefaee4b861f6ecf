//! # Domain Layer
//!
//! The domain layer contains the core business logic of the marketplace.
//! It is independent of any external frameworks or infrastructure concerns.
//!
//! ## Structure
//!
//! - **entities**: Core domain entities (User, Skill, Exchange, Message)
//! - **services**: Pure domain services (exchange transition policy)
//! - **storage**: The persistence gateway supertrait
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure or presentation layers
//! - Repository traits define data access contracts
//! - Entities encapsulate domain behavior

pub mod entities;
pub mod services;
pub mod storage;

// Re-export commonly used types
pub use entities::*;
pub use storage::Storage;
