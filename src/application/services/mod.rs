//! Application Services
//!
//! Use-case logic between the HTTP handlers and the storage gateway.

pub mod auth_service;
pub mod exchange_service;

pub use auth_service::{AuthError, AuthService, AuthServiceImpl, Registration};
pub use exchange_service::{ExchangeError, ExchangeProposal, ExchangeService, ExchangeServiceImpl};
