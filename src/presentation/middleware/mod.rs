//! Middleware
//!
//! Tower middleware for request processing.

pub mod auth;
pub mod cors;

pub use auth::{require_session, AuthUser, SESSION_USER_KEY};
