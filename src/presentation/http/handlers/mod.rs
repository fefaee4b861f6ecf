//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints.

pub mod health;
pub mod auth;
pub mod user;
pub mod skill;
pub mod exchange;
pub mod message;
