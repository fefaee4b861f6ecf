//! Application Layer
//!
//! Request/response DTOs and the services that implement use cases on top
//! of the domain layer.

pub mod dto;
pub mod services;
