//! # SkillSwap Server Library
//!
//! This crate provides a skill-bartering marketplace server with:
//! - RESTful HTTP API endpoints with session-cookie authentication
//! - Skill listings, pairwise exchanges, and per-exchange messaging
//! - Swappable storage: in-memory by default, PostgreSQL when configured
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Core business entities, repository traits, and the
//!   exchange transition policy
//! - **Application Layer**: Business logic services and DTOs
//! - **Infrastructure Layer**: In-memory and PostgreSQL storage backends
//! - **Presentation Layer**: HTTP handlers, routes, and middleware
//!
//! ## Module Structure
//!
//! ```text
//! skillswap/
//! +-- config/        Configuration management
//! +-- domain/        Domain entities, policies, and traits
//! +-- application/   Application services and DTOs
//! +-- infrastructure/ Storage backend implementations
//! +-- presentation/  HTTP routes, handlers, and middleware
//! +-- shared/        Common utilities (errors, validation)
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - Storage implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers and middleware
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
