//! Route Configuration
//!
//! Configures all HTTP routes for the API. Mutating routes sit behind the
//! session middleware; profile and skill reads are public.

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use super::handlers;
use crate::presentation::middleware::require_session;
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .route("/health", get(handlers::health::health_check))
        .with_state(state)
}

/// API routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/users", user_routes())
        .nest("/skills", skill_routes())
        .nest("/exchanges", exchange_routes())
}

/// Authentication routes (public)
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout))
        .route("/session", get(handlers::auth::session_status))
}

/// User routes: public profile reads, protected profile updates
fn user_routes() -> Router<AppState> {
    let protected = Router::new()
        .route("/{id}", put(handlers::user::update_user))
        .route_layer(middleware::from_fn(require_session));

    Router::new()
        .route("/{id}", get(handlers::user::get_user))
        .merge(protected)
}

/// Skill routes: public listing and reads, protected writes
fn skill_routes() -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(handlers::skill::create_skill))
        .route(
            "/{id}",
            put(handlers::skill::update_skill).delete(handlers::skill::delete_skill),
        )
        .route_layer(middleware::from_fn(require_session));

    Router::new()
        .route("/", get(handlers::skill::list_skills))
        .route("/{id}", get(handlers::skill::get_skill))
        .merge(protected)
}

/// Exchange routes (all protected), including the per-exchange thread
fn exchange_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::exchange::list_exchanges).post(handlers::exchange::create_exchange),
        )
        .route("/{id}", get(handlers::exchange::get_exchange))
        .route("/{id}/status", put(handlers::exchange::update_exchange_status))
        .route(
            "/{id}/messages",
            get(handlers::message::list_messages).post(handlers::message::create_message),
        )
        .route_layer(middleware::from_fn(require_session))
}
