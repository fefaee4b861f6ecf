//! Authentication Middleware
//!
//! Session-cookie validation for protected routes. The login and register
//! handlers store the user id in the session; this middleware requires it
//! and exposes it to handlers as a request extension.

use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
};
use tower_sessions::Session;

use crate::shared::error::AppError;

/// Session key holding the authenticated user's id.
pub const SESSION_USER_KEY: &str = "user_id";

/// Authenticated user extension
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: i64,
}

/// Middleware that rejects requests without an authenticated session.
pub async fn require_session(
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user_id: i64 = session
        .get(SESSION_USER_KEY)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Authentication required".into()))?;

    request.extensions_mut().insert(AuthUser { user_id });

    Ok(next.run(request).await)
}
