/// Authentication middleware
use crate::{error::ServerError, state::AppState};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use campus_core::User;

/// Extension type to store the authenticated user in the request
/// Can be used as an extractor in handlers
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl AuthenticatedUser {
    pub fn user(&self) -> &User {
        &self.0
    }
}

/// Middleware that validates the bearer token and resolves it to an active user
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    // Extract Authorization header
    let auth_header = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(ServerError::InvalidCredentials)?;

    // Check Bearer prefix
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(ServerError::InvalidCredentials)?;

    let username = app_state.auth_service.verify_token(token).map_err(|e| {
        tracing::warn!("Token verification failed: {}", e);
        e
    })?;

    let user = campus_storage::users::get_by_username(&app_state.pool, &username)
        .await?
        .ok_or(ServerError::UserNotFound)?;

    if !user.is_active {
        tracing::warn!(username = %user.username, "Inactive user presented a token");
        return Err(ServerError::InvalidCredentials);
    }

    request.extensions_mut().insert(AuthenticatedUser(user));

    Ok(next.run(request).await)
}

/// Implement FromRequestParts so AuthenticatedUser can be used as an extractor
#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(ServerError::InvalidCredentials)
    }
}
