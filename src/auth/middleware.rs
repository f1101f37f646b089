//! Authentication and authorization middleware
//!
//! Two composable stages wrap protected handlers: the authentication stage
//! validates the bearer token and attaches an `AuthContext`; the authorization
//! stage checks that context against a role set fixed at route registration.
//! Authentication always runs before authorization; an authorization layer
//! that finds no context reports a wiring bug, not a client error.

use crate::{
    auth::jwt::{JwtService, TokenError},
    error::AppError,
    models::user::Role,
};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Authenticated identity attached to request extensions.
/// Request-scoped; derived entirely from the validated token, never
/// re-checked against storage within the token's lifetime.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub username: String,
    pub role: Role,
}

// Handlers extract AuthContext directly from request parts
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Extract the bearer token from the Authorization header.
/// Absent header, non-Bearer scheme, and empty remainder all fail the same
/// way the codec rejects a bad token.
pub fn extract_token(headers: &HeaderMap) -> Result<String, AppError> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .ok_or_else(|| AppError::Authentication("invalid token".to_string()))
}

/// Authentication stage. Rejects with 401 before the handler runs; on
/// success the decoded identity rides along in request extensions.
pub async fn jwt_auth_middleware(
    State(jwt_service): State<Arc<JwtService>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(req.headers())?;

    let claims = jwt_service.decode(&token).map_err(|e| match e {
        TokenError::Expired => AppError::Authentication("token expired".to_string()),
        TokenError::Invalid => AppError::Authentication("invalid token".to_string()),
    })?;

    req.extensions_mut().insert(AuthContext {
        username: claims.sub,
        role: claims.role,
    });

    Ok(next.run(req).await)
}

/// Authorization stage. The allowed set is fixed at route registration;
/// membership is an exact match on the enumerated role.
pub async fn authorize_roles(
    allowed: &'static [Role],
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ctx = req.extensions().get::<AuthContext>().ok_or_else(|| {
        AppError::PreconditionFailed(
            "authorization layer ran without an authentication layer".to_string(),
        )
    })?;

    if !allowed.contains(&ctx.role) {
        tracing::warn!(
            username = %ctx.username,
            role = %ctx.role,
            "Role not permitted for route"
        );
        return Err(AppError::Forbidden);
    }

    Ok(next.run(req).await)
}

/// Ownership check shared by handlers that expose per-user resources:
/// privileged roles pass, everyone else must be the owner.
pub fn ensure_owner_or_privileged(
    ctx: &AuthContext,
    owner_id: uuid::Uuid,
    identity_id: uuid::Uuid,
) -> Result<(), AppError> {
    if ctx.role.is_privileged() || owner_id == identity_id {
        return Ok(());
    }

    tracing::warn!(
        username = %ctx.username,
        "Ownership check failed"
    );
    Err(AppError::Forbidden)
}
