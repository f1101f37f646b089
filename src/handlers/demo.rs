//! Demonstration routes for the protection tiers.
//! Useful as smoke targets: one public, one authenticated, one role-gated.

use crate::auth::middleware::AuthContext;
use axum::{response::IntoResponse, Json};
use serde_json::json;

/// No token required
pub async fn public_route() -> impl IntoResponse {
    Json(json!({"message": "Hello, this is a public route."}))
}

/// Requires a valid token
pub async fn protected_route(auth_context: AuthContext) -> impl IntoResponse {
    Json(json!({
        "message": format!(
            "Hello, {}. You have access to this protected route.",
            auth_context.username
        )
    }))
}

/// Requires admin or superadmin
pub async fn admin_route(auth_context: AuthContext) -> impl IntoResponse {
    Json(json!({
        "message": format!("Hello, {}. You have access to this admin route.", auth_context.username)
    }))
}
