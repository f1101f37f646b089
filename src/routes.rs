//! Route registration
//!
//! Routes are grouped by protection tier. The authentication layer is applied
//! outermost on protected groups so it always runs before any authorization
//! layer; role-gated routes sit in their own group with the allowed-role set
//! fixed here, at registration time.

use axum::{
    extract::{DefaultBodyLimit, Request},
    middleware::{from_fn, from_fn_with_state, Next},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::{
    auth::middleware::{authorize_roles, jwt_auth_middleware},
    handlers,
    middleware::AppState,
    models::user::Role,
};

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let jwt_service = state.jwt_service.clone();

    // Public endpoints: health, metrics, registration, login, catalog reads
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .route("/metrics", get(handlers::metrics::metrics_export))
        .route("/api/v1/auth/register", post(handlers::auth::register))
        .route("/api/v1/auth/login", post(handlers::auth::login))
        .route("/api/v1/products", get(handlers::product::list_products))
        .route("/api/v1/products/search", get(handlers::product::search_products))
        .route("/api/v1/demo/public", get(handlers::demo::public_route));

    // Admin surface: allowed roles fixed at registration
    let admin_routes = Router::new()
        .route("/api/v1/admin/products", post(handlers::product::create_product))
        .route("/api/v1/admin/orders", get(handlers::order::list_orders))
        .route("/api/v1/demo/admin", get(handlers::demo::admin_route))
        .layer(from_fn(|req: Request, next: Next| {
            authorize_roles(Role::PRIVILEGED, req, next)
        }));

    // Everything below requires a valid token; ownership checks for the
    // per-user resources live in the services
    let authenticated_routes = Router::new()
        .route("/api/v1/auth/me", get(handlers::auth::get_current_user))
        .route("/api/v1/demo/protected", get(handlers::demo::protected_route))
        .route("/api/v1/orders", post(handlers::order::create_order))
        .route("/api/v1/orders/{id}", get(handlers::order::get_order))
        .route("/api/v1/orders/{id}/pay", post(handlers::payment::pay_order))
        .route("/api/v1/users/me/orders", get(handlers::order::my_orders))
        .route(
            "/api/v1/users/{username}/products",
            get(handlers::product::get_user_products),
        )
        .merge(admin_routes)
        // Applied last so authentication wraps the authorization layer above
        .layer(from_fn_with_state(jwt_service, jwt_auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(authenticated_routes)
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(CorsLayer::permissive())
        .layer(from_fn(crate::middleware::request_tracking_middleware))
        .with_state(state)
}
