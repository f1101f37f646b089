//! Order HTTP handlers

use crate::{
    auth::middleware::AuthContext,
    error::AppError,
    middleware::AppState,
    models::order::CreateOrderRequest,
    models::product::ListQuery,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

/// Create an order for the authenticated user
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Json(req): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse, AppError> {
    let order = state.order_service.create_order(&auth_context, req).await?;

    Ok((StatusCode::CREATED, Json(order)))
}

/// List all orders (admin/superadmin, enforced by the route layers)
pub async fn list_orders(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let orders = state.order_service.list_orders(query.limit, query.offset).await?;

    Ok(Json(json!({
        "orders": orders,
        "count": orders.len()
    })))
}

/// Fetch one order (owner or privileged role)
pub async fn get_order(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let order = state.order_service.get_order(&auth_context, id).await?;

    Ok(Json(order))
}

/// Orders of the authenticated user
pub async fn my_orders(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
) -> Result<impl IntoResponse, AppError> {
    let orders = state.order_service.my_orders(&auth_context).await?;

    Ok(Json(json!({
        "orders": orders,
        "count": orders.len()
    })))
}
