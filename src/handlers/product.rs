//! Product catalog HTTP handlers

use crate::{
    auth::middleware::AuthContext,
    error::AppError,
    middleware::AppState,
    models::product::{CreateProductRequest, ListQuery, SearchQuery},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;

/// List products (public)
pub async fn list_products(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let products = state
        .catalog_service
        .list_products(query.limit, query.offset)
        .await?;

    Ok(Json(json!({
        "products": products,
        "count": products.len()
    })))
}

/// Search products (public)
pub async fn search_products(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, AppError> {
    let products = state
        .catalog_service
        .search_products(&query.q, query.limit, query.offset)
        .await?;

    Ok(Json(json!({
        "products": products,
        "count": products.len()
    })))
}

/// Create a product (admin/superadmin, enforced by the route layers)
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Json(req): Json<CreateProductRequest>,
) -> Result<impl IntoResponse, AppError> {
    let product = state.catalog_service.create_product(req).await?;

    tracing::debug!(username = %auth_context.username, "Product created via admin route");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Product created successfully",
            "product": product
        })),
    ))
}

/// Products a user has ordered (owner or privileged role)
pub async fn get_user_products(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let products = state
        .catalog_service
        .products_for_user(&auth_context, &username)
        .await?;

    Ok(Json(json!({
        "products": products,
        "count": products.len()
    })))
}
