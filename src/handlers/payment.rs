//! Payment HTTP handlers

use crate::{auth::middleware::AuthContext, error::AppError, middleware::AppState};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

/// Pay for an order (owner or privileged role)
pub async fn pay_order(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let payment = state.order_service.pay_order(&auth_context, id).await?;

    Ok(Json(json!({
        "message": "Order paid successfully",
        "payment": payment
    })))
}
