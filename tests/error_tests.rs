//! Error model tests: status mapping and response shape

use axum::response::IntoResponse;
use http_body_util::BodyExt;
use paper_store::error::AppError;

async fn response_parts(error: AppError) -> (u16, serde_json::Value) {
    let response = error.into_response();
    let status = response.status().as_u16();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

#[tokio::test]
async fn test_status_mapping() {
    assert_eq!(AppError::Unauthorized.code(), 401);
    assert_eq!(AppError::Authentication("token expired".to_string()).code(), 401);
    assert_eq!(AppError::Authentication("invalid token".to_string()).code(), 401);
    assert_eq!(AppError::Forbidden.code(), 403);
    assert_eq!(AppError::NotFound("order".to_string()).code(), 404);
    assert_eq!(AppError::BadRequest("Username already registered".to_string()).code(), 400);
    assert_eq!(AppError::Validation("bad payload".to_string()).code(), 400);
    assert_eq!(AppError::PreconditionFailed("gate order".to_string()).code(), 500);
    assert_eq!(AppError::Internal("boom".to_string()).code(), 500);
}

#[tokio::test]
async fn test_response_shape() {
    let (status, body) = response_parts(AppError::Forbidden).await;

    assert_eq!(status, 403);
    assert_eq!(body["error"]["code"], 403);
    assert_eq!(body["error"]["message"], "Access denied");
    assert!(body["error"]["request_id"].is_string());
}

#[tokio::test]
async fn test_authentication_reason_is_exposed() {
    let (status, body) =
        response_parts(AppError::Authentication("token expired".to_string())).await;

    assert_eq!(status, 401);
    assert_eq!(body["error"]["message"], "token expired");
}

#[tokio::test]
async fn test_internal_detail_is_not_exposed() {
    let (status, body) = response_parts(AppError::Database(sqlx::Error::RowNotFound)).await;
    assert_eq!(status, 500);
    assert_eq!(body["error"]["message"], "Database error occurred");

    let (_, body) = response_parts(AppError::PreconditionFailed(
        "authorization layer ran without an authentication layer".to_string(),
    ))
    .await;
    assert_eq!(body["error"]["message"], "Internal server error");
}
