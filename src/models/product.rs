//! Product domain models
//! Products are scientific papers offered for purchase.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Product (a published paper)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: Uuid,
    pub title: String,
    pub authors: String,
    pub published_date: NaiveDate,
    pub description: String,
    pub price: f64,
    pub created_at: DateTime<Utc>,
}

/// Create product request (admin only)
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 512, message = "title must be 1-512 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "authors must not be empty"))]
    pub authors: String,
    pub published_date: NaiveDate,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: f64,
}

/// Pagination query used by listing and search endpoints
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    100
}

/// Search query
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}
