//! Product repository

use crate::{
    error::AppError,
    models::product::{CreateProductRequest, Product},
};
use sqlx::PgPool;
use uuid::Uuid;

pub struct ProductRepository {
    db: PgPool,
}

impl ProductRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Look up a product by id
    pub async fn find_by_id(&self, id: &Uuid) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(product)
    }

    /// List products, newest first
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT * FROM products ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await?;

        Ok(products)
    }

    /// Search products by title, authors, or description
    pub async fn search(
        &self,
        query: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Product>, AppError> {
        let pattern = format!("%{}%", query);

        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT * FROM products
            WHERE title ILIKE $1 OR authors ILIKE $1 OR description ILIKE $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(&pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await?;

        Ok(products)
    }

    /// Create a product
    pub async fn create(&self, req: &CreateProductRequest) -> Result<Product, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (title, authors, published_date, description, price)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&req.title)
        .bind(&req.authors)
        .bind(req.published_date)
        .bind(&req.description)
        .bind(req.price)
        .fetch_one(&self.db)
        .await?;

        Ok(product)
    }

    /// Products a user has ordered
    pub async fn list_ordered_by_user(&self, user_id: Uuid) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT p.* FROM products p
            JOIN orders o ON o.product_id = p.id
            WHERE o.user_id = $1
            ORDER BY o.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(products)
    }
}
