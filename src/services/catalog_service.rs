//! Product catalog service

use crate::{
    auth::middleware::{ensure_owner_or_privileged, AuthContext},
    error::AppError,
    models::product::{CreateProductRequest, Product},
    repository::{ProductRepository, UserRepository},
};
use sqlx::PgPool;
use validator::Validate;

pub struct CatalogService {
    db: PgPool,
}

impl CatalogService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List products
    pub async fn list_products(&self, limit: i64, offset: i64) -> Result<Vec<Product>, AppError> {
        let repo = ProductRepository::new(self.db.clone());
        repo.list(limit.clamp(1, 500), offset.max(0)).await
    }

    /// Search products by title, authors, or description
    pub async fn search_products(
        &self,
        query: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Product>, AppError> {
        let repo = ProductRepository::new(self.db.clone());
        repo.search(query, limit.clamp(1, 500), offset.max(0)).await
    }

    /// Create a product. Role gating happens at the route layer.
    pub async fn create_product(&self, req: CreateProductRequest) -> Result<Product, AppError> {
        req.validate()?;

        let repo = ProductRepository::new(self.db.clone());
        let product = repo.create(&req).await?;

        tracing::info!(product_id = %product.id, title = %product.title, "Product created");

        Ok(product)
    }

    /// Products a user has ordered. Only the owner or a privileged role may
    /// look at someone's purchases.
    pub async fn products_for_user(
        &self,
        ctx: &AuthContext,
        username: &str,
    ) -> Result<Vec<Product>, AppError> {
        let user_repo = UserRepository::new(self.db.clone());

        let owner = user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::not_found("user"))?;

        let identity = user_repo
            .find_by_username(&ctx.username)
            .await?
            .ok_or_else(|| AppError::not_found("user"))?;

        ensure_owner_or_privileged(ctx, owner.id, identity.id)?;

        let repo = ProductRepository::new(self.db.clone());
        repo.list_ordered_by_user(owner.id).await
    }
}
