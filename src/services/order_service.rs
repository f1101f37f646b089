//! Order and payment service

use crate::{
    auth::middleware::{ensure_owner_or_privileged, AuthContext},
    error::AppError,
    models::order::{CreateOrderRequest, Order, OrderStatus, Payment},
    repository::{OrderRepository, ProductRepository, UserRepository},
};
use sqlx::PgPool;
use uuid::Uuid;

pub struct OrderService {
    db: PgPool,
}

impl OrderService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create an order owned by the authenticated user
    pub async fn create_order(
        &self,
        ctx: &AuthContext,
        req: CreateOrderRequest,
    ) -> Result<Order, AppError> {
        let product_repo = ProductRepository::new(self.db.clone());
        product_repo
            .find_by_id(&req.product_id)
            .await?
            .ok_or_else(|| AppError::not_found("product"))?;

        let user = self.resolve_identity(ctx).await?;

        let order_repo = OrderRepository::new(self.db.clone());
        let order = order_repo.create(user.id, req.product_id).await?;

        tracing::info!(order_id = %order.id, username = %ctx.username, "Order created");

        Ok(order)
    }

    /// List every order. Role gating happens at the route layer.
    pub async fn list_orders(&self, limit: i64, offset: i64) -> Result<Vec<Order>, AppError> {
        let repo = OrderRepository::new(self.db.clone());
        repo.list(limit.clamp(1, 500), offset.max(0)).await
    }

    /// Fetch one order; only the owner or a privileged role may see it
    pub async fn get_order(&self, ctx: &AuthContext, order_id: Uuid) -> Result<Order, AppError> {
        let repo = OrderRepository::new(self.db.clone());
        let order = repo
            .find_by_id(&order_id)
            .await?
            .ok_or_else(|| AppError::not_found("order"))?;

        let user = self.resolve_identity(ctx).await?;
        ensure_owner_or_privileged(ctx, order.user_id, user.id)?;

        Ok(order)
    }

    /// Orders belonging to the authenticated user
    pub async fn my_orders(&self, ctx: &AuthContext) -> Result<Vec<Order>, AppError> {
        let user = self.resolve_identity(ctx).await?;

        let repo = OrderRepository::new(self.db.clone());
        repo.list_by_user(user.id).await
    }

    /// Pay for an order. Owner-or-privileged; a payment row is recorded at
    /// the product's current price and the order moves to `paid`.
    pub async fn pay_order(&self, ctx: &AuthContext, order_id: Uuid) -> Result<Payment, AppError> {
        let order_repo = OrderRepository::new(self.db.clone());
        let order = order_repo
            .find_by_id(&order_id)
            .await?
            .ok_or_else(|| AppError::not_found("order"))?;

        let user = self.resolve_identity(ctx).await?;
        ensure_owner_or_privileged(ctx, order.user_id, user.id)?;

        if order.status == OrderStatus::Paid {
            return Err(AppError::BadRequest("Order is already paid".to_string()));
        }

        let product_repo = ProductRepository::new(self.db.clone());
        let product = product_repo
            .find_by_id(&order.product_id)
            .await?
            .ok_or_else(|| AppError::not_found("product"))?;

        // The repository flips the status and inserts the payment in one
        // transaction; a concurrent pay that lost the race comes back None
        let payment = order_repo
            .record_payment(order.id, product.price)
            .await?
            .ok_or_else(|| AppError::BadRequest("Order is already paid".to_string()))?;

        tracing::info!(
            order_id = %order.id,
            amount = payment.amount,
            username = %ctx.username,
            "Order paid"
        );

        Ok(payment)
    }

    /// Resolve the authenticated username to its stored identity. The token
    /// carries no user id, so ownership checks go back to the store.
    async fn resolve_identity(
        &self,
        ctx: &AuthContext,
    ) -> Result<crate::models::user::User, AppError> {
        let user_repo = UserRepository::new(self.db.clone());
        user_repo
            .find_by_username(&ctx.username)
            .await?
            .ok_or_else(|| AppError::not_found("user"))
    }
}
