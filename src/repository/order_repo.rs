//! Order and payment repository

use crate::{
    error::AppError,
    models::order::{Order, Payment},
};
use sqlx::PgPool;
use uuid::Uuid;

pub struct OrderRepository {
    db: PgPool,
}

impl OrderRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create an order in the `created` state
    pub async fn create(&self, user_id: Uuid, product_id: Uuid) -> Result<Order, AppError> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (user_id, product_id, status)
            VALUES ($1, $2, 'created')
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(product_id)
        .fetch_one(&self.db)
        .await?;

        Ok(order)
    }

    /// Look up an order by id
    pub async fn find_by_id(&self, id: &Uuid) -> Result<Option<Order>, AppError> {
        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(order)
    }

    /// List all orders, newest first
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Order>, AppError> {
        let orders = sqlx::query_as::<_, Order>(
            "SELECT * FROM orders ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await?;

        Ok(orders)
    }

    /// Orders belonging to one user
    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Order>, AppError> {
        let orders = sqlx::query_as::<_, Order>(
            "SELECT * FROM orders WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(orders)
    }

    /// Move a `created` order to `paid` and record its payment, atomically.
    ///
    /// Both statements run in one transaction and the update is guarded on
    /// the current status, so a failure between them cannot leave a payment
    /// row against a `created` order, and concurrent pays cannot both record
    /// a payment. Returns `None` when the order is missing or already paid.
    pub async fn record_payment(
        &self,
        order_id: Uuid,
        amount: f64,
    ) -> Result<Option<Payment>, AppError> {
        let mut tx = self.db.begin().await?;

        let updated = sqlx::query_as::<_, Order>(
            "UPDATE orders SET status = 'paid' WHERE id = $1 AND status = 'created' RETURNING *",
        )
        .bind(order_id)
        .fetch_optional(&mut *tx)
        .await?;

        if updated.is_none() {
            return Ok(None);
        }

        let payment = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (order_id, amount, status)
            VALUES ($1, $2, 'completed')
            RETURNING *
            "#,
        )
        .bind(order_id)
        .bind(amount)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(payment))
    }
}
