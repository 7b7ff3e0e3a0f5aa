//! Order repository (admin side: list everything, mutate status).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use charted_art_core::{OrderId, OrderItemId, OrderStatus, UserId, VariantId};

use super::RepositoryError;
use crate::models::{AdminOrder, AdminOrderItem, CustomerProfile};

#[derive(Debug, sqlx::FromRow)]
struct AdminOrderRow {
    id: OrderId,
    status: String,
    total_amount: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    user_id: UserId,
    email: String,
    full_name: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
struct AdminOrderItemRow {
    id: OrderItemId,
    order_id: OrderId,
    product_id: VariantId,
    size: String,
    frame_type: String,
    image_url: Option<String>,
    quantity: i32,
    price: Decimal,
}

impl From<AdminOrderItemRow> for AdminOrderItem {
    fn from(row: AdminOrderItemRow) -> Self {
        Self {
            id: row.id,
            product_id: row.product_id,
            size: row.size,
            frame_type: row.frame_type,
            image_url: row.image_url,
            quantity: row.quantity,
            price: row.price,
        }
    }
}

fn parse_status(raw: &str) -> Result<OrderStatus, RepositoryError> {
    raw.parse()
        .map_err(|e: String| RepositoryError::DataCorruption(e))
}

/// Repository for admin order operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Every order, newest first, with line items and the owning profile.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails, or
    /// `RepositoryError::DataCorruption` on an unknown stored status.
    pub async fn list_all(&self) -> Result<Vec<AdminOrder>, RepositoryError> {
        let rows = sqlx::query_as::<_, AdminOrderRow>(
            r"
            SELECT o.id, o.status, o.total_amount, o.created_at, o.updated_at,
                   p.id AS user_id, p.email, p.full_name
            FROM orders o
            JOIN profiles p ON p.id = o.user_id
            ORDER BY o.created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        let ids: Vec<uuid::Uuid> = rows.iter().map(|r| r.id.as_uuid()).collect();
        let item_rows = sqlx::query_as::<_, AdminOrderItemRow>(
            r"
            SELECT id, order_id, product_id, size, frame_type, image_url, quantity, price
            FROM order_items
            WHERE order_id = ANY($1)
            ORDER BY created_at
            ",
        )
        .bind(&ids)
        .fetch_all(self.pool)
        .await?;

        let mut items: std::collections::HashMap<OrderId, Vec<AdminOrderItem>> =
            std::collections::HashMap::new();
        for row in item_rows {
            items.entry(row.order_id).or_default().push(row.into());
        }

        rows.into_iter()
            .map(|row| {
                Ok(AdminOrder {
                    id: row.id,
                    status: parse_status(&row.status)?,
                    total_amount: row.total_amount,
                    created_at: row.created_at,
                    updated_at: row.updated_at,
                    customer: CustomerProfile {
                        id: row.user_id,
                        email: row.email,
                        full_name: row.full_name,
                    },
                    items: items.remove(&row.id).unwrap_or_default(),
                })
            })
            .collect()
    }

    /// Move an order to a new status, stamping `updated_at`.
    ///
    /// The status set is flat: any value from the enumeration may follow
    /// any other, so no transition check is performed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` when the order does not exist,
    /// `RepositoryError::Database` if the update fails.
    pub async fn set_status(
        &self,
        order: OrderId,
        status: OrderStatus,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE orders
            SET status = $2, updated_at = now()
            WHERE id = $1
            ",
        )
        .bind(order)
        .bind(status.to_string())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
