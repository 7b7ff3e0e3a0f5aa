//! Order repository (storefront side: create from cart, list own orders).
//!
//! Order status mutation lives in the admin service only; this repository
//! never updates a placed order.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use charted_art_core::{OrderId, OrderItemId, OrderStatus, UserId, VariantId};

use super::RepositoryError;
use crate::models::{Order, OrderItem, ShippingAddress};

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: OrderId,
    user_id: UserId,
    status: String,
    total_amount: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    id: OrderItemId,
    order_id: OrderId,
    product_id: VariantId,
    size: String,
    frame_type: String,
    image_url: Option<String>,
    quantity: i32,
    price: Decimal,
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
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

/// Repository for order operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create an order from the user's cart, emptying the cart.
    ///
    /// Line items are denormalized copies of the cart lines (size, frame,
    /// quantity, price snapshot); the total is the sum of line price times
    /// quantity. Runs in a single transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` when the cart has no lines, and
    /// `RepositoryError::Database` if any query fails.
    pub async fn create_from_cart(
        &self,
        user: UserId,
        shipping: &ShippingAddress,
    ) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let total = sqlx::query_scalar::<_, Option<Decimal>>(
            r"
            SELECT SUM(ci.price * COALESCE(ci.quantity, 1))
            FROM cart_items ci
            JOIN carts c ON c.id = ci.cart_id
            WHERE c.user_id = $1
            ",
        )
        .bind(user)
        .fetch_one(&mut *tx)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        let order = sqlx::query_as::<_, OrderRow>(
            r"
            INSERT INTO orders (user_id, total_amount, shipping_address, shipping_city,
                                shipping_state, shipping_zip, shipping_country)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, status, total_amount, created_at, updated_at
            ",
        )
        .bind(user)
        .bind(total)
        .bind(&shipping.address)
        .bind(&shipping.city)
        .bind(&shipping.state)
        .bind(&shipping.zip)
        .bind(&shipping.country)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r"
            INSERT INTO order_items (order_id, product_id, size, frame_type, image_url,
                                     quantity, price)
            SELECT $1, ci.product_id, p.size, p.frame_type, ci.image_url,
                   COALESCE(ci.quantity, 1), ci.price
            FROM cart_items ci
            JOIN products p ON p.id = ci.product_id
            JOIN carts c ON c.id = ci.cart_id
            WHERE c.user_id = $2
            ",
        )
        .bind(order.id)
        .bind(user)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
            DELETE FROM cart_items
            WHERE cart_id IN (SELECT id FROM carts WHERE user_id = $1)
            ",
        )
        .bind(user)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        let items = self
            .items_for(&[order.id])
            .await?
            .into_iter()
            .map(|(_, item)| item)
            .collect();
        Ok(Order {
            id: order.id,
            user_id: order.user_id,
            status: parse_status(&order.status)?,
            total_amount: order.total_amount,
            created_at: order.created_at,
            updated_at: order.updated_at,
            items,
        })
    }

    /// The user's orders, newest first, with their line items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list_for_user(&self, user: UserId) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, user_id, status, total_amount, created_at, updated_at
            FROM orders
            WHERE user_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(user)
        .fetch_all(self.pool)
        .await?;

        let ids: Vec<OrderId> = rows.iter().map(|r| r.id).collect();
        let mut items: std::collections::HashMap<OrderId, Vec<OrderItem>> =
            std::collections::HashMap::new();
        for (order_id, item) in self.items_for(&ids).await? {
            items.entry(order_id).or_default().push(item);
        }

        rows.into_iter()
            .map(|row| {
                Ok(Order {
                    id: row.id,
                    user_id: row.user_id,
                    status: parse_status(&row.status)?,
                    total_amount: row.total_amount,
                    created_at: row.created_at,
                    updated_at: row.updated_at,
                    items: items.remove(&row.id).unwrap_or_default(),
                })
            })
            .collect()
    }

    /// Fetch line items for a set of orders, tagged with their order id.
    async fn items_for(
        &self,
        orders: &[OrderId],
    ) -> Result<Vec<(OrderId, OrderItem)>, RepositoryError> {
        if orders.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<uuid::Uuid> = orders.iter().map(|id| id.as_uuid()).collect();
        let rows = sqlx::query_as::<_, OrderItemRow>(
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

        Ok(rows
            .into_iter()
            .map(|row| (row.order_id, row.into()))
            .collect())
    }
}
