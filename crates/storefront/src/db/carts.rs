//! Cart repository.
//!
//! One cart per user (unique `user_id`), created lazily. Every add appends
//! a fresh line with quantity 1; lines are never merged. The item count is
//! the sum of line quantities, with missing quantities read as 1.

use rust_decimal::Decimal;
use sqlx::PgPool;

use charted_art_core::{CartId, UserId, VariantId};

use super::RepositoryError;
use crate::models::CartItem;

#[derive(Debug, sqlx::FromRow)]
struct CartItemRow {
    id: charted_art_core::CartItemId,
    cart_id: CartId,
    product_id: VariantId,
    image_url: Option<String>,
    price: Decimal,
    quantity: Option<i32>,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<CartItemRow> for CartItem {
    fn from(row: CartItemRow) -> Self {
        Self {
            id: row.id,
            cart_id: row.cart_id,
            product_id: row.product_id,
            image_url: row.image_url,
            price: row.price,
            quantity: row.quantity.unwrap_or(1),
            created_at: row.created_at,
        }
    }
}

/// Repository for cart operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Find the user's cart, creating one if absent.
    ///
    /// Idempotent upsert on the unique `user_id`: concurrent callers both
    /// land on the same cart row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn find_or_create_for_user(&self, user: UserId) -> Result<CartId, RepositoryError> {
        let inserted = sqlx::query_scalar::<_, CartId>(
            r"
            INSERT INTO carts (user_id)
            VALUES ($1)
            ON CONFLICT (user_id) DO NOTHING
            RETURNING id
            ",
        )
        .bind(user)
        .fetch_optional(self.pool)
        .await?;

        if let Some(id) = inserted {
            return Ok(id);
        }

        sqlx::query_scalar::<_, CartId>("SELECT id FROM carts WHERE user_id = $1")
            .bind(user)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    /// Append a new line to a cart, quantity fixed at 1.
    ///
    /// `price` and `image_url` are snapshots taken at add time.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn add_item(
        &self,
        cart: CartId,
        variant: VariantId,
        image_url: Option<&str>,
        price: Decimal,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO cart_items (cart_id, product_id, image_url, price, quantity)
            VALUES ($1, $2, $3, $4, 1)
            ",
        )
        .bind(cart)
        .bind(variant)
        .bind(image_url)
        .bind(price)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// List the lines of the user's cart, newest last.
    ///
    /// Returns an empty list when the user has no cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn items_for_user(&self, user: UserId) -> Result<Vec<CartItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, CartItemRow>(
            r"
            SELECT ci.id, ci.cart_id, ci.product_id, ci.image_url, ci.price,
                   ci.quantity, ci.created_at
            FROM cart_items ci
            JOIN carts c ON c.id = ci.cart_id
            WHERE c.user_id = $1
            ORDER BY ci.created_at
            ",
        )
        .bind(user)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Total item count for the user's cart.
    ///
    /// Sums line quantities (missing quantity counts as 1); 0 when the
    /// user has no cart or no lines.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn item_count(&self, user: UserId) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COALESCE(SUM(COALESCE(ci.quantity, 1)), 0)::BIGINT
            FROM cart_items ci
            JOIN carts c ON c.id = ci.cart_id
            WHERE c.user_id = $1
            ",
        )
        .bind(user)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }

    /// Remove every line from the user's cart (after checkout).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn clear_for_user(&self, user: UserId) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            DELETE FROM cart_items
            WHERE cart_id IN (SELECT id FROM carts WHERE user_id = $1)
            ",
        )
        .bind(user)
        .execute(self.pool)
        .await?;

        Ok(())
    }
}
