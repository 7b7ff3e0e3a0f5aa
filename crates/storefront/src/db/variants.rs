//! Product variant repository.
//!
//! Variants are created lazily, keyed by the natural unique (size, frame)
//! pair. Creation is an idempotent upsert: when two callers race, both
//! converge on the surviving row and only the caller whose insert landed
//! observes `created = true`.

use rust_decimal::Decimal;
use sqlx::PgPool;

use charted_art_core::{FrameKind, PrintSize, VariantId};

use super::RepositoryError;
use crate::models::Variant;

#[derive(Debug, sqlx::FromRow)]
struct VariantRow {
    id: VariantId,
    size: String,
    frame_type: String,
    base_price: Decimal,
    zoho_item_id: Option<String>,
}

impl From<VariantRow> for Variant {
    fn from(row: VariantRow) -> Self {
        Self {
            id: row.id,
            size: row.size,
            frame_type: row.frame_type,
            base_price: row.base_price,
            zoho_item_id: row.zoho_item_id,
        }
    }
}

/// Repository for product variant operations.
pub struct VariantRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> VariantRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Look up the variant for an exact (size, frame) pair.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find(
        &self,
        size: PrintSize,
        frame: FrameKind,
    ) -> Result<Option<Variant>, RepositoryError> {
        let row = sqlx::query_as::<_, VariantRow>(
            r"
            SELECT id, size, frame_type, base_price, zoho_item_id
            FROM products
            WHERE size = $1 AND frame_type = $2
            ",
        )
        .bind(size.id())
        .bind(frame.id())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Find the variant for a (size, frame) pair, creating it if absent.
    ///
    /// Returns the variant and whether this call created it. The caller
    /// uses the flag to mirror newly created variants into the external
    /// inventory system exactly once.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn find_or_create(
        &self,
        size: PrintSize,
        frame: FrameKind,
        base_price: Decimal,
    ) -> Result<(Variant, bool), RepositoryError> {
        if let Some(existing) = self.find(size, frame).await? {
            return Ok((existing, false));
        }

        let inserted = sqlx::query_as::<_, VariantRow>(
            r"
            INSERT INTO products (size, frame_type, base_price)
            VALUES ($1, $2, $3)
            ON CONFLICT (size, frame_type) DO NOTHING
            RETURNING id, size, frame_type, base_price, zoho_item_id
            ",
        )
        .bind(size.id())
        .bind(frame.id())
        .bind(base_price)
        .fetch_optional(self.pool)
        .await?;

        match inserted {
            Some(row) => Ok((row.into(), true)),
            // Lost the race; re-read the row the other caller created.
            None => {
                let existing = self.find(size, frame).await?.ok_or(RepositoryError::NotFound)?;
                Ok((existing, false))
            }
        }
    }

    /// Fetch a variant by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: VariantId) -> Result<Option<Variant>, RepositoryError> {
        let row = sqlx::query_as::<_, VariantRow>(
            "SELECT id, size, frame_type, base_price, zoho_item_id FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Record the Zoho item a variant was mirrored as.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn set_zoho_item_id(
        &self,
        id: VariantId,
        zoho_item_id: &str,
    ) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE products SET zoho_item_id = $2 WHERE id = $1")
            .bind(id)
            .bind(zoho_item_id)
            .execute(self.pool)
            .await?;

        Ok(())
    }

    /// Zoho item ids for a set of variants (absent entries were never
    /// mirrored, or their mirror failed).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn zoho_item_ids(
        &self,
        variants: &[VariantId],
    ) -> Result<std::collections::HashMap<VariantId, String>, RepositoryError> {
        if variants.is_empty() {
            return Ok(std::collections::HashMap::new());
        }

        let ids: Vec<uuid::Uuid> = variants.iter().map(|id| id.as_uuid()).collect();
        let rows = sqlx::query_as::<_, (VariantId, String)>(
            r"
            SELECT id, zoho_item_id
            FROM products
            WHERE id = ANY($1) AND zoho_item_id IS NOT NULL
            ",
        )
        .bind(&ids)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().collect())
    }
}
