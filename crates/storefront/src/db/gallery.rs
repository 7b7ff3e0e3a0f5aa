//! Gallery artwork repository.
//!
//! Artwork rows are moderated out-of-band; only approved pieces are shown
//! publicly or eligible for competition entry.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use charted_art_core::{ArtworkId, UserId};

use super::RepositoryError;
use crate::models::Artwork;

#[derive(Debug, sqlx::FromRow)]
struct ArtworkRow {
    id: ArtworkId,
    user_id: UserId,
    image_url: String,
    description: Option<String>,
    is_approved: bool,
    created_at: DateTime<Utc>,
}

impl From<ArtworkRow> for Artwork {
    fn from(row: ArtworkRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            image_url: row.image_url,
            description: row.description,
            is_approved: row.is_approved,
            created_at: row.created_at,
        }
    }
}

/// Repository for gallery artwork.
pub struct GalleryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> GalleryRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All approved artwork, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn approved(&self) -> Result<Vec<Artwork>, RepositoryError> {
        let rows = sqlx::query_as::<_, ArtworkRow>(
            r"
            SELECT id, user_id, image_url, description, is_approved, created_at
            FROM gallery_submissions
            WHERE is_approved = true
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// The user's approved artwork (their competition-eligible pieces).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn approved_for_user(&self, user: UserId) -> Result<Vec<Artwork>, RepositoryError> {
        let rows = sqlx::query_as::<_, ArtworkRow>(
            r"
            SELECT id, user_id, image_url, description, is_approved, created_at
            FROM gallery_submissions
            WHERE user_id = $1 AND is_approved = true
            ORDER BY created_at DESC
            ",
        )
        .bind(user)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Fetch one artwork.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ArtworkId) -> Result<Option<Artwork>, RepositoryError> {
        let row = sqlx::query_as::<_, ArtworkRow>(
            r"
            SELECT id, user_id, image_url, description, is_approved, created_at
            FROM gallery_submissions
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }
}
