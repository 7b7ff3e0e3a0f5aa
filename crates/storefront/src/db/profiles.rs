//! Profile repository.
//!
//! Profiles mirror identities issued upstream; the storefront only ever
//! find-or-creates by email and reads by id.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use charted_art_core::{Email, UserId};

use super::RepositoryError;
use crate::models::Profile;

#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    id: UserId,
    email: String,
    full_name: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = RepositoryError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            email,
            full_name: row.full_name,
            created_at: row.created_at,
        })
    }
}

/// Repository for profile database operations.
pub struct ProfileRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProfileRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a profile by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: UserId) -> Result<Option<Profile>, RepositoryError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            "SELECT id, email, full_name, created_at FROM profiles WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Find a profile by email, creating one if absent.
    ///
    /// The upsert is keyed on the unique email column, so two concurrent
    /// calls converge on one row; a conflicting insert falls back to the
    /// surviving row rather than failing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_or_create(&self, email: &Email) -> Result<Profile, RepositoryError> {
        let inserted = sqlx::query_as::<_, ProfileRow>(
            r"
            INSERT INTO profiles (email)
            VALUES ($1)
            ON CONFLICT (email) DO NOTHING
            RETURNING id, email, full_name, created_at
            ",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        if let Some(row) = inserted {
            return row.try_into();
        }

        let row = sqlx::query_as::<_, ProfileRow>(
            "SELECT id, email, full_name, created_at FROM profiles WHERE email = $1",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }
}
