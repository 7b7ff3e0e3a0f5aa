//! Admin allowlist lookups.

use sqlx::PgPool;

use charted_art_core::UserId;

use super::RepositoryError;

/// Repository for the admin allowlist.
pub struct AdminUserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AdminUserRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Whether the user is on the admin allowlist.
    ///
    /// Checked per request so revocation takes effect immediately.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn is_admin(&self, user: UserId) -> Result<bool, RepositoryError> {
        let found = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*)::BIGINT FROM admin_users WHERE user_id = $1",
        )
        .bind(user)
        .fetch_one(self.pool)
        .await?;

        Ok(found > 0)
    }
}
