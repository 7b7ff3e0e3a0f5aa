//! Database operations for the storefront.
//!
//! # Tables
//!
//! - `profiles` - Local record of users issued by the upstream identity platform
//! - `products` - Print-kit variants, one per (size, frame) pair
//! - `carts` / `cart_items` - One cart per user, append-only line items
//! - `orders` / `order_items` - Placed orders with denormalized snapshots
//! - `gallery_submissions` - User artwork, moderated via `is_approved`
//! - `competitions` / `competition_submissions` / `votes`
//! - `initiatives` / `events` / `event_rsvps` / `collage_submissions`
//!
//! All repositories use runtime-checked queries (`query_as` + `FromRow`);
//! every uniqueness invariant lives in the schema (see `migrations/`) and
//! surfaces here as [`RepositoryError::Conflict`].
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p charted-art-cli -- migrate
//! ```

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub mod carts;
pub mod competitions;
pub mod events;
pub mod gallery;
pub mod initiatives;
pub mod orders;
pub mod profiles;
pub mod variants;

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Unique-constraint violation (duplicate vote, entry, ...).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl RepositoryError {
    /// Translate a sqlx error, turning unique violations into [`Self::Conflict`].
    pub(crate) fn from_insert(e: sqlx::Error, conflict_msg: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.is_unique_violation()
        {
            return Self::Conflict(conflict_msg.to_owned());
        }
        Self::Database(e)
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Embedded schema migrations.
#[must_use]
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}
