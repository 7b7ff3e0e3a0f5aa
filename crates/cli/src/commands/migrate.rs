//! Database migration command.
//!
//! The schema (including every uniqueness constraint the workflows rely
//! on) lives in `crates/storefront/migrations/`; both services share the
//! one database, so there is a single migration set.

use super::CommandError;

/// Run the schema migrations.
///
/// # Errors
///
/// Returns `CommandError` when the database is unreachable or a
/// migration fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = super::connect().await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../storefront/migrations").run(&pool).await?;

    tracing::info!("Migrations complete");
    Ok(())
}
