//! CLI command implementations.

pub mod admin;
pub mod migrate;

use sqlx::PgPool;
use thiserror::Error;

/// Errors shared by the CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("No profile found for {0}")]
    UnknownUser(String),
}

/// Connect using the elevated credential, falling back to the generic
/// `DATABASE_URL` for local development.
pub(crate) async fn connect() -> Result<PgPool, CommandError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("ADMIN_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| CommandError::MissingEnvVar("ADMIN_DATABASE_URL"))?;

    Ok(PgPool::connect(&database_url).await?)
}
