//! Admin allowlist management commands.

use charted_art_core::UserId;

use super::CommandError;

/// Put the user with this email on the admin allowlist.
///
/// The profile must already exist (admins sign in through the normal
/// flow first).
///
/// # Errors
///
/// Returns `CommandError::UnknownUser` when no profile has this email.
pub async fn grant(email: &str) -> Result<(), CommandError> {
    let pool = super::connect().await?;
    let email = email.trim().to_lowercase();

    let user_id = sqlx::query_scalar::<_, UserId>("SELECT id FROM profiles WHERE email = $1")
        .bind(&email)
        .fetch_optional(&pool)
        .await?
        .ok_or_else(|| CommandError::UnknownUser(email.clone()))?;

    sqlx::query("INSERT INTO admin_users (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
        .bind(user_id)
        .execute(&pool)
        .await?;

    tracing::info!("{email} is now an admin");
    Ok(())
}

/// Take the user with this email off the admin allowlist.
///
/// # Errors
///
/// Returns `CommandError::Database` if a query fails.
pub async fn revoke(email: &str) -> Result<(), CommandError> {
    let pool = super::connect().await?;
    let email = email.trim().to_lowercase();

    let removed = sqlx::query(
        "DELETE FROM admin_users WHERE user_id IN (SELECT id FROM profiles WHERE email = $1)",
    )
    .bind(&email)
    .execute(&pool)
    .await?
    .rows_affected();

    if removed == 0 {
        tracing::warn!("{email} was not an admin");
    } else {
        tracing::info!("{email} is no longer an admin");
    }
    Ok(())
}

/// List allowlisted admins.
///
/// # Errors
///
/// Returns `CommandError::Database` if the query fails.
pub async fn list() -> Result<(), CommandError> {
    let pool = super::connect().await?;

    let admins = sqlx::query_as::<_, (String, chrono::DateTime<chrono::Utc>)>(
        r"
        SELECT p.email, a.created_at
        FROM admin_users a
        JOIN profiles p ON p.id = a.user_id
        ORDER BY a.created_at
        ",
    )
    .fetch_all(&pool)
    .await?;

    if admins.is_empty() {
        tracing::info!("No admins on the allowlist");
    }
    for (email, since) in admins {
        tracing::info!("{email} (admin since {since})");
    }
    Ok(())
}
