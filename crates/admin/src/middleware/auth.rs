//! Admin authentication extractor.
//!
//! The admin gate is two steps: a session must carry an authenticated
//! user, and that user must be on the `admin_users` allowlist. The
//! allowlist lookup runs on every request (no caching in the session) so
//! a revoked admin is locked out immediately. Non-admins are denied with
//! no data returned.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use crate::db::admin_users::AdminUserRepository;
use crate::error::AppError;
use crate::models::{CurrentAdmin, CurrentUser, session_keys};
use crate::state::AppState;

/// Extractor that requires an allowlisted admin.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdmin(admin): RequireAdmin,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", admin.user.email)
/// }
/// ```
pub struct RequireAdmin(pub CurrentAdmin);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AppError::Unauthorized)?;

        let user: CurrentUser = session
            .get(session_keys::CURRENT_USER)
            .await
            .ok()
            .flatten()
            .ok_or(AppError::Unauthorized)?;

        let is_admin = AdminUserRepository::new(state.pool())
            .is_admin(user.id)
            .await?;
        if !is_admin {
            return Err(AppError::Forbidden);
        }

        Ok(Self(CurrentAdmin { user }))
    }
}
