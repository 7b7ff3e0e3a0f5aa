//! Session establishment and teardown.
//!
//! Identity verification itself (sign-up, OAuth, password reset) is the
//! hosted identity platform's job; this route trusts the verified email it
//! hands over and binds it to a local profile and session.

use axum::{Json, extract::State};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use charted_art_core::Email;

use crate::db::profiles::ProfileRepository;
use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::auth::{clear_current_user, set_current_user};
use crate::middleware::OptionalAuth;
use crate::models::CurrentUser;
use crate::state::AppState;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
}

/// Establish a session for a verified identity.
#[instrument(skip(state, session))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<LoginRequest>,
) -> Result<Json<CurrentUser>> {
    let email = Email::parse(&body.email).map_err(|e| AppError::Validation(e.to_string()))?;

    let profile = ProfileRepository::new(state.pool())
        .find_or_create(&email)
        .await?;

    let user = CurrentUser {
        id: profile.id,
        email: profile.email,
    };
    set_current_user(&session, &user).await?;
    set_sentry_user(&user.id, Some(user.email.as_str()));

    Ok(Json(user))
}

/// Tear down the session.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<()> {
    clear_current_user(&session).await?;
    clear_sentry_user();
    Ok(())
}

/// The current session's identity, if any.
#[instrument(skip_all)]
pub async fn me(OptionalAuth(user): OptionalAuth) -> Json<Option<CurrentUser>> {
    Json(user)
}
