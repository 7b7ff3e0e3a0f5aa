//! Gallery route handlers.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::db::gallery::GalleryRepository;
use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::Artwork;
use crate::state::AppState;

/// The public gallery: all approved artwork, newest first.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Artwork>>> {
    let artworks = GalleryRepository::new(state.pool()).approved().await?;
    Ok(Json(artworks))
}

/// The caller's approved artwork: the pieces eligible for competition entry.
#[instrument(skip(state))]
pub async fn mine(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<Artwork>>> {
    let artworks = GalleryRepository::new(state.pool())
        .approved_for_user(user.id)
        .await?;
    Ok(Json(artworks))
}
