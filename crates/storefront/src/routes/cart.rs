//! Cart route handlers.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use crate::db::carts::CartRepository;
use crate::error::Result;
use crate::middleware::{OptionalAuth, RequireAuth};
use crate::models::CartItem;
use crate::state::AppState;

/// Cart count badge payload.
#[derive(Debug, Serialize)]
pub struct CartCount {
    pub count: i64,
}

/// The caller's cart lines.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<CartItem>>> {
    let items = CartRepository::new(state.pool())
        .items_for_user(user.id)
        .await?;
    Ok(Json(items))
}

/// The caller's cart item count.
///
/// Anonymous callers get 0 without a store lookup. Authenticated counts
/// come through the reactive cache, which change notifications on cart
/// lines keep fresh.
#[instrument(skip(state))]
pub async fn count(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
) -> Json<CartCount> {
    let count = match user {
        None => 0,
        Some(user) => state.cart_counts().count_for(user.id).await,
    };

    Json(CartCount { count })
}
