//! Admin order handlers: list everything, move statuses.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use tracing::instrument;

use charted_art_core::{OrderId, OrderStatus};

use crate::db::RepositoryError;
use crate::db::orders::OrderRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::AdminOrder;
use crate::state::AppState;

/// Status-change request body.
#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: String,
}

/// All orders with line items and customer profiles, newest first.
#[instrument(skip(_admin, state))]
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<AdminOrder>>> {
    let orders = OrderRepository::new(state.pool()).list_all().await?;
    Ok(Json(orders))
}

/// Move an order to a new status.
///
/// Any status may follow any other; the only validation is that the
/// value is drawn from the enumeration. `updated_at` is stamped.
#[instrument(skip(_admin, state))]
pub async fn set_status(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(body): Json<SetStatusRequest>,
) -> Result<()> {
    let status: OrderStatus = body
        .status
        .parse()
        .map_err(|e: String| AppError::Validation(e))?;

    OrderRepository::new(state.pool())
        .set_status(id, status)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound("order".to_string()),
            other => AppError::Database(other),
        })?;

    Ok(())
}
