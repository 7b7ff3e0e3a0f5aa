//! HTTP route handlers for the admin service.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health              - Liveness check
//! GET  /orders              - All orders with items and profiles (admin only)
//! POST /orders/{id}/status  - Move an order's status (admin only)
//! ```

pub mod orders;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create all routes for the admin service.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(orders::list))
        .route("/orders/{id}/status", post(orders::set_status))
}
