//! Zoho Inventory client.
//!
//! Mirrors locally created product variants and placed orders into Zoho
//! Inventory. Every call here is best-effort from the caller's point of
//! view: the primary workflow spawns the mirror task, logs failures, and
//! never blocks on or rolls back for them.

mod auth;
mod client;
mod types;

pub use auth::ZohoToken;
pub use client::ZohoClient;
pub use types::{CreatedItem, SalesOrderInput, SalesOrderLine, shipment_window};

use thiserror::Error;

/// Errors from the Zoho Inventory API.
#[derive(Debug, Error)]
pub enum ZohoError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Token exchange was rejected.
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// A customer contact could neither be created nor found.
    #[error("failed to create or find customer in Zoho")]
    CustomerUnresolved,
}
