//! Admin-side models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use charted_art_core::{Email, OrderId, OrderItemId, OrderStatus, UserId, VariantId};

/// Session storage keys (shared with the storefront, which issues the
/// session).
pub mod session_keys {
    /// Key for the current authenticated user.
    pub const CURRENT_USER: &str = "current_user";
}

/// The authenticated identity stored in the session.
///
/// The field layout must stay in step with the storefront's type of the
/// same name; both deserialize the same session entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub email: Email,
}

/// An authenticated user confirmed to be on the admin allowlist.
#[derive(Debug, Clone)]
pub struct CurrentAdmin {
    pub user: CurrentUser,
}

/// The customer profile attached to an order listing.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerProfile {
    pub id: UserId,
    pub email: String,
    pub full_name: Option<String>,
}

/// A denormalized order line as listed for admins.
#[derive(Debug, Clone, Serialize)]
pub struct AdminOrderItem {
    pub id: OrderItemId,
    pub product_id: VariantId,
    pub size: String,
    pub frame_type: String,
    pub image_url: Option<String>,
    pub quantity: i32,
    pub price: Decimal,
}

/// An order with its line items and owning profile.
#[derive(Debug, Clone, Serialize)]
pub struct AdminOrder {
    pub id: OrderId,
    pub status: OrderStatus,
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub customer: CustomerProfile,
    pub items: Vec<AdminOrderItem>,
}
