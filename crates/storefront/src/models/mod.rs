//! Domain models held in memory by the storefront.
//!
//! Every struct here is a disposable projection of store-resident rows;
//! the database is always the source of truth.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use charted_art_core::{
    ArtworkId, CartId, CartItemId, CompetitionId, CompetitionPhase, ContributionId, Email, EntryId,
    EventId, InitiativeId, OrderId, OrderItemId, RsvpId, RsvpStatus, UserId, VariantId,
    competition_phase,
};

/// Session storage keys.
pub mod session_keys {
    /// Key for the current authenticated user.
    pub const CURRENT_USER: &str = "current_user";
}

/// The authenticated identity stored in the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub email: Email,
}

/// A customer profile.
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub id: UserId,
    pub email: Email,
    pub full_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A print-kit product variant: one (size, frame) configuration.
#[derive(Debug, Clone, Serialize)]
pub struct Variant {
    pub id: VariantId,
    pub size: String,
    pub frame_type: String,
    pub base_price: Decimal,
    /// The mirrored Zoho item, once the mirror has landed.
    pub zoho_item_id: Option<String>,
}

/// A user's cart line.
#[derive(Debug, Clone, Serialize)]
pub struct CartItem {
    pub id: CartItemId,
    pub cart_id: CartId,
    pub product_id: VariantId,
    pub image_url: Option<String>,
    pub price: Decimal,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

/// A placed order.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub status: charted_art_core::OrderStatus,
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub items: Vec<OrderItem>,
}

/// Shipping destination captured at checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

/// A denormalized order line.
#[derive(Debug, Clone, Serialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub product_id: VariantId,
    pub size: String,
    pub frame_type: String,
    pub image_url: Option<String>,
    pub quantity: i32,
    pub price: Decimal,
}

/// A competition with its window and active flag.
#[derive(Debug, Clone, Serialize)]
pub struct Competition {
    pub id: CompetitionId,
    pub title: String,
    pub description: Option<String>,
    pub theme: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub prize_details: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Competition {
    /// The competition's phase at `now` (pure; never stored).
    #[must_use]
    pub fn phase(&self, now: DateTime<Utc>) -> CompetitionPhase {
        competition_phase(now, self.start_date, self.end_date, self.is_active)
    }
}

/// A gallery artwork.
#[derive(Debug, Clone, Serialize)]
pub struct Artwork {
    pub id: ArtworkId,
    pub user_id: UserId,
    pub image_url: String,
    pub description: Option<String>,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
}

/// A competition entry together with its read-side projections: the entered
/// artwork, the running vote count, and whether the calling user voted.
#[derive(Debug, Clone, Serialize)]
pub struct Entry {
    pub id: EntryId,
    pub competition_id: CompetitionId,
    pub artwork_id: ArtworkId,
    pub user_id: UserId,
    pub image_url: String,
    pub description: Option<String>,
    pub vote_count: i64,
    pub has_voted: bool,
    pub created_at: DateTime<Utc>,
}

/// A community initiative summary.
#[derive(Debug, Clone, Serialize)]
pub struct Initiative {
    pub id: InitiativeId,
    pub title: String,
    pub description: String,
    pub organizer_name: Option<String>,
    pub related_event_id: Option<EventId>,
    pub status: String,
    pub contribution_count: i64,
    pub created_at: DateTime<Utc>,
}

/// A community event.
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: Option<String>,
    pub location_name: Option<String>,
    pub location_address: Option<String>,
    pub event_date: DateTime<Utc>,
    pub initiative_id: Option<InitiativeId>,
    pub created_at: DateTime<Utc>,
}

/// An event together with how many people are attending.
#[derive(Debug, Clone, Serialize)]
pub struct EventWithAttendance {
    #[serde(flatten)]
    pub event: Event,
    pub attending_count: i64,
}

/// A user's RSVP to an event.
#[derive(Debug, Clone, Serialize)]
pub struct Rsvp {
    pub id: RsvpId,
    pub event_id: EventId,
    pub user_id: UserId,
    pub status: RsvpStatus,
    pub created_at: DateTime<Utc>,
}

/// An approved collage contribution to an initiative.
#[derive(Debug, Clone, Serialize)]
pub struct Contribution {
    pub id: ContributionId,
    pub initiative_id: InitiativeId,
    pub contributor_name: Option<String>,
    pub image_url: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}
