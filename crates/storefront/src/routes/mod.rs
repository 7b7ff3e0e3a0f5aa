//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check (verifies database)
//!
//! # Auth (session establishment; identity verification is upstream)
//! POST /auth/login              - Bind a verified email to a session
//! POST /auth/logout             - Tear down the session
//! GET  /auth/me                 - Current session identity
//!
//! # Kit designer
//! POST   /kit/upload            - Upload a photo (multipart; validated locally)
//! DELETE /kit/upload            - Remove an uploaded photo
//! POST   /kit/add-to-cart       - Resolve variant + append cart line
//!
//! # Cart
//! GET  /cart                    - Cart lines
//! GET  /cart/count              - Item count (0 for anonymous callers)
//!
//! # Competitions
//! GET  /competitions            - All competitions with derived phase
//! GET  /competitions/{id}       - Detail with entries, votes, has-voted flags
//! POST /competitions/{id}/entries - Enter an approved artwork
//! POST /entries/{id}/votes      - Cast a vote
//!
//! # Gallery
//! GET  /gallery                 - Approved artwork
//! GET  /gallery/mine            - Caller's approved artwork
//!
//! # Community
//! GET  /initiatives             - Active initiatives
//! GET  /initiatives/{id}        - Detail with contributions and event RSVP data
//! GET  /events                  - Approved upcoming events with attendance
//! POST /events/{id}/rsvp        - Record or change an RSVP
//!
//! # Orders
//! POST /orders                  - Checkout the cart
//! GET  /orders                  - Caller's order history
//!
//! # Static
//! GET  /uploads/*               - Uploaded images (read-only)
//! ```

pub mod auth;
pub mod cart;
pub mod competitions;
pub mod events;
pub mod gallery;
pub mod initiatives;
pub mod kit;
pub mod orders;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::state::AppState;

/// Slack on top of the file limit for multipart framing.
const UPLOAD_BODY_LIMIT: usize = kit::MAX_FILE_BYTES + 64 * 1024;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

/// Create the kit designer routes router.
pub fn kit_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/upload",
            post(kit::upload)
                .delete(kit::remove_upload)
                .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/add-to-cart", post(kit::add_to_cart))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/count", get(cart::count))
}

/// Create the competition routes router.
pub fn competition_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(competitions::list))
        .route("/{id}", get(competitions::detail))
        .route("/{id}/entries", post(competitions::submit))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/kit", kit_routes())
        .nest("/cart", cart_routes())
        .nest("/competitions", competition_routes())
        .route("/entries/{id}/votes", post(competitions::vote))
        .route("/gallery", get(gallery::index))
        .route("/gallery/mine", get(gallery::mine))
        .route("/initiatives", get(initiatives::list))
        .route("/initiatives/{id}", get(initiatives::detail))
        .route("/events", get(events::list))
        .route("/events/{id}/rsvp", post(events::rsvp))
        .route("/orders", post(orders::checkout).get(orders::list))
}
