//! Event and RSVP route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use futures::{StreamExt, stream};
use serde::Deserialize;
use tracing::instrument;

use charted_art_core::{EventId, RsvpStatus};

use crate::db::events::{EventRepository, RsvpRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::{EventWithAttendance, Rsvp};
use crate::state::AppState;

/// How many attendance-count lookups run at once.
const COUNT_CONCURRENCY: usize = 4;

/// RSVP request body.
#[derive(Debug, Deserialize)]
pub struct RsvpRequest {
    pub status: RsvpStatus,
}

/// Approved upcoming events, soonest first, with attendance counts.
///
/// The per-event counts are independent lookups and run with bounded
/// concurrency; a failed count degrades to 0 rather than failing the list.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<EventWithAttendance>>> {
    let events = EventRepository::new(state.pool()).upcoming(Utc::now()).await?;

    let with_counts = stream::iter(events)
        .map(|event| {
            let state = state.clone();
            async move {
                let attending_count = EventRepository::new(state.pool())
                    .attending_count(event.id)
                    .await
                    .unwrap_or_else(|e| {
                        tracing::warn!("failed to count RSVPs for event {}: {e}", event.id);
                        0
                    });
                EventWithAttendance {
                    event,
                    attending_count,
                }
            }
        })
        .buffered(COUNT_CONCURRENCY)
        .collect::<Vec<_>>()
        .await;

    Ok(Json(with_counts))
}

/// Record or change the caller's RSVP for an event.
#[instrument(skip(state))]
pub async fn rsvp(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<EventId>,
    Json(body): Json<RsvpRequest>,
) -> Result<Json<Rsvp>> {
    if EventRepository::new(state.pool()).get(id).await?.is_none() {
        return Err(AppError::NotFound("event".to_string()));
    }

    let rsvp = RsvpRepository::new(state.pool())
        .set_status(id, user.id, body.status)
        .await?;

    Ok(Json(rsvp))
}
