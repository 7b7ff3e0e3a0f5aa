//! Initiative route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::instrument;

use charted_art_core::InitiativeId;

use crate::db::events::{EventRepository, RsvpRepository};
use crate::db::initiatives::{ContributionRepository, InitiativeRepository};
use crate::error::{AppError, Result};
use crate::middleware::OptionalAuth;
use crate::models::{Contribution, Event, Initiative, Rsvp};
use crate::state::AppState;

/// Initiative detail: the initiative, its approved contributions, and the
/// linked assembly event with attendance, if one exists.
#[derive(Debug, Serialize)]
pub struct InitiativeDetail {
    #[serde(flatten)]
    pub initiative: Initiative,
    pub contributions: Vec<Contribution>,
    pub event: Option<Event>,
    pub attending_count: Option<i64>,
    pub my_rsvp: Option<Rsvp>,
}

/// Active initiatives with contribution counts.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Initiative>>> {
    let initiatives = InitiativeRepository::new(state.pool()).list_active().await?;
    Ok(Json(initiatives))
}

/// One initiative with contributions and event attendance.
#[instrument(skip(state))]
pub async fn detail(
    State(state): State<AppState>,
    OptionalAuth(viewer): OptionalAuth,
    Path(id): Path<InitiativeId>,
) -> Result<Json<InitiativeDetail>> {
    let initiative = InitiativeRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("initiative".to_string()))?;

    let contributions = ContributionRepository::new(state.pool())
        .approved_for_initiative(id)
        .await?;

    let mut event = None;
    let mut attending_count = None;
    let mut my_rsvp = None;
    if let Some(event_id) = initiative.related_event_id {
        let events = EventRepository::new(state.pool());
        event = events.get(event_id).await?;
        attending_count = Some(events.attending_count(event_id).await?);
        if let Some(viewer) = viewer {
            my_rsvp = RsvpRepository::new(state.pool())
                .find(event_id, viewer.id)
                .await?;
        }
    }

    Ok(Json(InitiativeDetail {
        initiative,
        contributions,
        event,
        attending_count,
        my_rsvp,
    }))
}
