//! Competition, entry, and voting route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use charted_art_core::{ArtworkId, CompetitionId, CompetitionPhase, EntryId};

use crate::db::RepositoryError;
use crate::db::competitions::{CompetitionRepository, EntryRepository, VoteRepository};
use crate::db::gallery::GalleryRepository;
use crate::error::{AppError, Result};
use crate::middleware::{OptionalAuth, RequireAuth};
use crate::models::{Competition, Entry};
use crate::state::AppState;

/// A competition with its derived phase.
#[derive(Debug, Serialize)]
pub struct CompetitionView {
    #[serde(flatten)]
    pub competition: Competition,
    pub phase: CompetitionPhase,
}

/// Competition detail: the competition plus its entries.
#[derive(Debug, Serialize)]
pub struct CompetitionDetail {
    #[serde(flatten)]
    pub competition: CompetitionView,
    pub entries: Vec<Entry>,
}

/// Enter-competition request body.
#[derive(Debug, Deserialize)]
pub struct SubmitEntryRequest {
    pub artwork_id: ArtworkId,
}

/// Vote response: the optimistic projection after a successful vote.
#[derive(Debug, Serialize)]
pub struct VoteResponse {
    pub vote_count: i64,
    pub has_voted: bool,
}

/// Promote a store conflict to its user-facing domain error.
fn domain_error(e: RepositoryError) -> AppError {
    match e {
        RepositoryError::Conflict(message) => AppError::Conflict(message),
        other => AppError::Database(other),
    }
}

/// All competitions, newest window first, with derived phases.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<CompetitionView>>> {
    let now = Utc::now();
    let competitions = CompetitionRepository::new(state.pool()).list().await?;

    Ok(Json(
        competitions
            .into_iter()
            .map(|competition| CompetitionView {
                phase: competition.phase(now),
                competition,
            })
            .collect(),
    ))
}

/// One competition with its entries; vote flags reflect the caller.
#[instrument(skip(state))]
pub async fn detail(
    State(state): State<AppState>,
    OptionalAuth(viewer): OptionalAuth,
    Path(id): Path<CompetitionId>,
) -> Result<Json<CompetitionDetail>> {
    let competition = CompetitionRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("competition".to_string()))?;

    let entries = EntryRepository::new(state.pool())
        .list_for_competition(id, viewer.map(|u| u.id))
        .await?;

    Ok(Json(CompetitionDetail {
        competition: CompetitionView {
            phase: competition.phase(Utc::now()),
            competition,
        },
        entries,
    }))
}

/// Enter one of the caller's approved artworks into a competition.
///
/// Idempotent per (competition, artwork): a repeat attempt surfaces as
/// a conflict with a domain message, not a raw constraint error.
#[instrument(skip(state))]
pub async fn submit(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<CompetitionId>,
    Json(body): Json<SubmitEntryRequest>,
) -> Result<Json<EntryId>> {
    let competitions = CompetitionRepository::new(state.pool());
    if competitions.get(id).await?.is_none() {
        return Err(AppError::NotFound("competition".to_string()));
    }

    let artwork = GalleryRepository::new(state.pool())
        .get(body.artwork_id)
        .await?
        .ok_or_else(|| AppError::NotFound("artwork".to_string()))?;
    if artwork.user_id != user.id {
        return Err(AppError::Unauthorized(
            "you can only enter your own artwork".to_string(),
        ));
    }
    if !artwork.is_approved {
        return Err(AppError::Validation(
            "artwork must be approved before entering a competition".to_string(),
        ));
    }

    let entry = EntryRepository::new(state.pool())
        .submit(id, body.artwork_id, user.id)
        .await
        .map_err(domain_error)?;

    Ok(Json(entry))
}

/// Cast the caller's vote for an entry.
///
/// On success the response carries the optimistic projection: the count
/// observed before the vote plus exactly one, and the flipped flag. It is
/// not re-read from the store; the next full fetch reconciles.
#[instrument(skip(state))]
pub async fn vote(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<EntryId>,
) -> Result<Json<VoteResponse>> {
    let entries = EntryRepository::new(state.pool());
    let before = entries.vote_count(id).await?;

    VoteRepository::new(state.pool())
        .cast(user.id, id)
        .await
        .map_err(domain_error)?;

    Ok(Json(VoteResponse {
        vote_count: before + 1,
        has_voted: true,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::competitions::{ALREADY_SUBMITTED, ALREADY_VOTED};

    #[test]
    fn test_conflicts_become_domain_errors() {
        let err = domain_error(RepositoryError::Conflict(ALREADY_VOTED.to_string()));
        assert!(matches!(
            err,
            AppError::Conflict(ref msg) if msg == "You have already voted for this submission"
        ));

        let err = domain_error(RepositoryError::Conflict(ALREADY_SUBMITTED.to_string()));
        assert!(matches!(
            err,
            AppError::Conflict(ref msg)
                if msg == "This artwork has already been submitted to this competition"
        ));
    }

    #[test]
    fn test_other_store_errors_stay_generic() {
        let err = domain_error(RepositoryError::NotFound);
        assert!(matches!(err, AppError::Database(RepositoryError::NotFound)));
    }
}
