//! Competition, entry, and vote repositories.
//!
//! Uniqueness of entries (one per competition + artwork) and votes (one per
//! user + entry) is enforced by the schema; this module translates the
//! resulting conflicts into the user-facing domain messages.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use charted_art_core::{ArtworkId, CompetitionId, EntryId, UserId};

use super::RepositoryError;
use crate::models::{Competition, Entry};

/// Conflict message for a duplicate competition entry.
pub const ALREADY_SUBMITTED: &str = "This artwork has already been submitted to this competition";

/// Conflict message for a duplicate vote.
pub const ALREADY_VOTED: &str = "You have already voted for this submission";

#[derive(Debug, sqlx::FromRow)]
struct CompetitionRow {
    id: CompetitionId,
    title: String,
    description: Option<String>,
    theme: Option<String>,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    prize_details: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl From<CompetitionRow> for Competition {
    fn from(row: CompetitionRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            theme: row.theme,
            start_date: row.start_date,
            end_date: row.end_date,
            prize_details: row.prize_details,
            is_active: row.is_active,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct EntryRow {
    id: EntryId,
    competition_id: CompetitionId,
    submission_id: ArtworkId,
    user_id: UserId,
    image_url: String,
    description: Option<String>,
    vote_count: i64,
    has_voted: bool,
    created_at: DateTime<Utc>,
}

impl From<EntryRow> for Entry {
    fn from(row: EntryRow) -> Self {
        Self {
            id: row.id,
            competition_id: row.competition_id,
            artwork_id: row.submission_id,
            user_id: row.user_id,
            image_url: row.image_url,
            description: row.description,
            vote_count: row.vote_count,
            has_voted: row.has_voted,
            created_at: row.created_at,
        }
    }
}

/// Repository for competitions.
pub struct CompetitionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CompetitionRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All competitions, newest window first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Competition>, RepositoryError> {
        let rows = sqlx::query_as::<_, CompetitionRow>(
            r"
            SELECT id, title, description, theme, start_date, end_date,
                   prize_details, is_active, created_at
            FROM competitions
            ORDER BY start_date DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Fetch a single competition.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: CompetitionId) -> Result<Option<Competition>, RepositoryError> {
        let row = sqlx::query_as::<_, CompetitionRow>(
            r"
            SELECT id, title, description, theme, start_date, end_date,
                   prize_details, is_active, created_at
            FROM competitions
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }
}

/// Repository for competition entries.
pub struct EntryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> EntryRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Enter an artwork into a competition.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` with [`ALREADY_SUBMITTED`] when
    /// the artwork is already entered, `RepositoryError::Database` otherwise.
    pub async fn submit(
        &self,
        competition: CompetitionId,
        artwork: ArtworkId,
        user: UserId,
    ) -> Result<EntryId, RepositoryError> {
        sqlx::query_scalar::<_, EntryId>(
            r"
            INSERT INTO competition_submissions (competition_id, submission_id, user_id)
            VALUES ($1, $2, $3)
            RETURNING id
            ",
        )
        .bind(competition)
        .bind(artwork)
        .bind(user)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_insert(e, ALREADY_SUBMITTED))
    }

    /// Entries for a competition, each with its vote count and whether
    /// `viewer` has voted for it (`false` throughout for anonymous callers).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_competition(
        &self,
        competition: CompetitionId,
        viewer: Option<UserId>,
    ) -> Result<Vec<Entry>, RepositoryError> {
        let rows = sqlx::query_as::<_, EntryRow>(
            r"
            SELECT cs.id, cs.competition_id, cs.submission_id, cs.user_id,
                   gs.image_url, gs.description,
                   COUNT(v.id) AS vote_count,
                   COALESCE(BOOL_OR(v.user_id = $2), false) AS has_voted,
                   cs.created_at
            FROM competition_submissions cs
            JOIN gallery_submissions gs ON gs.id = cs.submission_id
            LEFT JOIN votes v ON v.submission_id = cs.id
            WHERE cs.competition_id = $1
            GROUP BY cs.id, gs.image_url, gs.description
            ORDER BY cs.created_at
            ",
        )
        .bind(competition)
        .bind(viewer)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Current vote count for one entry.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn vote_count(&self, entry: EntryId) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*)::BIGINT FROM votes WHERE submission_id = $1",
        )
        .bind(entry)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }
}

/// Repository for votes.
pub struct VoteRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> VoteRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Cast the user's vote for an entry.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` with [`ALREADY_VOTED`] when the
    /// user has already voted for this entry, `RepositoryError::Database`
    /// otherwise.
    pub async fn cast(&self, user: UserId, entry: EntryId) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO votes (user_id, submission_id)
            VALUES ($1, $2)
            ",
        )
        .bind(user)
        .bind(entry)
        .execute(self.pool)
        .await
        .map(|_| ())
        .map_err(|e| RepositoryError::from_insert(e, ALREADY_VOTED))
    }
}
