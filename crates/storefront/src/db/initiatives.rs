//! Initiative and collage-contribution repositories.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use charted_art_core::{ContributionId, EventId, InitiativeId};

use super::RepositoryError;
use crate::models::{Contribution, Initiative};

#[derive(Debug, sqlx::FromRow)]
struct InitiativeRow {
    id: InitiativeId,
    title: String,
    description: String,
    organizer_name: Option<String>,
    related_event_id: Option<EventId>,
    status: String,
    contribution_count: i64,
    created_at: DateTime<Utc>,
}

impl From<InitiativeRow> for Initiative {
    fn from(row: InitiativeRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            organizer_name: row.organizer_name,
            related_event_id: row.related_event_id,
            status: row.status,
            contribution_count: row.contribution_count,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ContributionRow {
    id: ContributionId,
    initiative_id: InitiativeId,
    contributor_name: Option<String>,
    image_url: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<ContributionRow> for Contribution {
    fn from(row: ContributionRow) -> Self {
        Self {
            id: row.id,
            initiative_id: row.initiative_id,
            contributor_name: row.contributor_name,
            image_url: row.image_url,
            description: row.description,
            created_at: row.created_at,
        }
    }
}

/// Repository for community initiatives.
pub struct InitiativeRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> InitiativeRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Active initiatives, newest first, each with its organizer's name and
    /// a count of approved contributions.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_active(&self) -> Result<Vec<Initiative>, RepositoryError> {
        let rows = sqlx::query_as::<_, InitiativeRow>(
            r"
            SELECT i.id, i.title, i.description, p.full_name AS organizer_name,
                   i.related_event_id, i.status,
                   (SELECT COUNT(*) FROM collage_submissions cs
                    WHERE cs.initiative_id = i.id AND cs.is_approved = true) AS contribution_count,
                   i.created_at
            FROM initiatives i
            JOIN profiles p ON p.id = i.organizer_id
            WHERE i.status = 'active'
            ORDER BY i.created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Fetch one initiative with its projections.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: InitiativeId) -> Result<Option<Initiative>, RepositoryError> {
        let row = sqlx::query_as::<_, InitiativeRow>(
            r"
            SELECT i.id, i.title, i.description, p.full_name AS organizer_name,
                   i.related_event_id, i.status,
                   (SELECT COUNT(*) FROM collage_submissions cs
                    WHERE cs.initiative_id = i.id AND cs.is_approved = true) AS contribution_count,
                   i.created_at
            FROM initiatives i
            JOIN profiles p ON p.id = i.organizer_id
            WHERE i.id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }
}

/// Repository for collage contributions.
pub struct ContributionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ContributionRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Approved contributions to an initiative, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn approved_for_initiative(
        &self,
        initiative: InitiativeId,
    ) -> Result<Vec<Contribution>, RepositoryError> {
        let rows = sqlx::query_as::<_, ContributionRow>(
            r"
            SELECT cs.id, cs.initiative_id, p.full_name AS contributor_name,
                   cs.image_url, cs.description, cs.created_at
            FROM collage_submissions cs
            JOIN profiles p ON p.id = cs.user_id
            WHERE cs.initiative_id = $1 AND cs.is_approved = true
            ORDER BY cs.created_at DESC
            ",
        )
        .bind(initiative)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
