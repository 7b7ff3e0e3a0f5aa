//! Event and RSVP repositories.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use charted_art_core::{EventId, InitiativeId, RsvpId, RsvpStatus, UserId};

use super::RepositoryError;
use crate::models::{Event, Rsvp};

#[derive(Debug, sqlx::FromRow)]
struct EventRow {
    id: EventId,
    title: String,
    description: Option<String>,
    location_name: Option<String>,
    location_address: Option<String>,
    event_date: DateTime<Utc>,
    initiative_id: Option<InitiativeId>,
    created_at: DateTime<Utc>,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            location_name: row.location_name,
            location_address: row.location_address,
            event_date: row.event_date,
            initiative_id: row.initiative_id,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct RsvpRow {
    id: RsvpId,
    event_id: EventId,
    user_id: UserId,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<RsvpRow> for Rsvp {
    type Error = RepositoryError;

    fn try_from(row: RsvpRow) -> Result<Self, Self::Error> {
        let status: RsvpStatus = row
            .status
            .parse()
            .map_err(RepositoryError::DataCorruption)?;

        Ok(Self {
            id: row.id,
            event_id: row.event_id,
            user_id: row.user_id,
            status,
            created_at: row.created_at,
        })
    }
}

/// Repository for community events.
pub struct EventRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> EventRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Approved events on or after `now`, soonest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn upcoming(&self, now: DateTime<Utc>) -> Result<Vec<Event>, RepositoryError> {
        let rows = sqlx::query_as::<_, EventRow>(
            r"
            SELECT id, title, description, location_name, location_address,
                   event_date, initiative_id, created_at
            FROM events
            WHERE is_approved = true AND event_date >= $1
            ORDER BY event_date
            ",
        )
        .bind(now)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Fetch one event.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: EventId) -> Result<Option<Event>, RepositoryError> {
        let row = sqlx::query_as::<_, EventRow>(
            r"
            SELECT id, title, description, location_name, location_address,
                   event_date, initiative_id, created_at
            FROM events
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Number of attending RSVPs for an event (count-only query).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn attending_count(&self, event: EventId) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*)::BIGINT
            FROM event_rsvps
            WHERE event_id = $1 AND status = 'attending'
            ",
        )
        .bind(event)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }
}

/// Repository for event RSVPs.
pub struct RsvpRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RsvpRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// The user's RSVP for an event, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find(
        &self,
        event: EventId,
        user: UserId,
    ) -> Result<Option<Rsvp>, RepositoryError> {
        let row = sqlx::query_as::<_, RsvpRow>(
            r"
            SELECT id, event_id, user_id, status, created_at
            FROM event_rsvps
            WHERE event_id = $1 AND user_id = $2
            ",
        )
        .bind(event)
        .bind(user)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Record the user's RSVP, updating the status in place if one exists.
    ///
    /// The upsert on the unique (event, user) pair keeps the at-most-one
    /// invariant under concurrent calls.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn set_status(
        &self,
        event: EventId,
        user: UserId,
        status: RsvpStatus,
    ) -> Result<Rsvp, RepositoryError> {
        let row = sqlx::query_as::<_, RsvpRow>(
            r"
            INSERT INTO event_rsvps (event_id, user_id, status)
            VALUES ($1, $2, $3)
            ON CONFLICT (event_id, user_id) DO UPDATE SET status = EXCLUDED.status
            RETURNING id, event_id, user_id, status, created_at
            ",
        )
        .bind(event)
        .bind(user)
        .bind(status.to_string())
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }
}
