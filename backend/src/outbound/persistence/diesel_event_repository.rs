//! PostgreSQL-backed `EventRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::event::{Event, EventUpdate, NewEvent};
use crate::domain::ids::{DriveId, EventId};
use crate::domain::ports::{EventRepository, EventRepositoryError};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{EventChanges, EventRow, NewEventRow};
use super::pool::{DbPool, PoolError};
use super::schema::events;

/// Diesel-backed implementation of the `EventRepository` port.
#[derive(Clone)]
pub struct DieselEventRepository {
    pool: DbPool,
}

impl DieselEventRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> EventRepositoryError {
    map_pool_error(error, EventRepositoryError::connection)
}

fn map_diesel(error: diesel::result::Error) -> EventRepositoryError {
    map_diesel_error(
        error,
        EventRepositoryError::query,
        EventRepositoryError::connection,
    )
}

#[async_trait]
impl EventRepository for DieselEventRepository {
    async fn list(&self) -> Result<Vec<Event>, EventRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<EventRow> = events::table
            .order(events::date.asc())
            .select(EventRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(rows.into_iter().map(EventRow::into_domain).collect())
    }

    async fn find(&self, id: EventId) -> Result<Option<Event>, EventRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row: Option<EventRow> = events::table
            .filter(events::id.eq(id.as_uuid()))
            .select(EventRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        Ok(row.map(EventRow::into_domain))
    }

    async fn find_by_drive(
        &self,
        drive_id: DriveId,
    ) -> Result<Option<Event>, EventRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row: Option<EventRow> = events::table
            .filter(events::drive_id.eq(Some(drive_id.as_uuid())))
            .select(EventRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        Ok(row.map(EventRow::into_domain))
    }

    async fn insert(&self, event: NewEvent) -> Result<Event, EventRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let new_row = NewEventRow {
            id: Uuid::new_v4(),
            title: event.title,
            description: event.description,
            date: event.date,
            drive_id: event.drive_id.map(|id| id.as_uuid()),
        };

        let row: EventRow = diesel::insert_into(events::table)
            .values(&new_row)
            .returning(EventRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(row.into_domain())
    }

    async fn update(
        &self,
        id: EventId,
        update: EventUpdate,
    ) -> Result<Option<Event>, EventRepositoryError> {
        // An empty changeset is a Diesel error, not a no-op.
        if update == EventUpdate::default() {
            return self.find(id).await;
        }

        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row: Option<EventRow> = diesel::update(events::table)
            .filter(events::id.eq(id.as_uuid()))
            .set(EventChanges {
                title: update.title,
                description: update.description,
                date: update.date,
            })
            .returning(EventRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        Ok(row.map(EventRow::into_domain))
    }

    async fn delete(&self, id: EventId) -> Result<bool, EventRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let deleted = diesel::delete(events::table.filter(events::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(deleted > 0)
    }
}
