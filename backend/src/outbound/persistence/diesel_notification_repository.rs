//! PostgreSQL-backed `NotificationRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ids::{NotificationId, UserId};
use crate::domain::notification::{Notification, NotificationDraft};
use crate::domain::ports::{NotificationRepository, NotificationRepositoryError};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{encode_recipients, NewNotificationRow, NotificationRow};
use super::pool::{DbPool, PoolError};
use super::schema::notifications;

/// Diesel-backed implementation of the `NotificationRepository` port.
#[derive(Clone)]
pub struct DieselNotificationRepository {
    pool: DbPool,
}

impl DieselNotificationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> NotificationRepositoryError {
    map_pool_error(error, NotificationRepositoryError::connection)
}

fn map_diesel(error: diesel::result::Error) -> NotificationRepositoryError {
    map_diesel_error(
        error,
        NotificationRepositoryError::query,
        NotificationRepositoryError::connection,
    )
}

#[async_trait]
impl NotificationRepository for DieselNotificationRepository {
    async fn list(&self) -> Result<Vec<Notification>, NotificationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<NotificationRow> = notifications::table
            .order(notifications::created_at.desc())
            .select(NotificationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(rows.into_iter().map(NotificationRow::into_domain).collect())
    }

    async fn find(
        &self,
        id: NotificationId,
    ) -> Result<Option<Notification>, NotificationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row: Option<NotificationRow> = notifications::table
            .filter(notifications::id.eq(id.as_uuid()))
            .select(NotificationRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        Ok(row.map(NotificationRow::into_domain))
    }

    async fn insert(
        &self,
        draft: NotificationDraft,
    ) -> Result<Notification, NotificationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let (kind, student_ids) = encode_recipients(&draft.recipients);
        let new_row = NewNotificationRow {
            id: Uuid::new_v4(),
            title: draft.title,
            message: draft.message,
            recipient_kind: kind.to_owned(),
            recipient_student_ids: student_ids,
        };

        let row: NotificationRow = diesel::insert_into(notifications::table)
            .values(&new_row)
            .returning(NotificationRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(row.into_domain())
    }

    async fn mark_read(
        &self,
        id: NotificationId,
        user_id: UserId,
    ) -> Result<Option<Notification>, NotificationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let notification_uuid = id.as_uuid();
        let user_uuid = user_id.as_uuid();

        // Read-modify-write under a row lock so two concurrent readers
        // cannot append the same user twice.
        let row = conn
            .transaction::<Option<NotificationRow>, diesel::result::Error, _>(|conn| {
                async move {
                    let current: Option<NotificationRow> = notifications::table
                        .filter(notifications::id.eq(notification_uuid))
                        .for_update()
                        .select(NotificationRow::as_select())
                        .first(conn)
                        .await
                        .optional()?;

                    let Some(current) = current else {
                        return Ok(None);
                    };

                    if current.read_by.contains(&user_uuid) {
                        return Ok(Some(current));
                    }

                    let mut read_by = current.read_by;
                    read_by.push(user_uuid);

                    let updated: NotificationRow = diesel::update(notifications::table)
                        .filter(notifications::id.eq(notification_uuid))
                        .set(notifications::read_by.eq(read_by))
                        .returning(NotificationRow::as_returning())
                        .get_result(conn)
                        .await?;

                    Ok(Some(updated))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel)?;

        Ok(row.map(NotificationRow::into_domain))
    }

    async fn delete(&self, id: NotificationId) -> Result<bool, NotificationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let deleted =
            diesel::delete(notifications::table.filter(notifications::id.eq(id.as_uuid())))
                .execute(&mut conn)
                .await
                .map_err(map_diesel)?;

        Ok(deleted > 0)
    }
}
