//! PostgreSQL-backed `WorkflowStore` implementation using Diesel.
//!
//! `commit` applies a [`TransitionPlan`] in a single transaction: the
//! guarded application update, the optional drive round widening, the
//! optional student placement effect, and the notification insert. The
//! guard filters on the application's `updated_at`, so a stale plan
//! matches no row and the whole transaction rolls back untouched.

use async_trait::async_trait;
use chrono::Utc;
use diesel::dsl::max;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::application::Application;
use crate::domain::ids::ApplicationId;
use crate::domain::ports::{WorkflowStore, WorkflowStoreError};
use crate::domain::transition::{PlacementEffect, TransitionContext, TransitionPlan};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{
    encode_recipients, ApplicationRow, ApplicationTransitionChanges, DriveRow,
    NewNotificationRow, StudentPlacementChanges, StudentRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{applications, notifications, placement_drives, students};

/// Diesel-backed implementation of the `WorkflowStore` port.
#[derive(Clone)]
pub struct DieselWorkflowStore {
    pool: DbPool,
}

impl DieselWorkflowStore {
    /// Create a new store with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> WorkflowStoreError {
    map_pool_error(error, WorkflowStoreError::connection)
}

fn map_diesel(error: diesel::result::Error) -> WorkflowStoreError {
    map_diesel_error(
        error,
        WorkflowStoreError::query,
        WorkflowStoreError::connection,
    )
}

/// Transaction-internal error: Diesel failures roll back and map at the
/// boundary; store errors (conflict, vanished) pass through as-is.
enum TxError {
    Diesel(diesel::result::Error),
    Store(WorkflowStoreError),
}

impl From<diesel::result::Error> for TxError {
    fn from(error: diesel::result::Error) -> Self {
        Self::Diesel(error)
    }
}

impl TxError {
    fn into_store_error(self) -> WorkflowStoreError {
        match self {
            Self::Diesel(error) => map_diesel(error),
            Self::Store(error) => error,
        }
    }
}

async fn widen_drive_rounds<C>(conn: &mut C, drive_id: Uuid, round: i32) -> Result<(), TxError>
where
    C: AsyncConnection<Backend = diesel::pg::Pg> + Send,
{
    let current: i32 = placement_drives::table
        .filter(placement_drives::id.eq(drive_id))
        .for_update()
        .select(placement_drives::number_of_rounds)
        .first(conn)
        .await?;

    let widened = current.max(round + 1);
    if widened > current {
        diesel::update(placement_drives::table)
            .filter(placement_drives::id.eq(drive_id))
            .set((
                placement_drives::number_of_rounds.eq(widened),
                placement_drives::updated_at.eq(Utc::now()),
            ))
            .execute(conn)
            .await?;
    }
    Ok(())
}

async fn apply_placement_effect<C>(
    conn: &mut C,
    student_id: Uuid,
    effect: &PlacementEffect,
) -> Result<(), TxError>
where
    C: AsyncConnection<Backend = diesel::pg::Pg> + Send,
{
    let row: StudentRow = students::table
        .filter(students::id.eq(student_id))
        .for_update()
        .select(StudentRow::as_select())
        .first(conn)
        .await?;

    let mut student = row.into_domain();
    match effect {
        PlacementEffect::Grant { company_name } => student.record_selection(company_name),
        PlacementEffect::Revoke { company_name } => student.revoke_selection(company_name),
    }

    diesel::update(students::table)
        .filter(students::id.eq(student_id))
        .set(StudentPlacementChanges {
            is_placed: student.is_placed,
            placed_companies: student.placed_companies,
            selected_count: student.selected_count,
            updated_at: Utc::now(),
        })
        .execute(conn)
        .await?;

    Ok(())
}

#[async_trait]
impl WorkflowStore for DieselWorkflowStore {
    async fn load_context(
        &self,
        id: ApplicationId,
    ) -> Result<Option<TransitionContext>, WorkflowStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let application: Option<ApplicationRow> = applications::table
            .filter(applications::id.eq(id.as_uuid()))
            .select(ApplicationRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        let Some(application) = application else {
            return Ok(None);
        };

        let drive: DriveRow = placement_drives::table
            .filter(placement_drives::id.eq(application.drive_id))
            .select(DriveRow::as_select())
            .first(&mut conn)
            .await
            .map_err(map_diesel)?;

        let student: StudentRow = students::table
            .filter(students::id.eq(application.student_id))
            .select(StudentRow::as_select())
            .first(&mut conn)
            .await
            .map_err(map_diesel)?;

        let drive_max_round: Option<i32> = applications::table
            .filter(applications::drive_id.eq(application.drive_id))
            .select(max(applications::current_round))
            .first(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(Some(TransitionContext {
            application: application.into_domain(),
            drive: drive.into_domain(),
            student: student.into_domain(),
            drive_max_round: drive_max_round.unwrap_or(0),
        }))
    }

    async fn commit(&self, plan: TransitionPlan) -> Result<Application, WorkflowStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let application_uuid = plan.application_id.as_uuid();

        let row = conn
            .transaction::<ApplicationRow, TxError, _>(|conn| {
                async move {
                    let changes = ApplicationTransitionChanges {
                        status: plan.status.map(|s| s.as_str().to_owned()),
                        current_round: plan.current_round,
                        next_round_date: plan.next_round_date,
                        is_present: plan.is_present,
                        updated_at: Utc::now(),
                    };

                    let updated: Option<ApplicationRow> = diesel::update(applications::table)
                        .filter(applications::id.eq(application_uuid))
                        .filter(applications::updated_at.eq(plan.expected_updated_at))
                        .set(changes)
                        .returning(ApplicationRow::as_returning())
                        .get_result(conn)
                        .await
                        .optional()?;

                    let Some(updated) = updated else {
                        // Distinguish a stale token from a deleted row.
                        let exists: i64 = applications::table
                            .filter(applications::id.eq(application_uuid))
                            .count()
                            .get_result(conn)
                            .await?;
                        let error = if exists > 0 {
                            WorkflowStoreError::Conflict
                        } else {
                            WorkflowStoreError::Vanished
                        };
                        return Err(TxError::Store(error));
                    };

                    if let Some(widening) = plan.widen_drive_rounds {
                        widen_drive_rounds(conn, widening.drive_id.as_uuid(), widening.round)
                            .await?;
                    }

                    if let Some((student_id, effect)) = &plan.placement {
                        apply_placement_effect(conn, student_id.as_uuid(), effect).await?;
                    }

                    if let Some(draft) = &plan.notification {
                        let (kind, student_ids) = encode_recipients(&draft.recipients);
                        diesel::insert_into(notifications::table)
                            .values(NewNotificationRow {
                                id: Uuid::new_v4(),
                                title: draft.title.clone(),
                                message: draft.message.clone(),
                                recipient_kind: kind.to_owned(),
                                recipient_student_ids: student_ids,
                            })
                            .execute(conn)
                            .await?;
                    }

                    Ok(updated)
                }
                .scope_boxed()
            })
            .await
            .map_err(TxError::into_store_error)?;

        Ok(row.into_domain())
    }
}
