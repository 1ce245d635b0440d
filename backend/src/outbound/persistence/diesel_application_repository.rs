//! PostgreSQL-backed `ApplicationRepository` implementation using Diesel.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::application::{Application, NewApplication};
use crate::domain::ids::{ApplicationId, DriveId, StudentId};
use crate::domain::ports::{ApplicationRepository, ApplicationRepositoryError};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error, unique_violation_constraint};
use super::models::{ApplicationRow, NewApplicationRow};
use super::pool::{DbPool, PoolError};
use super::schema::applications;

/// Diesel-backed implementation of the `ApplicationRepository` port.
#[derive(Clone)]
pub struct DieselApplicationRepository {
    pool: DbPool,
}

impl DieselApplicationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> ApplicationRepositoryError {
    map_pool_error(error, ApplicationRepositoryError::connection)
}

/// The `(student, drive)` unique constraint maps to `AlreadyApplied`; it
/// catches the race two concurrent identical applies can hit after both
/// pass the service's duplicate check.
fn map_diesel(error: diesel::result::Error) -> ApplicationRepositoryError {
    if unique_violation_constraint(&error).is_some() {
        return ApplicationRepositoryError::AlreadyApplied;
    }
    map_diesel_error(
        error,
        ApplicationRepositoryError::query,
        ApplicationRepositoryError::connection,
    )
}

#[async_trait]
impl ApplicationRepository for DieselApplicationRepository {
    async fn list(&self) -> Result<Vec<Application>, ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<ApplicationRow> = applications::table
            .order(applications::created_at.desc())
            .select(ApplicationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(rows.into_iter().map(ApplicationRow::into_domain).collect())
    }

    async fn list_for_student(
        &self,
        student_id: StudentId,
    ) -> Result<Vec<Application>, ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<ApplicationRow> = applications::table
            .filter(applications::student_id.eq(student_id.as_uuid()))
            .order(applications::created_at.desc())
            .select(ApplicationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(rows.into_iter().map(ApplicationRow::into_domain).collect())
    }

    async fn list_for_drive(
        &self,
        drive_id: DriveId,
    ) -> Result<Vec<Application>, ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<ApplicationRow> = applications::table
            .filter(applications::drive_id.eq(drive_id.as_uuid()))
            .order(applications::created_at.desc())
            .select(ApplicationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(rows.into_iter().map(ApplicationRow::into_domain).collect())
    }

    async fn find(
        &self,
        id: ApplicationId,
    ) -> Result<Option<Application>, ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row: Option<ApplicationRow> = applications::table
            .filter(applications::id.eq(id.as_uuid()))
            .select(ApplicationRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        Ok(row.map(ApplicationRow::into_domain))
    }

    async fn find_for_student_and_drive(
        &self,
        student_id: StudentId,
        drive_id: DriveId,
    ) -> Result<Option<Application>, ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row: Option<ApplicationRow> = applications::table
            .filter(applications::student_id.eq(student_id.as_uuid()))
            .filter(applications::drive_id.eq(drive_id.as_uuid()))
            .select(ApplicationRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        Ok(row.map(ApplicationRow::into_domain))
    }

    async fn insert(
        &self,
        application: NewApplication,
    ) -> Result<Application, ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let new_row = NewApplicationRow {
            id: Uuid::new_v4(),
            student_id: application.student_id.as_uuid(),
            drive_id: application.drive_id.as_uuid(),
            resume_url: application.resume_url,
        };

        let row: ApplicationRow = diesel::insert_into(applications::table)
            .values(&new_row)
            .returning(ApplicationRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(row.into_domain())
    }

    async fn update_resume(
        &self,
        id: ApplicationId,
        resume_url: String,
    ) -> Result<Option<Application>, ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row: Option<ApplicationRow> = diesel::update(applications::table)
            .filter(applications::id.eq(id.as_uuid()))
            .set((
                applications::resume_url.eq(Some(resume_url)),
                applications::updated_at.eq(Utc::now()),
            ))
            .returning(ApplicationRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        Ok(row.map(ApplicationRow::into_domain))
    }

    async fn delete(&self, id: ApplicationId) -> Result<bool, ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let deleted =
            diesel::delete(applications::table.filter(applications::id.eq(id.as_uuid())))
                .execute(&mut conn)
                .await
                .map_err(map_diesel)?;

        Ok(deleted > 0)
    }
}
