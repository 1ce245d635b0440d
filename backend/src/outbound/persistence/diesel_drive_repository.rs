//! PostgreSQL-backed `DriveRepository` implementation using Diesel.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::drive::{DriveUpdate, NewDrive, PlacementDrive};
use crate::domain::ids::{CompanyId, DriveId};
use crate::domain::ports::{DriveRepository, DriveRepositoryError};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{encode_branches, DriveChanges, DriveRow, NewDriveRow};
use super::pool::{DbPool, PoolError};
use super::schema::{applications, placement_drives};

/// Diesel-backed implementation of the `DriveRepository` port.
#[derive(Clone)]
pub struct DieselDriveRepository {
    pool: DbPool,
}

impl DieselDriveRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> DriveRepositoryError {
    map_pool_error(error, DriveRepositoryError::connection)
}

fn map_diesel(error: diesel::result::Error) -> DriveRepositoryError {
    map_diesel_error(
        error,
        DriveRepositoryError::query,
        DriveRepositoryError::connection,
    )
}

fn drive_changes(update: DriveUpdate) -> DriveChanges {
    DriveChanges {
        company_name: update.company_name,
        title: update.title,
        description: update.description,
        requirements: update.requirements,
        eligible_branches: update.eligible_branches.map(|b| encode_branches(&b)),
        minimum_percentage: update.minimum_percentage,
        ctc_min: update.ctc_range.map(|r| r.min),
        ctc_max: update.ctc_range.map(|r| r.max),
        number_of_rounds: update.number_of_rounds,
        application_link: update.application_link,
        drive_date: update.drive_date,
        last_date_to_apply: update.last_date_to_apply,
        updated_at: Utc::now(),
    }
}

#[async_trait]
impl DriveRepository for DieselDriveRepository {
    async fn list(&self) -> Result<Vec<PlacementDrive>, DriveRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<DriveRow> = placement_drives::table
            .order(placement_drives::drive_date.asc())
            .select(DriveRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(rows.into_iter().map(DriveRow::into_domain).collect())
    }

    async fn find(&self, id: DriveId) -> Result<Option<PlacementDrive>, DriveRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row: Option<DriveRow> = placement_drives::table
            .filter(placement_drives::id.eq(id.as_uuid()))
            .select(DriveRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        Ok(row.map(DriveRow::into_domain))
    }

    async fn insert(&self, drive: NewDrive) -> Result<PlacementDrive, DriveRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let new_row = NewDriveRow {
            id: Uuid::new_v4(),
            company_id: drive.company_id.as_uuid(),
            company_name: drive.company_name,
            title: drive.title,
            description: drive.description,
            requirements: drive.requirements,
            eligible_branches: encode_branches(&drive.eligible_branches),
            minimum_percentage: drive.minimum_percentage,
            ctc_min: drive.ctc_range.min,
            ctc_max: drive.ctc_range.max,
            number_of_rounds: drive.number_of_rounds,
            application_link: drive.application_link,
            drive_date: drive.drive_date,
            last_date_to_apply: drive.last_date_to_apply,
        };

        let row: DriveRow = diesel::insert_into(placement_drives::table)
            .values(&new_row)
            .returning(DriveRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(row.into_domain())
    }

    async fn update(
        &self,
        id: DriveId,
        update: DriveUpdate,
    ) -> Result<Option<PlacementDrive>, DriveRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row: Option<DriveRow> = diesel::update(placement_drives::table)
            .filter(placement_drives::id.eq(id.as_uuid()))
            .set(drive_changes(update))
            .returning(DriveRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        Ok(row.map(DriveRow::into_domain))
    }

    async fn delete_cascade(&self, id: DriveId) -> Result<bool, DriveRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let drive_uuid = id.as_uuid();

        // Applications are removed explicitly; the linked event goes with
        // the drive through its ON DELETE CASCADE foreign key.
        let deleted = conn
            .transaction::<usize, diesel::result::Error, _>(|conn| {
                async move {
                    diesel::delete(
                        applications::table.filter(applications::drive_id.eq(drive_uuid)),
                    )
                    .execute(conn)
                    .await?;

                    diesel::delete(
                        placement_drives::table.filter(placement_drives::id.eq(drive_uuid)),
                    )
                    .execute(conn)
                    .await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel)?;

        Ok(deleted > 0)
    }

    async fn count_for_company(
        &self,
        company_id: CompanyId,
    ) -> Result<u64, DriveRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let count: i64 = placement_drives::table
            .filter(placement_drives::company_id.eq(company_id.as_uuid()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(count.max(0).unsigned_abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::drive::CtcRange;
    use crate::domain::student::Branch;
    use rstest::rstest;

    #[rstest]
    fn drive_changes_split_the_ctc_range() {
        let changes = drive_changes(DriveUpdate {
            ctc_range: Some(CtcRange { min: 4.5, max: 8.0 }),
            eligible_branches: Some(vec![Branch::It, Branch::Ece]),
            ..DriveUpdate::default()
        });

        assert_eq!(changes.ctc_min, Some(4.5));
        assert_eq!(changes.ctc_max, Some(8.0));
        assert_eq!(
            changes.eligible_branches,
            Some(vec!["it".to_owned(), "ece".to_owned()])
        );
        assert_eq!(changes.title, None);
    }
}
