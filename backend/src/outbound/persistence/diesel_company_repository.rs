//! PostgreSQL-backed `CompanyRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::company::{Company, CompanyUpdate, NewCompany};
use crate::domain::ids::CompanyId;
use crate::domain::ports::{CompanyRepository, CompanyRepositoryError};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{CompanyChanges, CompanyRow, NewCompanyRow};
use super::pool::{DbPool, PoolError};
use super::schema::companies;

/// Diesel-backed implementation of the `CompanyRepository` port.
#[derive(Clone)]
pub struct DieselCompanyRepository {
    pool: DbPool,
}

impl DieselCompanyRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> CompanyRepositoryError {
    map_pool_error(error, CompanyRepositoryError::connection)
}

fn map_diesel(error: diesel::result::Error) -> CompanyRepositoryError {
    map_diesel_error(
        error,
        CompanyRepositoryError::query,
        CompanyRepositoryError::connection,
    )
}

#[async_trait]
impl CompanyRepository for DieselCompanyRepository {
    async fn list(&self) -> Result<Vec<Company>, CompanyRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<CompanyRow> = companies::table
            .order(companies::name.asc())
            .select(CompanyRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(rows.into_iter().map(CompanyRow::into_domain).collect())
    }

    async fn find(&self, id: CompanyId) -> Result<Option<Company>, CompanyRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row: Option<CompanyRow> = companies::table
            .filter(companies::id.eq(id.as_uuid()))
            .select(CompanyRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        Ok(row.map(CompanyRow::into_domain))
    }

    async fn insert(&self, company: NewCompany) -> Result<Company, CompanyRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let new_row = NewCompanyRow {
            id: Uuid::new_v4(),
            name: company.name,
            description: company.description,
            logo: company.logo,
            website: company.website,
            location: company.location,
        };

        let row: CompanyRow = diesel::insert_into(companies::table)
            .values(&new_row)
            .returning(CompanyRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(row.into_domain())
    }

    async fn update(
        &self,
        id: CompanyId,
        update: CompanyUpdate,
    ) -> Result<Option<Company>, CompanyRepositoryError> {
        // An empty changeset is a Diesel error, not a no-op.
        if update == CompanyUpdate::default() {
            return self.find(id).await;
        }

        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row: Option<CompanyRow> = diesel::update(companies::table)
            .filter(companies::id.eq(id.as_uuid()))
            .set(CompanyChanges {
                name: update.name,
                description: update.description,
                logo: update.logo,
                website: update.website,
                location: update.location,
            })
            .returning(CompanyRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        Ok(row.map(CompanyRow::into_domain))
    }

    async fn delete(&self, id: CompanyId) -> Result<bool, CompanyRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let deleted = diesel::delete(companies::table.filter(companies::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(deleted > 0)
    }
}
