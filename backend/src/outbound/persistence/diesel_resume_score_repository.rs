//! PostgreSQL-backed `ResumeScoreRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ids::StudentId;
use crate::domain::ports::{ResumeScoreRepository, ResumeScoreRepositoryError};
use crate::domain::resume_score::{NewResumeScore, ResumeScore};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewResumeScoreRow, ResumeScoreRow};
use super::pool::{DbPool, PoolError};
use super::schema::resume_scores;

/// Diesel-backed implementation of the `ResumeScoreRepository` port.
#[derive(Clone)]
pub struct DieselResumeScoreRepository {
    pool: DbPool,
}

impl DieselResumeScoreRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> ResumeScoreRepositoryError {
    map_pool_error(error, ResumeScoreRepositoryError::connection)
}

fn map_diesel(error: diesel::result::Error) -> ResumeScoreRepositoryError {
    map_diesel_error(
        error,
        ResumeScoreRepositoryError::query,
        ResumeScoreRepositoryError::connection,
    )
}

#[async_trait]
impl ResumeScoreRepository for DieselResumeScoreRepository {
    async fn insert(
        &self,
        score: NewResumeScore,
    ) -> Result<ResumeScore, ResumeScoreRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let new_row = NewResumeScoreRow {
            id: Uuid::new_v4(),
            student_id: score.student_id.as_uuid(),
            ats_score: score.ats_score,
            technical_score: score.technical_score,
            communication_score: score.communication_score,
            experience_score: score.experience_score,
            skills_score: score.skills_score,
            overall_score: score.overall_score,
            feedback: score.feedback,
        };

        let row: ResumeScoreRow = diesel::insert_into(resume_scores::table)
            .values(&new_row)
            .returning(ResumeScoreRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(row.into_domain())
    }

    async fn find_latest(
        &self,
        student_id: StudentId,
    ) -> Result<Option<ResumeScore>, ResumeScoreRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row: Option<ResumeScoreRow> = resume_scores::table
            .filter(resume_scores::student_id.eq(student_id.as_uuid()))
            .order(resume_scores::created_at.desc())
            .select(ResumeScoreRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        Ok(row.map(ResumeScoreRow::into_domain))
    }
}
