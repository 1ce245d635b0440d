//! PostgreSQL-backed `StudentRepository` implementation using Diesel.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ids::{StudentId, UserId};
use crate::domain::ports::{StudentRepository, StudentRepositoryError};
use crate::domain::student::{NewStudent, Student, StudentProfileUpdate};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error, unique_violation_constraint};
use super::models::{NewStudentRow, StudentProfileChanges, StudentRow};
use super::pool::{DbPool, PoolError};
use super::schema::students;

/// Diesel-backed implementation of the `StudentRepository` port.
#[derive(Clone)]
pub struct DieselStudentRepository {
    pool: DbPool,
}

impl DieselStudentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> StudentRepositoryError {
    map_pool_error(error, StudentRepositoryError::connection)
}

/// Unique violations name the conflicting field; everything else falls
/// through to the shared mapping.
fn map_diesel(error: diesel::result::Error) -> StudentRepositoryError {
    if let Some(constraint) = unique_violation_constraint(&error) {
        let field = if constraint.contains("email") {
            "email"
        } else if constraint.contains("roll_number") {
            "roll number"
        } else {
            "user"
        };
        return StudentRepositoryError::duplicate(field);
    }
    map_diesel_error(
        error,
        StudentRepositoryError::query,
        StudentRepositoryError::connection,
    )
}

fn profile_changes(update: StudentProfileUpdate) -> StudentProfileChanges {
    StudentProfileChanges {
        name: update.name,
        email: update.email,
        roll_number: update.roll_number,
        mobile_number: update.mobile_number,
        branch: update.branch.map(|b| b.as_str().to_owned()),
        percentage: update.percentage,
        resume: update.resume,
        updated_at: Utc::now(),
    }
}

#[async_trait]
impl StudentRepository for DieselStudentRepository {
    async fn list(&self) -> Result<Vec<Student>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<StudentRow> = students::table
            .order(students::created_at.desc())
            .select(StudentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(rows.into_iter().map(StudentRow::into_domain).collect())
    }

    async fn find(&self, id: StudentId) -> Result<Option<Student>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row: Option<StudentRow> = students::table
            .filter(students::id.eq(id.as_uuid()))
            .select(StudentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        Ok(row.map(StudentRow::into_domain))
    }

    async fn find_by_user(
        &self,
        user_id: UserId,
    ) -> Result<Option<Student>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row: Option<StudentRow> = students::table
            .filter(students::user_id.eq(user_id.as_uuid()))
            .select(StudentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        Ok(row.map(StudentRow::into_domain))
    }

    async fn insert(&self, student: NewStudent) -> Result<Student, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let new_row = NewStudentRow {
            id: Uuid::new_v4(),
            user_id: student.user_id.as_uuid(),
            name: student.name,
            email: student.email,
            roll_number: student.roll_number,
            mobile_number: student.mobile_number,
            branch: student.branch.as_str().to_owned(),
            percentage: student.percentage,
            resume: student.resume,
        };

        let row: StudentRow = diesel::insert_into(students::table)
            .values(&new_row)
            .returning(StudentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(row.into_domain())
    }

    async fn update_profile(
        &self,
        id: StudentId,
        update: StudentProfileUpdate,
    ) -> Result<Option<Student>, StudentRepositoryError> {
        if update == StudentProfileUpdate::default() {
            return self.find(id).await;
        }

        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row: Option<StudentRow> = diesel::update(students::table)
            .filter(students::id.eq(id.as_uuid()))
            .set(profile_changes(update))
            .returning(StudentRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        Ok(row.map(StudentRow::into_domain))
    }

    async fn delete(&self, id: StudentId) -> Result<bool, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let deleted = diesel::delete(students::table.filter(students::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::student::Branch;
    use rstest::rstest;

    #[rstest]
    fn profile_changes_encode_branch_and_bump_updated_at() {
        let changes = profile_changes(StudentProfileUpdate {
            branch: Some(Branch::Ece),
            percentage: Some(74.0),
            ..StudentProfileUpdate::default()
        });

        assert_eq!(changes.branch.as_deref(), Some("ece"));
        assert_eq!(changes.percentage, Some(74.0));
        assert_eq!(changes.name, None);
    }

    struct ConstraintInfo(&'static str);

    impl diesel::result::DatabaseErrorInformation for ConstraintInfo {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            Some("students")
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            Some(self.0)
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    #[rstest]
    #[case("students_email_key", "email")]
    #[case("students_roll_number_key", "roll number")]
    #[case("students_user_id_key", "user")]
    fn unique_violations_name_the_field(#[case] constraint: &'static str, #[case] field: &str) {
        let error = diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            Box::new(ConstraintInfo(constraint)),
        );
        assert_eq!(map_diesel(error), StudentRepositoryError::duplicate(field));
    }
}
