//! Port abstraction for application persistence adapters.

use async_trait::async_trait;

use crate::domain::application::{Application, NewApplication};
use crate::domain::error::Error;
use crate::domain::ids::{ApplicationId, DriveId, StudentId};

/// Persistence errors raised by application repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApplicationRepositoryError {
    /// Repository connection could not be established.
    #[error("application repository connection failed: {message}")]
    Connection {
        /// Adapter-level failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("application repository query failed: {message}")]
    Query {
        /// Adapter-level failure description.
        message: String,
    },
    /// The `(student, drive)` uniqueness constraint fired on insert.
    ///
    /// Covers the race where two identical applications pass the service's
    /// duplicate check concurrently; the database constraint wins.
    #[error("student has already applied to this drive")]
    AlreadyApplied,
}

impl ApplicationRepositoryError {
    /// Connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

impl From<ApplicationRepositoryError> for Error {
    fn from(error: ApplicationRepositoryError) -> Self {
        match error {
            ApplicationRepositoryError::AlreadyApplied => {
                Self::conflict("Already applied to this drive")
            }
            ApplicationRepositoryError::Connection { .. } => {
                Self::service_unavailable(error.to_string())
            }
            ApplicationRepositoryError::Query { .. } => Self::internal(error.to_string()),
        }
    }
}

/// Durable storage for applications.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// List all applications.
    async fn list(&self) -> Result<Vec<Application>, ApplicationRepositoryError>;

    /// List a student's applications.
    async fn list_for_student(
        &self,
        student_id: StudentId,
    ) -> Result<Vec<Application>, ApplicationRepositoryError>;

    /// List a drive's applications.
    async fn list_for_drive(
        &self,
        drive_id: DriveId,
    ) -> Result<Vec<Application>, ApplicationRepositoryError>;

    /// Fetch an application by id.
    async fn find(
        &self,
        id: ApplicationId,
    ) -> Result<Option<Application>, ApplicationRepositoryError>;

    /// Fetch the unique application for a `(student, drive)` pair.
    async fn find_for_student_and_drive(
        &self,
        student_id: StudentId,
        drive_id: DriveId,
    ) -> Result<Option<Application>, ApplicationRepositoryError>;

    /// Create an application with the workflow defaults (`applied`,
    /// present, round zero).
    async fn insert(
        &self,
        application: NewApplication,
    ) -> Result<Application, ApplicationRepositoryError>;

    /// Replace the attached resume. Returns the updated application, or
    /// `None` if the id is unknown.
    async fn update_resume(
        &self,
        id: ApplicationId,
        resume_url: String,
    ) -> Result<Option<Application>, ApplicationRepositoryError>;

    /// Delete an application. Returns whether a record was removed.
    async fn delete(&self, id: ApplicationId) -> Result<bool, ApplicationRepositoryError>;
}
