//! Port abstraction for student persistence adapters.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::ids::{StudentId, UserId};
use crate::domain::student::{NewStudent, Student, StudentProfileUpdate};

/// Persistence errors raised by student repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StudentRepositoryError {
    /// Repository connection could not be established.
    #[error("student repository connection failed: {message}")]
    Connection {
        /// Adapter-level failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("student repository query failed: {message}")]
    Query {
        /// Adapter-level failure description.
        message: String,
    },
    /// A unique field (email or roll number) is already taken.
    #[error("student field already in use: {field}")]
    Duplicate {
        /// The conflicting field.
        field: String,
    },
}

impl StudentRepositoryError {
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

    /// Duplicate-field error naming the conflicting field.
    pub fn duplicate(field: impl Into<String>) -> Self {
        Self::Duplicate {
            field: field.into(),
        }
    }
}

impl From<StudentRepositoryError> for Error {
    fn from(error: StudentRepositoryError) -> Self {
        match error {
            StudentRepositoryError::Duplicate { field } => {
                Self::conflict(format!("Student {field} is already in use"))
            }
            StudentRepositoryError::Connection { .. } => {
                Self::service_unavailable(error.to_string())
            }
            StudentRepositoryError::Query { .. } => Self::internal(error.to_string()),
        }
    }
}

/// Durable storage for student profiles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// List all students.
    async fn list(&self) -> Result<Vec<Student>, StudentRepositoryError>;

    /// Fetch a student by profile id.
    async fn find(&self, id: StudentId) -> Result<Option<Student>, StudentRepositoryError>;

    /// Fetch a student by their linked login user.
    async fn find_by_user(&self, user_id: UserId)
        -> Result<Option<Student>, StudentRepositoryError>;

    /// Create a student profile.
    async fn insert(&self, student: NewStudent) -> Result<Student, StudentRepositoryError>;

    /// Apply identity-field changes; placement state is never writable here.
    ///
    /// Returns the updated student, or `None` if the id is unknown.
    async fn update_profile(
        &self,
        id: StudentId,
        update: StudentProfileUpdate,
    ) -> Result<Option<Student>, StudentRepositoryError>;

    /// Delete a student profile. Returns whether a record was removed.
    async fn delete(&self, id: StudentId) -> Result<bool, StudentRepositoryError>;
}
