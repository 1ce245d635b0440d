//! Port abstraction for resume score persistence adapters.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::ids::StudentId;
use crate::domain::resume_score::{NewResumeScore, ResumeScore};

/// Persistence errors raised by resume score repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResumeScoreRepositoryError {
    /// Repository connection could not be established.
    #[error("resume score repository connection failed: {message}")]
    Connection {
        /// Adapter-level failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("resume score repository query failed: {message}")]
    Query {
        /// Adapter-level failure description.
        message: String,
    },
}

impl ResumeScoreRepositoryError {
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

impl From<ResumeScoreRepositoryError> for Error {
    fn from(error: ResumeScoreRepositoryError) -> Self {
        match error {
            ResumeScoreRepositoryError::Connection { .. } => {
                Self::service_unavailable(error.to_string())
            }
            ResumeScoreRepositoryError::Query { .. } => Self::internal(error.to_string()),
        }
    }
}

/// Durable, append-only storage for resume scores.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResumeScoreRepository: Send + Sync {
    /// Record a new resume score.
    async fn insert(&self, score: NewResumeScore)
        -> Result<ResumeScore, ResumeScoreRepositoryError>;

    /// Fetch the most recently recorded score for a student, if any.
    async fn find_latest(
        &self,
        student_id: StudentId,
    ) -> Result<Option<ResumeScore>, ResumeScoreRepositoryError>;
}
