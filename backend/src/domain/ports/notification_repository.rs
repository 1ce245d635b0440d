//! Port abstraction for notification persistence adapters.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::ids::{NotificationId, UserId};
use crate::domain::notification::{Notification, NotificationDraft};

/// Persistence errors raised by notification repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotificationRepositoryError {
    /// Repository connection could not be established.
    #[error("notification repository connection failed: {message}")]
    Connection {
        /// Adapter-level failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("notification repository query failed: {message}")]
    Query {
        /// Adapter-level failure description.
        message: String,
    },
}

impl NotificationRepositoryError {
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

impl From<NotificationRepositoryError> for Error {
    fn from(error: NotificationRepositoryError) -> Self {
        match error {
            NotificationRepositoryError::Connection { .. } => {
                Self::service_unavailable(error.to_string())
            }
            NotificationRepositoryError::Query { .. } => Self::internal(error.to_string()),
        }
    }
}

/// Durable storage for notifications and their read state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// List all notifications, newest first.
    async fn list(&self) -> Result<Vec<Notification>, NotificationRepositoryError>;

    /// Fetch a notification by id.
    async fn find(
        &self,
        id: NotificationId,
    ) -> Result<Option<Notification>, NotificationRepositoryError>;

    /// Create a notification with an empty read set.
    async fn insert(
        &self,
        draft: NotificationDraft,
    ) -> Result<Notification, NotificationRepositoryError>;

    /// Append the user to the read set at most once. Returns the updated
    /// notification, or `None` if the id is unknown.
    async fn mark_read(
        &self,
        id: NotificationId,
        user_id: UserId,
    ) -> Result<Option<Notification>, NotificationRepositoryError>;

    /// Delete a notification. Returns whether a record was removed.
    async fn delete(&self, id: NotificationId) -> Result<bool, NotificationRepositoryError>;
}
