//! Port abstraction for calendar event persistence adapters.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::event::{Event, EventUpdate, NewEvent};
use crate::domain::ids::{DriveId, EventId};

/// Persistence errors raised by event repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventRepositoryError {
    /// Repository connection could not be established.
    #[error("event repository connection failed: {message}")]
    Connection {
        /// Adapter-level failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("event repository query failed: {message}")]
    Query {
        /// Adapter-level failure description.
        message: String,
    },
}

impl EventRepositoryError {
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

impl From<EventRepositoryError> for Error {
    fn from(error: EventRepositoryError) -> Self {
        match error {
            EventRepositoryError::Connection { .. } => {
                Self::service_unavailable(error.to_string())
            }
            EventRepositoryError::Query { .. } => Self::internal(error.to_string()),
        }
    }
}

/// Durable storage for calendar events.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// List all events, soonest first.
    async fn list(&self) -> Result<Vec<Event>, EventRepositoryError>;

    /// Fetch an event by id.
    async fn find(&self, id: EventId) -> Result<Option<Event>, EventRepositoryError>;

    /// Fetch the event linked to the given drive, if any.
    async fn find_by_drive(&self, drive_id: DriveId)
        -> Result<Option<Event>, EventRepositoryError>;

    /// Create an event.
    async fn insert(&self, event: NewEvent) -> Result<Event, EventRepositoryError>;

    /// Apply field changes. Returns the updated event, or `None` if the id
    /// is unknown.
    async fn update(
        &self,
        id: EventId,
        update: EventUpdate,
    ) -> Result<Option<Event>, EventRepositoryError>;

    /// Delete an event. Returns whether a record was removed.
    async fn delete(&self, id: EventId) -> Result<bool, EventRepositoryError>;
}
