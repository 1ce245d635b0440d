//! Port abstraction for placement drive persistence adapters.

use async_trait::async_trait;

use crate::domain::drive::{DriveUpdate, NewDrive, PlacementDrive};
use crate::domain::error::Error;
use crate::domain::ids::{CompanyId, DriveId};

/// Persistence errors raised by drive repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DriveRepositoryError {
    /// Repository connection could not be established.
    #[error("drive repository connection failed: {message}")]
    Connection {
        /// Adapter-level failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("drive repository query failed: {message}")]
    Query {
        /// Adapter-level failure description.
        message: String,
    },
}

impl DriveRepositoryError {
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

impl From<DriveRepositoryError> for Error {
    fn from(error: DriveRepositoryError) -> Self {
        match error {
            DriveRepositoryError::Connection { .. } => {
                Self::service_unavailable(error.to_string())
            }
            DriveRepositoryError::Query { .. } => Self::internal(error.to_string()),
        }
    }
}

/// Durable storage for placement drives.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DriveRepository: Send + Sync {
    /// List all drives.
    async fn list(&self) -> Result<Vec<PlacementDrive>, DriveRepositoryError>;

    /// Fetch a drive by id.
    async fn find(&self, id: DriveId) -> Result<Option<PlacementDrive>, DriveRepositoryError>;

    /// Create a drive.
    async fn insert(&self, drive: NewDrive) -> Result<PlacementDrive, DriveRepositoryError>;

    /// Apply field changes. Returns the updated drive, or `None` if the id
    /// is unknown.
    async fn update(
        &self,
        id: DriveId,
        update: DriveUpdate,
    ) -> Result<Option<PlacementDrive>, DriveRepositoryError>;

    /// Delete a drive together with its applications and linked event, in
    /// one transaction. Returns whether the drive existed.
    async fn delete_cascade(&self, id: DriveId) -> Result<bool, DriveRepositoryError>;

    /// Count drives referencing the given company.
    async fn count_for_company(&self, company_id: CompanyId)
        -> Result<u64, DriveRepositoryError>;
}
