//! Port abstraction for company persistence adapters.

use async_trait::async_trait;

use crate::domain::company::{Company, CompanyUpdate, NewCompany};
use crate::domain::error::Error;
use crate::domain::ids::CompanyId;

/// Persistence errors raised by company repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompanyRepositoryError {
    /// Repository connection could not be established.
    #[error("company repository connection failed: {message}")]
    Connection {
        /// Adapter-level failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("company repository query failed: {message}")]
    Query {
        /// Adapter-level failure description.
        message: String,
    },
}

impl CompanyRepositoryError {
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

impl From<CompanyRepositoryError> for Error {
    fn from(error: CompanyRepositoryError) -> Self {
        match error {
            CompanyRepositoryError::Connection { .. } => {
                Self::service_unavailable(error.to_string())
            }
            CompanyRepositoryError::Query { .. } => Self::internal(error.to_string()),
        }
    }
}

/// Durable storage for companies.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// List all companies.
    async fn list(&self) -> Result<Vec<Company>, CompanyRepositoryError>;

    /// Fetch a company by id.
    async fn find(&self, id: CompanyId) -> Result<Option<Company>, CompanyRepositoryError>;

    /// Create a company.
    async fn insert(&self, company: NewCompany) -> Result<Company, CompanyRepositoryError>;

    /// Apply field changes. Returns the updated company, or `None` if the
    /// id is unknown.
    async fn update(
        &self,
        id: CompanyId,
        update: CompanyUpdate,
    ) -> Result<Option<Company>, CompanyRepositoryError>;

    /// Delete a company. Returns whether a record was removed.
    async fn delete(&self, id: CompanyId) -> Result<bool, CompanyRepositoryError>;
}
