//! Unit-of-work port for atomic workflow commits.
//!
//! A status or attendance transition touches an application, its drive, its
//! student,
//! and the notifications table. This port loads the full context in one
//! read and applies a [`TransitionPlan`] in one transaction, so a crash or
//! a concurrent writer can never leave the records mutually inconsistent.

use async_trait::async_trait;

use crate::domain::application::Application;
use crate::domain::error::Error;
use crate::domain::ids::ApplicationId;
use crate::domain::transition::{TransitionContext, TransitionPlan};

/// Errors raised by workflow store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkflowStoreError {
    /// Store connection could not be established.
    #[error("workflow store connection failed: {message}")]
    Connection {
        /// Adapter-level failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("workflow store query failed: {message}")]
    Query {
        /// Adapter-level failure description.
        message: String,
    },
    /// The application changed since the plan was computed; the guarded
    /// update matched no row. Nothing was written.
    #[error("application was modified concurrently")]
    Conflict,
    /// The application disappeared between load and commit.
    #[error("application no longer exists")]
    Vanished,
}

impl WorkflowStoreError {
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

impl From<WorkflowStoreError> for Error {
    fn from(error: WorkflowStoreError) -> Self {
        match error {
            WorkflowStoreError::Conflict => {
                Self::conflict("Application was modified concurrently; retry the update")
            }
            WorkflowStoreError::Vanished => Self::not_found("Application not found"),
            WorkflowStoreError::Connection { .. } => {
                Self::service_unavailable(error.to_string())
            }
            WorkflowStoreError::Query { .. } => Self::internal(error.to_string()),
        }
    }
}

/// Atomic read/commit surface for the application workflow.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkflowStore: Send + Sync {
    /// Load the application with its drive, student, and the drive-wide
    /// maximum round. `None` when the application does not exist.
    async fn load_context(
        &self,
        id: ApplicationId,
    ) -> Result<Option<TransitionContext>, WorkflowStoreError>;

    /// Apply a plan in one transaction and return the updated application.
    ///
    /// The commit must honour the plan's optimistic concurrency token and
    /// fail with [`WorkflowStoreError::Conflict`] without side effects when
    /// the token is stale.
    async fn commit(&self, plan: TransitionPlan) -> Result<Application, WorkflowStoreError>;
}
