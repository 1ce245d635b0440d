//! Driving port for the application workflow service.
//!
//! Every application mutation in the system goes through this port; there
//! are no raw-update side doors, so the placement invariants cannot be
//! bypassed.

use async_trait::async_trait;

use crate::domain::application::Application;
use crate::domain::error::Error;
use crate::domain::ids::{ApplicationId, DriveId, StudentId};
use crate::domain::transition::TransitionRequest;

/// Request to create an application.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyRequest {
    /// Applying student.
    pub student_id: StudentId,
    /// Target drive.
    pub drive_id: DriveId,
    /// Resume to attach; falls back to the student's stored resume.
    pub resume_url: Option<String>,
}

/// Use-case surface for application mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationWorkflow: Send + Sync {
    /// Create an application after the ordered precondition checks.
    async fn apply(&self, request: ApplyRequest) -> Result<Application, Error>;

    /// Transition status and/or round, committed atomically.
    async fn update_status(
        &self,
        id: ApplicationId,
        request: TransitionRequest,
    ) -> Result<Application, Error>;

    /// Mark attendance; absence freezes the application.
    async fn mark_attendance(
        &self,
        id: ApplicationId,
        is_present: bool,
    ) -> Result<Application, Error>;

    /// Replace the resume attached to an application.
    async fn update_resume(
        &self,
        id: ApplicationId,
        resume_url: String,
    ) -> Result<Application, Error>;
}
