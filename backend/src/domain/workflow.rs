//! The application workflow service.
//!
//! The one component with multi-entity invariants: creation preconditions,
//! status/round transitions with placement side effects, and attendance
//! freezing. Decisions are made by the pure planner in
//! [`transition`](crate::domain::transition); durable effects go through
//! the [`WorkflowStore`] unit of work.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use super::application::{Application, NewApplication};
use super::error::Error;
use super::ids::ApplicationId;
use super::ports::{
    ApplicationRepository, ApplicationWorkflow, ApplyRequest, DriveRepository, StudentRepository,
    WorkflowStore,
};
use super::transition::{self, TransitionContext, TransitionRequest};

/// Concrete implementation of [`ApplicationWorkflow`].
pub struct ApplicationWorkflowService<W, A, S, D> {
    store: Arc<W>,
    applications: Arc<A>,
    students: Arc<S>,
    drives: Arc<D>,
    clock: Arc<dyn Clock>,
}

impl<W, A, S, D> ApplicationWorkflowService<W, A, S, D> {
    /// Create a new workflow service over its ports.
    pub fn new(
        store: Arc<W>,
        applications: Arc<A>,
        students: Arc<S>,
        drives: Arc<D>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            applications,
            students,
            drives,
            clock,
        }
    }
}

impl<W, A, S, D> ApplicationWorkflowService<W, A, S, D>
where
    W: WorkflowStore,
{
    async fn context_for(&self, id: ApplicationId) -> Result<TransitionContext, Error> {
        self.store
            .load_context(id)
            .await?
            .ok_or_else(|| Error::not_found("Application not found"))
    }
}

#[async_trait]
impl<W, A, S, D> ApplicationWorkflow for ApplicationWorkflowService<W, A, S, D>
where
    W: WorkflowStore,
    A: ApplicationRepository,
    S: StudentRepository,
    D: DriveRepository,
{
    async fn apply(&self, request: ApplyRequest) -> Result<Application, Error> {
        // Precondition order is part of the contract: first failure wins.
        let existing = self
            .applications
            .find_for_student_and_drive(request.student_id, request.drive_id)
            .await?;
        if existing.is_some() {
            return Err(Error::conflict("Already applied to this drive"));
        }

        let drive = self
            .drives
            .find(request.drive_id)
            .await?
            .ok_or_else(|| Error::not_found("Placement drive not found"))?;

        let student = self
            .students
            .find(request.student_id)
            .await?
            .ok_or_else(|| Error::not_found("Student not found"))?;

        if !drive.accepts_branch(student.branch) {
            return Err(Error::invalid_request(
                "Student branch not eligible for this drive",
            ));
        }

        if student.percentage < drive.minimum_percentage {
            return Err(Error::invalid_request(
                "Student percentage below minimum requirement",
            ));
        }

        if self.clock.utc() > drive.last_date_to_apply {
            return Err(Error::invalid_request("Application deadline has passed"));
        }

        let resume_url = request.resume_url.or(student.resume);
        let created = self
            .applications
            .insert(NewApplication {
                student_id: request.student_id,
                drive_id: request.drive_id,
                resume_url,
            })
            .await?;
        Ok(created)
    }

    async fn update_status(
        &self,
        id: ApplicationId,
        request: TransitionRequest,
    ) -> Result<Application, Error> {
        let context = self.context_for(id).await?;
        let plan = transition::plan_status_update(&context, &request)?;
        Ok(self.store.commit(plan).await?)
    }

    async fn mark_attendance(
        &self,
        id: ApplicationId,
        is_present: bool,
    ) -> Result<Application, Error> {
        let context = self.context_for(id).await?;
        let plan = transition::plan_attendance(&context, is_present);
        Ok(self.store.commit(plan).await?)
    }

    async fn update_resume(
        &self,
        id: ApplicationId,
        resume_url: String,
    ) -> Result<Application, Error> {
        self.applications
            .update_resume(id, resume_url)
            .await?
            .ok_or_else(|| Error::not_found("Application not found"))
    }
}

#[cfg(test)]
#[path = "workflow_tests.rs"]
mod tests;
