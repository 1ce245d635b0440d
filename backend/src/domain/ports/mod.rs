//! Domain ports for the hexagonal boundary.
//!
//! Repository ports abstract persistence; the driving ports
//! ([`ApplicationWorkflow`], [`NotificationFanout`], [`DriveAdmin`]) are the
//! use-case surfaces the HTTP adapter depends on.

mod application_repository;
mod application_workflow;
mod company_repository;
mod drive_admin;
mod drive_repository;
mod event_repository;
mod notification_fanout;
mod notification_repository;
mod readiness;
mod resume_score_repository;
mod student_repository;
mod workflow_store;

#[cfg(test)]
pub use application_repository::MockApplicationRepository;
pub use application_repository::{ApplicationRepository, ApplicationRepositoryError};
#[cfg(test)]
pub use application_workflow::MockApplicationWorkflow;
pub use application_workflow::{ApplicationWorkflow, ApplyRequest};
#[cfg(test)]
pub use company_repository::MockCompanyRepository;
pub use company_repository::{CompanyRepository, CompanyRepositoryError};
#[cfg(test)]
pub use drive_admin::MockDriveAdmin;
pub use drive_admin::DriveAdmin;
#[cfg(test)]
pub use drive_repository::MockDriveRepository;
pub use drive_repository::{DriveRepository, DriveRepositoryError};
#[cfg(test)]
pub use event_repository::MockEventRepository;
pub use event_repository::{EventRepository, EventRepositoryError};
#[cfg(test)]
pub use notification_fanout::MockNotificationFanout;
pub use notification_fanout::NotificationFanout;
#[cfg(test)]
pub use notification_repository::MockNotificationRepository;
pub use notification_repository::{NotificationRepository, NotificationRepositoryError};
#[cfg(test)]
pub use readiness::MockReadinessProbe;
pub use readiness::ReadinessProbe;
#[cfg(test)]
pub use resume_score_repository::MockResumeScoreRepository;
pub use resume_score_repository::{ResumeScoreRepository, ResumeScoreRepositoryError};
#[cfg(test)]
pub use student_repository::MockStudentRepository;
pub use student_repository::{StudentRepository, StudentRepositoryError};
#[cfg(test)]
pub use workflow_store::MockWorkflowStore;
pub use workflow_store::{WorkflowStore, WorkflowStoreError};
