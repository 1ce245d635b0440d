//! PostgreSQL persistence adapters built on Diesel and `diesel-async`.

mod diesel_application_repository;
mod diesel_company_repository;
mod diesel_drive_repository;
mod diesel_error_mapping;
mod diesel_event_repository;
mod diesel_notification_repository;
mod diesel_resume_score_repository;
mod diesel_student_repository;
mod diesel_workflow_store;
mod models;
pub mod pool;
pub mod schema;

pub use diesel_application_repository::DieselApplicationRepository;
pub use diesel_company_repository::DieselCompanyRepository;
pub use diesel_drive_repository::DieselDriveRepository;
pub use diesel_event_repository::DieselEventRepository;
pub use diesel_notification_repository::DieselNotificationRepository;
pub use diesel_resume_score_repository::DieselResumeScoreRepository;
pub use diesel_student_repository::DieselStudentRepository;
pub use diesel_workflow_store::DieselWorkflowStore;
pub use pool::{DbPool, PoolConfig, PoolError};
