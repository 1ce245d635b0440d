//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    ApplicationRepository, ApplicationWorkflow, CompanyRepository, DriveAdmin, DriveRepository,
    EventRepository, NotificationFanout, ResumeScoreRepository, StudentRepository,
};

/// Dependency bundle for HTTP handlers.
///
/// The three services own every multi-entity mutation; the repositories
/// back the plain CRUD and read surface.
#[derive(Clone)]
pub struct HttpState {
    /// Application workflow use-cases.
    pub workflow: Arc<dyn ApplicationWorkflow>,
    /// Notification fan-out use-cases.
    pub notifications: Arc<dyn NotificationFanout>,
    /// Drive administration use-cases.
    pub drive_admin: Arc<dyn DriveAdmin>,
    /// Student profile storage.
    pub students: Arc<dyn StudentRepository>,
    /// Company storage.
    pub companies: Arc<dyn CompanyRepository>,
    /// Drive storage.
    pub drives: Arc<dyn DriveRepository>,
    /// Application storage.
    pub applications: Arc<dyn ApplicationRepository>,
    /// Calendar event storage.
    pub events: Arc<dyn EventRepository>,
    /// Resume score storage.
    pub resume_scores: Arc<dyn ResumeScoreRepository>,
}
