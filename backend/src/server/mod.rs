//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpServer};
use mockable::DefaultClock;

use backend::domain::ports::ReadinessProbe;
use backend::domain::{ApplicationWorkflowService, DriveAdminService, NotificationService};
use backend::inbound::http::applications::{
    create_application, delete_application, get_application, list_applications,
    list_applications_for_drive, list_applications_for_student, mark_application_attendance,
    update_application_resume, update_application_status,
};
use backend::inbound::http::auth::TokenVerifier;
use backend::inbound::http::companies::{
    create_company, delete_company, get_company, list_companies, update_company,
};
use backend::inbound::http::drives::{
    create_drive, delete_drive, get_drive, list_drives, update_drive,
};
use backend::inbound::http::events::{
    create_event, delete_event, get_event, list_events, update_event,
};
use backend::inbound::http::health;
use backend::inbound::http::notifications::{
    create_notification, delete_notification, list_notifications, mark_all_notifications_read,
    mark_notification_read,
};
use backend::inbound::http::resume_scores::{latest_resume_score, record_resume_score};
use backend::inbound::http::state::HttpState;
use backend::inbound::http::students::{
    create_student, delete_student, get_student, get_student_by_user, list_students,
    update_student,
};
use backend::outbound::persistence::{
    DbPool, DieselApplicationRepository, DieselCompanyRepository, DieselDriveRepository,
    DieselEventRepository, DieselNotificationRepository, DieselResumeScoreRepository,
    DieselStudentRepository, DieselWorkflowStore,
};
use backend::Trace;

/// Assemble the Diesel adapters and domain services behind one pool.
fn build_http_state(pool: &DbPool) -> HttpState {
    let applications = Arc::new(DieselApplicationRepository::new(pool.clone()));
    let students = Arc::new(DieselStudentRepository::new(pool.clone()));
    let companies = Arc::new(DieselCompanyRepository::new(pool.clone()));
    let drives = Arc::new(DieselDriveRepository::new(pool.clone()));
    let events = Arc::new(DieselEventRepository::new(pool.clone()));
    let notifications = Arc::new(DieselNotificationRepository::new(pool.clone()));
    let resume_scores = Arc::new(DieselResumeScoreRepository::new(pool.clone()));
    let store = Arc::new(DieselWorkflowStore::new(pool.clone()));

    let workflow = Arc::new(ApplicationWorkflowService::new(
        store,
        Arc::clone(&applications),
        Arc::clone(&students),
        Arc::clone(&drives),
        Arc::new(DefaultClock),
    ));
    let fanout = Arc::new(NotificationService::new(
        Arc::clone(&notifications),
        Arc::clone(&students),
    ));
    let drive_admin = Arc::new(DriveAdminService::new(
        Arc::clone(&drives),
        Arc::clone(&companies),
        Arc::clone(&events),
    ));

    HttpState {
        workflow,
        notifications: fanout,
        drive_admin,
        students,
        companies,
        drives,
        applications,
        events,
        resume_scores,
    }
}

fn build_app(
    state: web::Data<HttpState>,
    verifier: web::Data<TokenVerifier>,
    probe: Arc<dyn ReadinessProbe>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api/v1")
        .service(create_application)
        .service(list_applications)
        .service(get_application)
        .service(list_applications_for_student)
        .service(list_applications_for_drive)
        .service(update_application_status)
        .service(mark_application_attendance)
        .service(update_application_resume)
        .service(delete_application)
        .service(list_students)
        .service(get_student)
        .service(get_student_by_user)
        .service(create_student)
        .service(update_student)
        .service(delete_student)
        .service(list_companies)
        .service(get_company)
        .service(create_company)
        .service(update_company)
        .service(delete_company)
        .service(list_drives)
        .service(get_drive)
        .service(create_drive)
        .service(update_drive)
        .service(delete_drive)
        .service(list_events)
        .service(get_event)
        .service(create_event)
        .service(update_event)
        .service(delete_event)
        .service(list_notifications)
        .service(create_notification)
        .service(mark_all_notifications_read)
        .service(mark_notification_read)
        .service(delete_notification)
        .service(record_resume_score)
        .service(latest_resume_score);

    App::new()
        .app_data(state)
        .app_data(verifier)
        .wrap(Trace)
        .service(api)
        .configure(health::configure(probe))
}

/// Construct the Actix HTTP server from a built configuration.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        verifier,
        db_pool,
    } = config;

    let state = web::Data::new(build_http_state(&db_pool));
    let verifier = web::Data::new(verifier);
    let probe: Arc<dyn ReadinessProbe> = Arc::new(db_pool);

    let server =
        HttpServer::new(move || build_app(state.clone(), verifier.clone(), probe.clone()))
            .bind(bind_addr)?
            .run();

    Ok(server)
}
