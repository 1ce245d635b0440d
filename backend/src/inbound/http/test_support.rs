//! Shared fixtures for handler tests.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use actix_web::http::header::AUTHORIZATION;
use actix_web::web;
use chrono::{Duration, TimeZone, Utc};

use crate::domain::application::{Application, ApplicationStatus};
use crate::domain::company::Company;
use crate::domain::drive::{CtcRange, PlacementDrive};
use crate::domain::event::Event;
use crate::domain::ids::{
    ApplicationId, CompanyId, DriveId, EventId, NotificationId, ResumeScoreId, StudentId, UserId,
};
use crate::domain::notification::{Notification, RecipientSpec};
use crate::domain::ports::{
    MockApplicationRepository, MockApplicationWorkflow, MockCompanyRepository, MockDriveAdmin,
    MockDriveRepository, MockEventRepository, MockNotificationFanout, MockResumeScoreRepository,
    MockStudentRepository,
};
use crate::domain::resume_score::ResumeScore;
use crate::domain::student::{Branch, Student};
use crate::domain::user::Role;
use crate::inbound::http::auth::{Claims, TokenVerifier};
use crate::inbound::http::state::HttpState;

const TEST_SECRET: &[u8] = b"handler-test-secret";

/// Mutable bundle of port mocks, collapsed into an [`HttpState`] once
/// expectations are set.
pub(crate) struct Mocks {
    pub workflow: MockApplicationWorkflow,
    pub notifications: MockNotificationFanout,
    pub drive_admin: MockDriveAdmin,
    pub students: MockStudentRepository,
    pub companies: MockCompanyRepository,
    pub drives: MockDriveRepository,
    pub applications: MockApplicationRepository,
    pub events: MockEventRepository,
    pub resume_scores: MockResumeScoreRepository,
}

impl Default for Mocks {
    fn default() -> Self {
        Self {
            workflow: MockApplicationWorkflow::new(),
            notifications: MockNotificationFanout::new(),
            drive_admin: MockDriveAdmin::new(),
            students: MockStudentRepository::new(),
            companies: MockCompanyRepository::new(),
            drives: MockDriveRepository::new(),
            applications: MockApplicationRepository::new(),
            events: MockEventRepository::new(),
            resume_scores: MockResumeScoreRepository::new(),
        }
    }
}

impl Mocks {
    pub(crate) fn into_state(self) -> HttpState {
        HttpState {
            workflow: Arc::new(self.workflow),
            notifications: Arc::new(self.notifications),
            drive_admin: Arc::new(self.drive_admin),
            students: Arc::new(self.students),
            companies: Arc::new(self.companies),
            drives: Arc::new(self.drives),
            applications: Arc::new(self.applications),
            events: Arc::new(self.events),
            resume_scores: Arc::new(self.resume_scores),
        }
    }
}

pub(crate) fn verifier_data() -> web::Data<TokenVerifier> {
    web::Data::new(TokenVerifier::new(TEST_SECRET))
}

/// Bearer `Authorization` header for a fresh user with the given role.
pub(crate) fn bearer(role: Role) -> (UserId, (actix_web::http::header::HeaderName, String)) {
    bearer_for(UserId::random(), role)
}

/// Bearer `Authorization` header for a specific user.
pub(crate) fn bearer_for(
    user_id: UserId,
    role: Role,
) -> (UserId, (actix_web::http::header::HeaderName, String)) {
    let exp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock after epoch")
        .as_secs()
        + 3600;
    let token = TokenVerifier::new(TEST_SECRET)
        .issue(&Claims {
            sub: user_id.as_uuid(),
            role,
            exp,
        })
        .expect("issue test token");
    (user_id, (AUTHORIZATION, format!("Bearer {token}")))
}

pub(crate) fn sample_time() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(crate) fn sample_student(user_id: UserId) -> Student {
    Student {
        id: StudentId::random(),
        user_id,
        name: "Asha Rao".to_owned(),
        email: "asha@example.edu".to_owned(),
        roll_number: "CS21B001".to_owned(),
        mobile_number: "9876543210".to_owned(),
        branch: Branch::Cse,
        percentage: 81.5,
        resume: None,
        is_placed: false,
        placed_companies: Vec::new(),
        selected_count: 0,
        created_at: sample_time(),
        updated_at: sample_time(),
    }
}

pub(crate) fn sample_application(student_id: StudentId, drive_id: DriveId) -> Application {
    Application {
        id: ApplicationId::random(),
        student_id,
        drive_id,
        status: ApplicationStatus::Applied,
        resume_url: None,
        is_present: true,
        current_round: 0,
        next_round_date: None,
        created_at: sample_time(),
        updated_at: sample_time(),
    }
}

pub(crate) fn sample_company() -> Company {
    Company {
        id: CompanyId::random(),
        name: "Acme".to_owned(),
        description: "Widgets".to_owned(),
        logo: None,
        website: None,
        location: None,
        created_at: sample_time(),
    }
}

pub(crate) fn sample_drive(company_id: CompanyId) -> PlacementDrive {
    PlacementDrive {
        id: DriveId::random(),
        company_id,
        company_name: "Acme".to_owned(),
        title: "Graduate Engineer".to_owned(),
        description: "Campus hiring".to_owned(),
        requirements: "None".to_owned(),
        eligible_branches: vec![Branch::Cse],
        minimum_percentage: 70.0,
        ctc_range: CtcRange { min: 6.0, max: 9.0 },
        number_of_rounds: 2,
        application_link: None,
        drive_date: sample_time() + Duration::days(30),
        last_date_to_apply: sample_time() + Duration::days(10),
        created_at: sample_time(),
        updated_at: sample_time(),
    }
}

pub(crate) fn sample_event(drive_id: Option<DriveId>) -> Event {
    Event {
        id: EventId::random(),
        title: "Acme Placement Drive".to_owned(),
        description: Some("Graduate Engineer".to_owned()),
        date: sample_time() + Duration::days(30),
        drive_id,
        created_at: sample_time(),
    }
}

pub(crate) fn sample_resume_score(student_id: StudentId) -> ResumeScore {
    ResumeScore {
        id: ResumeScoreId::random(),
        student_id,
        ats_score: 72.0,
        technical_score: 80.0,
        communication_score: 65.0,
        experience_score: 58.0,
        skills_score: 77.0,
        overall_score: 70.0,
        feedback: "Add measurable outcomes to the project section.".to_owned(),
        created_at: sample_time(),
    }
}

pub(crate) fn sample_notification(recipients: RecipientSpec) -> Notification {
    Notification {
        id: NotificationId::random(),
        title: "Update".to_owned(),
        message: "Details inside".to_owned(),
        recipients,
        read_by: Vec::new(),
        created_at: sample_time(),
    }
}
