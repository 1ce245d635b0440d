//! Scenario tests for the application workflow service, driven through an
//! in-memory store that honours the commit contract.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};
use mockable::MockClock;
use rstest::rstest;

use crate::domain::application::{Application, ApplicationStatus, NewApplication};
use crate::domain::drive::{CtcRange, DriveUpdate, NewDrive, PlacementDrive};
use crate::domain::error::ErrorCode;
use crate::domain::ids::{ApplicationId, CompanyId, DriveId, StudentId, UserId};
use crate::domain::notification::NotificationDraft;
use crate::domain::ports::{
    ApplicationRepository, ApplicationRepositoryError, ApplicationWorkflow, ApplyRequest,
    DriveRepository, DriveRepositoryError, StudentRepository, StudentRepositoryError,
    WorkflowStore, WorkflowStoreError,
};
use crate::domain::student::{Branch, NewStudent, Student, StudentProfileUpdate};
use crate::domain::transition::{PlacementEffect, TransitionContext, TransitionPlan, TransitionRequest};

use super::ApplicationWorkflowService;

#[derive(Default)]
struct State {
    students: HashMap<StudentId, Student>,
    drives: HashMap<DriveId, PlacementDrive>,
    applications: HashMap<ApplicationId, Application>,
    notifications: Vec<NotificationDraft>,
}

/// Shared in-memory backing store implementing every port the service
/// needs, including the transactional commit semantics.
#[derive(Default)]
struct InMemory {
    state: Mutex<State>,
}

impl InMemory {
    fn with_state(&self, f: impl FnOnce(&mut State)) {
        let mut state = self.state.lock().expect("state lock");
        f(&mut state);
    }

    fn student(&self, id: StudentId) -> Student {
        let state = self.state.lock().expect("state lock");
        state.students.get(&id).expect("student exists").clone()
    }

    fn drive(&self, id: DriveId) -> PlacementDrive {
        let state = self.state.lock().expect("state lock");
        state.drives.get(&id).expect("drive exists").clone()
    }

    fn notifications(&self) -> Vec<NotificationDraft> {
        let state = self.state.lock().expect("state lock");
        state.notifications.clone()
    }
}

#[async_trait::async_trait]
impl ApplicationRepository for InMemory {
    async fn list(&self) -> Result<Vec<Application>, ApplicationRepositoryError> {
        let state = self.state.lock().expect("state lock");
        Ok(state.applications.values().cloned().collect())
    }

    async fn list_for_student(
        &self,
        student_id: StudentId,
    ) -> Result<Vec<Application>, ApplicationRepositoryError> {
        let state = self.state.lock().expect("state lock");
        Ok(state
            .applications
            .values()
            .filter(|a| a.student_id == student_id)
            .cloned()
            .collect())
    }

    async fn list_for_drive(
        &self,
        drive_id: DriveId,
    ) -> Result<Vec<Application>, ApplicationRepositoryError> {
        let state = self.state.lock().expect("state lock");
        Ok(state
            .applications
            .values()
            .filter(|a| a.drive_id == drive_id)
            .cloned()
            .collect())
    }

    async fn find(
        &self,
        id: ApplicationId,
    ) -> Result<Option<Application>, ApplicationRepositoryError> {
        let state = self.state.lock().expect("state lock");
        Ok(state.applications.get(&id).cloned())
    }

    async fn find_for_student_and_drive(
        &self,
        student_id: StudentId,
        drive_id: DriveId,
    ) -> Result<Option<Application>, ApplicationRepositoryError> {
        let state = self.state.lock().expect("state lock");
        Ok(state
            .applications
            .values()
            .find(|a| a.student_id == student_id && a.drive_id == drive_id)
            .cloned())
    }

    async fn insert(
        &self,
        application: NewApplication,
    ) -> Result<Application, ApplicationRepositoryError> {
        let mut state = self.state.lock().expect("state lock");
        let duplicate = state
            .applications
            .values()
            .any(|a| a.student_id == application.student_id && a.drive_id == application.drive_id);
        if duplicate {
            return Err(ApplicationRepositoryError::AlreadyApplied);
        }
        let now = Utc::now();
        let created = Application {
            id: ApplicationId::random(),
            student_id: application.student_id,
            drive_id: application.drive_id,
            status: ApplicationStatus::Applied,
            resume_url: application.resume_url,
            is_present: true,
            current_round: 0,
            next_round_date: None,
            created_at: now,
            updated_at: now,
        };
        state.applications.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_resume(
        &self,
        id: ApplicationId,
        resume_url: String,
    ) -> Result<Option<Application>, ApplicationRepositoryError> {
        let mut state = self.state.lock().expect("state lock");
        Ok(state.applications.get_mut(&id).map(|a| {
            a.resume_url = Some(resume_url);
            a.clone()
        }))
    }

    async fn delete(&self, id: ApplicationId) -> Result<bool, ApplicationRepositoryError> {
        let mut state = self.state.lock().expect("state lock");
        Ok(state.applications.remove(&id).is_some())
    }
}

#[async_trait::async_trait]
impl StudentRepository for InMemory {
    async fn list(&self) -> Result<Vec<Student>, StudentRepositoryError> {
        let state = self.state.lock().expect("state lock");
        Ok(state.students.values().cloned().collect())
    }

    async fn find(&self, id: StudentId) -> Result<Option<Student>, StudentRepositoryError> {
        let state = self.state.lock().expect("state lock");
        Ok(state.students.get(&id).cloned())
    }

    async fn find_by_user(
        &self,
        user_id: UserId,
    ) -> Result<Option<Student>, StudentRepositoryError> {
        let state = self.state.lock().expect("state lock");
        Ok(state.students.values().find(|s| s.user_id == user_id).cloned())
    }

    async fn insert(&self, student: NewStudent) -> Result<Student, StudentRepositoryError> {
        let mut state = self.state.lock().expect("state lock");
        let now = Utc::now();
        let created = Student {
            id: StudentId::random(),
            user_id: student.user_id,
            name: student.name,
            email: student.email,
            roll_number: student.roll_number,
            mobile_number: student.mobile_number,
            branch: student.branch,
            percentage: student.percentage,
            resume: student.resume,
            is_placed: false,
            placed_companies: Vec::new(),
            selected_count: 0,
            created_at: now,
            updated_at: now,
        };
        state.students.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_profile(
        &self,
        id: StudentId,
        update: StudentProfileUpdate,
    ) -> Result<Option<Student>, StudentRepositoryError> {
        let mut state = self.state.lock().expect("state lock");
        Ok(state.students.get_mut(&id).map(|s| {
            if let Some(name) = update.name {
                s.name = name;
            }
            s.clone()
        }))
    }

    async fn delete(&self, id: StudentId) -> Result<bool, StudentRepositoryError> {
        let mut state = self.state.lock().expect("state lock");
        Ok(state.students.remove(&id).is_some())
    }
}

#[async_trait::async_trait]
impl DriveRepository for InMemory {
    async fn list(&self) -> Result<Vec<PlacementDrive>, DriveRepositoryError> {
        let state = self.state.lock().expect("state lock");
        Ok(state.drives.values().cloned().collect())
    }

    async fn find(&self, id: DriveId) -> Result<Option<PlacementDrive>, DriveRepositoryError> {
        let state = self.state.lock().expect("state lock");
        Ok(state.drives.get(&id).cloned())
    }

    async fn insert(&self, drive: NewDrive) -> Result<PlacementDrive, DriveRepositoryError> {
        let mut state = self.state.lock().expect("state lock");
        let now = Utc::now();
        let created = PlacementDrive {
            id: DriveId::random(),
            company_id: drive.company_id,
            company_name: drive.company_name,
            title: drive.title,
            description: drive.description,
            requirements: drive.requirements,
            eligible_branches: drive.eligible_branches,
            minimum_percentage: drive.minimum_percentage,
            ctc_range: drive.ctc_range,
            number_of_rounds: drive.number_of_rounds,
            application_link: drive.application_link,
            drive_date: drive.drive_date,
            last_date_to_apply: drive.last_date_to_apply,
            created_at: now,
            updated_at: now,
        };
        state.drives.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        _id: DriveId,
        _update: DriveUpdate,
    ) -> Result<Option<PlacementDrive>, DriveRepositoryError> {
        unimplemented!("not exercised by workflow tests")
    }

    async fn delete_cascade(&self, _id: DriveId) -> Result<bool, DriveRepositoryError> {
        unimplemented!("not exercised by workflow tests")
    }

    async fn count_for_company(
        &self,
        _company_id: CompanyId,
    ) -> Result<u64, DriveRepositoryError> {
        unimplemented!("not exercised by workflow tests")
    }
}

#[async_trait::async_trait]
impl WorkflowStore for InMemory {
    async fn load_context(
        &self,
        id: ApplicationId,
    ) -> Result<Option<TransitionContext>, WorkflowStoreError> {
        let state = self.state.lock().expect("state lock");
        let Some(application) = state.applications.get(&id).cloned() else {
            return Ok(None);
        };
        let drive = state
            .drives
            .get(&application.drive_id)
            .cloned()
            .ok_or(WorkflowStoreError::Vanished)?;
        let student = state
            .students
            .get(&application.student_id)
            .cloned()
            .ok_or(WorkflowStoreError::Vanished)?;
        let drive_max_round = state
            .applications
            .values()
            .filter(|a| a.drive_id == application.drive_id)
            .map(|a| a.current_round)
            .max()
            .unwrap_or(0);
        Ok(Some(TransitionContext {
            application,
            drive,
            student,
            drive_max_round,
        }))
    }

    async fn commit(&self, plan: TransitionPlan) -> Result<Application, WorkflowStoreError> {
        let mut state = self.state.lock().expect("state lock");
        let application = state
            .applications
            .get_mut(&plan.application_id)
            .ok_or(WorkflowStoreError::Vanished)?;
        if application.updated_at != plan.expected_updated_at {
            return Err(WorkflowStoreError::Conflict);
        }
        if let Some(status) = plan.status {
            application.status = status;
        }
        if let Some(round) = plan.current_round {
            application.current_round = round;
        }
        if let Some(date) = plan.next_round_date {
            application.next_round_date = Some(date);
        }
        if let Some(is_present) = plan.is_present {
            application.is_present = is_present;
        }
        application.updated_at += Duration::seconds(1);
        let updated = application.clone();

        if let Some(widening) = plan.widen_drive_rounds {
            if let Some(drive) = state.drives.get_mut(&widening.drive_id) {
                drive.number_of_rounds = drive.number_of_rounds.max(widening.round + 1);
            }
        }
        if let Some((student_id, effect)) = plan.placement {
            let student = state
                .students
                .get_mut(&student_id)
                .ok_or(WorkflowStoreError::Vanished)?;
            match effect {
                PlacementEffect::Grant { company_name } => student.record_selection(&company_name),
                PlacementEffect::Revoke { company_name } => student.revoke_selection(&company_name),
            }
        }
        if let Some(draft) = plan.notification {
            state.notifications.push(draft);
        }
        Ok(updated)
    }
}

type Service = ApplicationWorkflowService<InMemory, InMemory, InMemory, InMemory>;

struct Harness {
    service: Service,
    store: Arc<InMemory>,
    student_id: StudentId,
    drive_id: DriveId,
}

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).single().expect("valid timestamp")
}

fn harness() -> Harness {
    let store = Arc::new(InMemory::default());
    let student_id = StudentId::random();
    let drive_id = DriveId::random();
    store.with_state(|state| {
        let now = fixed_now();
        state.students.insert(
            student_id,
            Student {
                id: student_id,
                user_id: UserId::random(),
                name: "Asha Rao".to_owned(),
                email: "asha@example.edu".to_owned(),
                roll_number: "CS21B001".to_owned(),
                mobile_number: "9876543210".to_owned(),
                branch: Branch::Cse,
                percentage: 81.5,
                resume: Some("resumes/asha.pdf".to_owned()),
                is_placed: false,
                placed_companies: Vec::new(),
                selected_count: 0,
                created_at: now,
                updated_at: now,
            },
        );
        state.drives.insert(
            drive_id,
            PlacementDrive {
                id: drive_id,
                company_id: CompanyId::random(),
                company_name: "Acme".to_owned(),
                title: "Graduate Engineer".to_owned(),
                description: "Campus hiring".to_owned(),
                requirements: "None".to_owned(),
                eligible_branches: vec![Branch::Cse, Branch::It],
                minimum_percentage: 70.0,
                ctc_range: CtcRange { min: 6.0, max: 9.0 },
                number_of_rounds: 1,
                application_link: None,
                drive_date: now + Duration::days(30),
                last_date_to_apply: now + Duration::days(10),
                created_at: now,
                updated_at: now,
            },
        );
    });

    let mut clock = MockClock::new();
    clock.expect_utc().returning(fixed_now);
    let service = ApplicationWorkflowService::new(
        Arc::clone(&store),
        Arc::clone(&store),
        Arc::clone(&store),
        Arc::clone(&store),
        Arc::new(clock),
    );
    Harness {
        service,
        store,
        student_id,
        drive_id,
    }
}

fn apply_request(h: &Harness) -> ApplyRequest {
    ApplyRequest {
        student_id: h.student_id,
        drive_id: h.drive_id,
        resume_url: None,
    }
}

#[tokio::test]
async fn apply_creates_application_with_workflow_defaults() {
    let h = harness();
    let application = h.service.apply(apply_request(&h)).await.expect("apply");

    assert_eq!(application.status, ApplicationStatus::Applied);
    assert_eq!(application.current_round, 0);
    assert!(application.is_present);
    // No resume supplied: falls back to the student's stored resume.
    assert_eq!(application.resume_url.as_deref(), Some("resumes/asha.pdf"));
}

#[tokio::test]
async fn apply_prefers_request_resume_over_stored_resume() {
    let h = harness();
    let application = h
        .service
        .apply(ApplyRequest {
            resume_url: Some("resumes/custom.pdf".to_owned()),
            ..apply_request(&h)
        })
        .await
        .expect("apply");
    assert_eq!(application.resume_url.as_deref(), Some("resumes/custom.pdf"));
}

#[tokio::test]
async fn apply_rejects_duplicate_application() {
    let h = harness();
    h.service.apply(apply_request(&h)).await.expect("first apply");

    let err = h.service.apply(apply_request(&h)).await.expect_err("duplicate");
    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(err.message(), "Already applied to this drive");
}

#[tokio::test]
async fn apply_rejects_unknown_drive() {
    let h = harness();
    let err = h
        .service
        .apply(ApplyRequest {
            drive_id: DriveId::random(),
            ..apply_request(&h)
        })
        .await
        .expect_err("unknown drive");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn apply_rejects_unknown_student() {
    let h = harness();
    let err = h
        .service
        .apply(ApplyRequest {
            student_id: StudentId::random(),
            ..apply_request(&h)
        })
        .await
        .expect_err("unknown student");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn apply_rejects_ineligible_branch() {
    let h = harness();
    h.store.with_state(|state| {
        let drive = state.drives.get_mut(&h.drive_id).expect("drive");
        drive.eligible_branches = vec![Branch::Mech];
    });

    let err = h.service.apply(apply_request(&h)).await.expect_err("branch");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), "Student branch not eligible for this drive");
}

#[tokio::test]
async fn apply_rejects_percentage_below_minimum() {
    let h = harness();
    h.store.with_state(|state| {
        let drive = state.drives.get_mut(&h.drive_id).expect("drive");
        drive.minimum_percentage = 90.0;
    });

    let err = h.service.apply(apply_request(&h)).await.expect_err("percentage");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), "Student percentage below minimum requirement");
}

#[tokio::test]
async fn apply_rejects_after_deadline() {
    let h = harness();
    h.store.with_state(|state| {
        let drive = state.drives.get_mut(&h.drive_id).expect("drive");
        drive.last_date_to_apply = fixed_now() - Duration::days(1);
    });

    let err = h.service.apply(apply_request(&h)).await.expect_err("deadline");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), "Application deadline has passed");
}

#[tokio::test]
async fn lifecycle_shortlist_select_reject_round_trips_placement() {
    let h = harness();
    let application = h.service.apply(apply_request(&h)).await.expect("apply");

    // Shortlist into round 1; the drive stated one round, so it widens.
    let shortlisted = h
        .service
        .update_status(
            application.id,
            TransitionRequest {
                status: Some(ApplicationStatus::Shortlisted),
                current_round: Some(1.0),
                next_round_date: Some(fixed_now() + Duration::days(35)),
            },
        )
        .await
        .expect("shortlist");
    assert_eq!(shortlisted.status, ApplicationStatus::Shortlisted);
    assert_eq!(shortlisted.current_round, 1);
    assert!(shortlisted.next_round_date.is_some());
    assert_eq!(h.store.drive(h.drive_id).number_of_rounds, 2);

    // Selection places the student.
    let selected = h
        .service
        .update_status(
            application.id,
            TransitionRequest {
                status: Some(ApplicationStatus::Selected),
                ..TransitionRequest::default()
            },
        )
        .await
        .expect("select");
    assert_eq!(selected.status, ApplicationStatus::Selected);
    let student = h.store.student(h.student_id);
    assert!(student.is_placed);
    assert_eq!(student.placed_companies, vec!["Acme"]);
    assert_eq!(student.selected_count, 1);

    // Rejection after selection reverts placement.
    h.service
        .update_status(
            application.id,
            TransitionRequest {
                status: Some(ApplicationStatus::Rejected),
                ..TransitionRequest::default()
            },
        )
        .await
        .expect("reject");
    let student = h.store.student(h.student_id);
    assert!(!student.is_placed);
    assert!(student.placed_companies.is_empty());
    assert_eq!(student.selected_count, 0);

    // One notification per status change.
    assert_eq!(h.store.notifications().len(), 3);
}

#[tokio::test]
async fn reselecting_an_already_selected_application_is_a_placement_noop() {
    let h = harness();
    let application = h.service.apply(apply_request(&h)).await.expect("apply");
    let select = TransitionRequest {
        status: Some(ApplicationStatus::Selected),
        ..TransitionRequest::default()
    };
    h.service
        .update_status(application.id, select.clone())
        .await
        .expect("first select");
    h.service
        .update_status(application.id, select)
        .await
        .expect("replayed select");

    let student = h.store.student(h.student_id);
    assert_eq!(student.selected_count, 1);
    assert_eq!(student.placed_companies, vec!["Acme"]);
}

#[rstest]
#[case(ApplicationStatus::Applied)]
#[case(ApplicationStatus::Rejected)]
#[tokio::test]
async fn round_update_refused_for_non_progressable_status(#[case] status: ApplicationStatus) {
    let h = harness();
    let application = h.service.apply(apply_request(&h)).await.expect("apply");

    let err = h
        .service
        .update_status(
            application.id,
            TransitionRequest {
                status: Some(status),
                current_round: Some(1.0),
                next_round_date: None,
            },
        )
        .await
        .expect_err("round with non-progressable status");
    assert_eq!(err.code(), ErrorCode::Conflict);
    let details = err.details().expect("details");
    assert_eq!(details["code"], "INVALID_ROUND_UPDATE");
}

#[tokio::test]
async fn marking_absent_freezes_and_rejects_without_placement_rollback() {
    let h = harness();
    let application = h.service.apply(apply_request(&h)).await.expect("apply");
    h.service
        .update_status(
            application.id,
            TransitionRequest {
                status: Some(ApplicationStatus::Selected),
                ..TransitionRequest::default()
            },
        )
        .await
        .expect("select");

    let absent = h
        .service
        .mark_attendance(application.id, false)
        .await
        .expect("mark absent");
    assert!(!absent.is_present);
    assert_eq!(absent.status, ApplicationStatus::Rejected);

    // Attendance rejection does not touch placement state.
    let student = h.store.student(h.student_id);
    assert!(student.is_placed);
    assert_eq!(student.selected_count, 1);

    // Frozen: further status updates are refused with the conflict code.
    let err = h
        .service
        .update_status(
            application.id,
            TransitionRequest {
                status: Some(ApplicationStatus::Shortlisted),
                ..TransitionRequest::default()
            },
        )
        .await
        .expect_err("frozen application");
    assert_eq!(err.code(), ErrorCode::Conflict);
    let details = err.details().expect("details");
    assert_eq!(details["code"], "ABSENT_STUDENT");
}

#[tokio::test]
async fn restoring_presence_only_unfreezes() {
    let h = harness();
    let application = h.service.apply(apply_request(&h)).await.expect("apply");
    h.service
        .mark_attendance(application.id, false)
        .await
        .expect("mark absent");

    let restored = h
        .service
        .mark_attendance(application.id, true)
        .await
        .expect("restore presence");
    assert!(restored.is_present);
    // The forced rejection is not undone.
    assert_eq!(restored.status, ApplicationStatus::Rejected);
}

#[tokio::test]
async fn stale_commit_token_is_a_conflict_without_side_effects() {
    let h = harness();
    let application = h.service.apply(apply_request(&h)).await.expect("apply");

    // Plan against the current context, then let another transition land.
    let context = h
        .store
        .load_context(application.id)
        .await
        .expect("load")
        .expect("context");
    let stale_plan = crate::domain::transition::plan_status_update(
        &context,
        &TransitionRequest {
            status: Some(ApplicationStatus::Selected),
            ..TransitionRequest::default()
        },
    )
    .expect("plan");

    h.service
        .update_status(
            application.id,
            TransitionRequest {
                status: Some(ApplicationStatus::Shortlisted),
                ..TransitionRequest::default()
            },
        )
        .await
        .expect("interleaved update");

    let err = h.store.commit(stale_plan).await.expect_err("stale commit");
    assert_eq!(err, WorkflowStoreError::Conflict);
    // The losing selection must not have placed the student.
    assert!(!h.store.student(h.student_id).is_placed);
}

#[tokio::test]
async fn update_status_for_unknown_application_is_not_found() {
    let h = harness();
    let err = h
        .service
        .update_status(ApplicationId::random(), TransitionRequest::default())
        .await
        .expect_err("unknown application");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn update_resume_replaces_attachment() {
    let h = harness();
    let application = h.service.apply(apply_request(&h)).await.expect("apply");

    let updated = h
        .service
        .update_resume(application.id, "resumes/v2.pdf".to_owned())
        .await
        .expect("update resume");
    assert_eq!(updated.resume_url.as_deref(), Some("resumes/v2.pdf"));

    let err = h
        .service
        .update_resume(ApplicationId::random(), "resumes/v2.pdf".to_owned())
        .await
        .expect_err("unknown application");
    assert_eq!(err.code(), ErrorCode::NotFound);
}
