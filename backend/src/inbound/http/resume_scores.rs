//! Resume score API handlers.
//!
//! ```text
//! POST /api/v1/resume-scores
//! GET  /api/v1/resume-scores/latest/{student_id}
//! ```
//!
//! Scores are append-only; the read surface resolves the latest record
//! per student.

use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;

use crate::domain::ids::StudentId;
use crate::domain::resume_score::{NewResumeScore, ResumeScore};
use crate::domain::Error;
use crate::inbound::http::access::require_self_or_admin;
use crate::inbound::http::auth::Identity;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{require_non_empty, require_percentage, FieldName};
use crate::inbound::http::ApiResult;

/// Request body for `POST /api/v1/resume-scores`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResumeScoreRequest {
    /// Applicant-tracking-system compatibility score, 0–100.
    pub ats_score: f64,
    /// Technical content score, 0–100.
    pub technical_score: f64,
    /// Communication score, 0–100.
    pub communication_score: f64,
    /// Experience score, 0–100.
    pub experience_score: f64,
    /// Skills coverage score, 0–100.
    pub skills_score: f64,
    /// Overall score, 0–100.
    pub overall_score: f64,
    /// Review feedback text.
    pub feedback: String,
}

fn validate_create(payload: &CreateResumeScoreRequest) -> Result<(), Error> {
    require_percentage(payload.ats_score, FieldName::new("atsScore"))?;
    require_percentage(payload.technical_score, FieldName::new("technicalScore"))?;
    require_percentage(
        payload.communication_score,
        FieldName::new("communicationScore"),
    )?;
    require_percentage(payload.experience_score, FieldName::new("experienceScore"))?;
    require_percentage(payload.skills_score, FieldName::new("skillsScore"))?;
    require_percentage(payload.overall_score, FieldName::new("overallScore"))?;
    require_non_empty(&payload.feedback, FieldName::new("feedback"))
}

/// Record a resume score for the caller's own student profile.
#[post("/resume-scores")]
pub async fn record_resume_score(
    identity: Identity,
    state: web::Data<HttpState>,
    payload: web::Json<CreateResumeScoreRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    validate_create(&payload)?;
    // The score attaches to the caller's profile; callers without one
    // (including admins) have nothing to score.
    let student = state
        .students
        .find_by_user(identity.user_id)
        .await?
        .ok_or_else(|| Error::not_found("Student not found"))?;
    let created = state
        .resume_scores
        .insert(NewResumeScore {
            student_id: student.id,
            ats_score: payload.ats_score,
            technical_score: payload.technical_score,
            communication_score: payload.communication_score,
            experience_score: payload.experience_score,
            skills_score: payload.skills_score,
            overall_score: payload.overall_score,
            feedback: payload.feedback,
        })
        .await?;
    Ok(HttpResponse::Created().json(created))
}

/// Fetch the latest resume score recorded for a student.
#[get("/resume-scores/latest/{student_id}")]
pub async fn latest_resume_score(
    identity: Identity,
    state: web::Data<HttpState>,
    path: web::Path<StudentId>,
) -> ApiResult<web::Json<ResumeScore>> {
    let student_id = path.into_inner();
    require_self_or_admin(&state.students, &identity, student_id).await?;
    let score = state
        .resume_scores
        .find_latest(student_id)
        .await?
        .ok_or_else(|| Error::not_found("No resume score found"))?;
    Ok(web::Json(score))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test as actix_test, App};
    use serde_json::{json, Value};

    use crate::domain::ids::UserId;
    use crate::domain::user::Role;
    use crate::inbound::http::test_support::{
        bearer, bearer_for, sample_resume_score, sample_student, verifier_data, Mocks,
    };

    fn app_config(state: HttpState) -> impl FnOnce(&mut web::ServiceConfig) {
        move |cfg| {
            cfg.app_data(verifier_data())
                .app_data(web::Data::new(state))
                .service(
                    web::scope("/api/v1")
                        .service(record_resume_score)
                        .service(latest_resume_score),
                );
        }
    }

    fn score_payload() -> Value {
        json!({
            "atsScore": 72.0,
            "technicalScore": 80.0,
            "communicationScore": 65.0,
            "experienceScore": 58.0,
            "skillsScore": 77.0,
            "overallScore": 70.0,
            "feedback": "Add measurable outcomes to the project section.",
        })
    }

    #[actix_web::test]
    async fn student_records_a_score_against_their_own_profile() {
        let (user_id, auth) = bearer(Role::Student);
        let student = sample_student(user_id);
        let student_id = student.id;

        let mut mocks = Mocks::default();
        mocks
            .students
            .expect_find_by_user()
            .returning(move |_| Ok(Some(student.clone())));
        mocks
            .resume_scores
            .expect_insert()
            .withf(move |new| new.student_id == student_id && new.overall_score == 70.0)
            .returning(|new| Ok(sample_resume_score(new.student_id)));

        let app = actix_test::init_service(App::new().configure(app_config(mocks.into_state())))
            .await;
        let req = actix_test::TestRequest::post()
            .uri("/api/v1/resume-scores")
            .insert_header(auth)
            .set_json(score_payload())
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["studentId"], json!(student_id));
    }

    #[actix_web::test]
    async fn caller_without_a_profile_cannot_record() {
        let (_, auth) = bearer(Role::Student);
        let mut mocks = Mocks::default();
        mocks.students.expect_find_by_user().returning(|_| Ok(None));
        mocks.resume_scores.expect_insert().never();

        let app = actix_test::init_service(App::new().configure(app_config(mocks.into_state())))
            .await;
        let req = actix_test::TestRequest::post()
            .uri("/api/v1/resume-scores")
            .insert_header(auth)
            .set_json(score_payload())
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn out_of_range_score_is_rejected() {
        let (_, auth) = bearer(Role::Student);
        let app = actix_test::init_service(
            App::new().configure(app_config(Mocks::default().into_state())),
        )
        .await;
        let mut payload = score_payload();
        payload["atsScore"] = json!(140.0);
        let req = actix_test::TestRequest::post()
            .uri("/api/v1/resume-scores")
            .insert_header(auth)
            .set_json(payload)
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], "atsScore");
    }

    #[actix_web::test]
    async fn student_cannot_read_someone_elses_latest_score() {
        let (_, auth) = bearer(Role::Student);
        // The profile belongs to a different login.
        let student = sample_student(UserId::random());
        let student_id = student.id;

        let mut mocks = Mocks::default();
        mocks
            .students
            .expect_find()
            .returning(move |_| Ok(Some(student.clone())));
        mocks.resume_scores.expect_find_latest().never();

        let app = actix_test::init_service(App::new().configure(app_config(mocks.into_state())))
            .await;
        let req = actix_test::TestRequest::get()
            .uri(&format!("/api/v1/resume-scores/latest/{student_id}"))
            .insert_header(auth)
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn owner_reads_their_latest_score() {
        let user_id = UserId::random();
        let (_, auth) = bearer_for(user_id, Role::Student);
        let student = sample_student(user_id);
        let student_id = student.id;

        let mut mocks = Mocks::default();
        mocks
            .students
            .expect_find()
            .returning(move |_| Ok(Some(student.clone())));
        mocks
            .resume_scores
            .expect_find_latest()
            .withf(move |id| *id == student_id)
            .returning(|id| Ok(Some(sample_resume_score(id))));

        let app = actix_test::init_service(App::new().configure(app_config(mocks.into_state())))
            .await;
        let req = actix_test::TestRequest::get()
            .uri(&format!("/api/v1/resume-scores/latest/{student_id}"))
            .insert_header(auth)
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["overallScore"], 70.0);
    }

    #[actix_web::test]
    async fn latest_without_any_recorded_score_is_not_found() {
        let (_, auth) = bearer(Role::Admin);
        let mut mocks = Mocks::default();
        mocks
            .resume_scores
            .expect_find_latest()
            .returning(|_| Ok(None));

        let app = actix_test::init_service(App::new().configure(app_config(mocks.into_state())))
            .await;
        let req = actix_test::TestRequest::get()
            .uri(&format!("/api/v1/resume-scores/latest/{}", StudentId::random()))
            .insert_header(auth)
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
