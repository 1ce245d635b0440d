//! Application API handlers.
//!
//! ```text
//! POST   /api/v1/applications
//! GET    /api/v1/applications
//! GET    /api/v1/applications/{id}
//! GET    /api/v1/applications/student/{student_id}
//! GET    /api/v1/applications/drive/{drive_id}
//! PUT    /api/v1/applications/{id}/status
//! PUT    /api/v1/applications/{id}/attendance
//! PUT    /api/v1/applications/{id}/resume
//! DELETE /api/v1/applications/{id}
//! ```
//!
//! Every mutation routes through the workflow service; there is no direct
//! write path to application rows.

use actix_web::{delete, get, post, put, web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use crate::domain::application::{Application, ApplicationStatus};
use crate::domain::ids::{ApplicationId, DriveId, StudentId};
use crate::domain::ports::ApplyRequest;
use crate::domain::transition::TransitionRequest;
use crate::domain::Error;
use crate::inbound::http::access::require_self_or_admin;
use crate::inbound::http::auth::Identity;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{require_non_empty, FieldName};
use crate::inbound::http::ApiResult;

/// Request body for `POST /api/v1/applications`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationRequest {
    /// Applying student.
    pub student_id: StudentId,
    /// Target drive.
    pub drive_id: DriveId,
    /// Resume to attach; defaults to the student's stored resume.
    pub resume_url: Option<String>,
}

/// Request body for `PUT /api/v1/applications/{id}/status`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateRequest {
    /// Target status name.
    pub status: Option<String>,
    /// Round reached; fractional values are rounded.
    pub current_round: Option<f64>,
    /// Next round date, stored when shortlisting.
    pub next_round_date: Option<DateTime<Utc>>,
}

/// Request body for `PUT /api/v1/applications/{id}/attendance`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRequest {
    /// Whether the student attended.
    pub is_present: bool,
}

/// Request body for `PUT /api/v1/applications/{id}/resume`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRequest {
    /// Replacement resume path.
    pub resume_url: String,
}

fn parse_status(value: Option<String>) -> Result<Option<ApplicationStatus>, Error> {
    value
        .map(|raw| {
            raw.parse::<ApplicationStatus>().map_err(|_| {
                Error::invalid_request(
                    "status must be one of applied, shortlisted, rejected, selected",
                )
                .with_details(json!({ "field": "status", "value": raw }))
            })
        })
        .transpose()
}

/// Create an application for a drive.
#[post("/applications")]
pub async fn create_application(
    identity: Identity,
    state: web::Data<HttpState>,
    payload: web::Json<CreateApplicationRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    require_self_or_admin(&state.students, &identity, payload.student_id).await?;
    let created = state
        .workflow
        .apply(ApplyRequest {
            student_id: payload.student_id,
            drive_id: payload.drive_id,
            resume_url: payload.resume_url,
        })
        .await?;
    Ok(HttpResponse::Created().json(created))
}

/// List every application.
#[get("/applications")]
pub async fn list_applications(
    identity: Identity,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<Application>>> {
    identity.require_admin()?;
    Ok(web::Json(state.applications.list().await?))
}

/// Fetch one application.
#[get("/applications/{id}")]
pub async fn get_application(
    identity: Identity,
    state: web::Data<HttpState>,
    path: web::Path<ApplicationId>,
) -> ApiResult<web::Json<Application>> {
    let application = state
        .applications
        .find(path.into_inner())
        .await?
        .ok_or_else(|| Error::not_found("Application not found"))?;
    require_self_or_admin(&state.students, &identity, application.student_id).await?;
    Ok(web::Json(application))
}

/// List a student's applications.
#[get("/applications/student/{student_id}")]
pub async fn list_applications_for_student(
    identity: Identity,
    state: web::Data<HttpState>,
    path: web::Path<StudentId>,
) -> ApiResult<web::Json<Vec<Application>>> {
    let student_id = path.into_inner();
    require_self_or_admin(&state.students, &identity, student_id).await?;
    Ok(web::Json(state.applications.list_for_student(student_id).await?))
}

/// List a drive's applications. Admins see all; a student sees only their
/// own entry for the drive.
#[get("/applications/drive/{drive_id}")]
pub async fn list_applications_for_drive(
    identity: Identity,
    state: web::Data<HttpState>,
    path: web::Path<DriveId>,
) -> ApiResult<web::Json<Vec<Application>>> {
    let drive_id = path.into_inner();
    let applications = state.applications.list_for_drive(drive_id).await?;
    if identity.is_admin() {
        return Ok(web::Json(applications));
    }
    let own = match state.students.find_by_user(identity.user_id).await? {
        Some(student) => applications
            .into_iter()
            .filter(|a| a.student_id == student.id)
            .collect(),
        None => Vec::new(),
    };
    Ok(web::Json(own))
}

/// Transition an application's status and/or round.
#[put("/applications/{id}/status")]
pub async fn update_application_status(
    identity: Identity,
    state: web::Data<HttpState>,
    path: web::Path<ApplicationId>,
    payload: web::Json<StatusUpdateRequest>,
) -> ApiResult<web::Json<Application>> {
    identity.require_admin()?;
    let payload = payload.into_inner();
    let request = TransitionRequest {
        status: parse_status(payload.status)?,
        current_round: payload.current_round,
        next_round_date: payload.next_round_date,
    };
    let updated = state.workflow.update_status(path.into_inner(), request).await?;
    Ok(web::Json(updated))
}

/// Mark attendance for an application.
#[put("/applications/{id}/attendance")]
pub async fn mark_application_attendance(
    identity: Identity,
    state: web::Data<HttpState>,
    path: web::Path<ApplicationId>,
    payload: web::Json<AttendanceRequest>,
) -> ApiResult<web::Json<Application>> {
    identity.require_admin()?;
    let updated = state
        .workflow
        .mark_attendance(path.into_inner(), payload.is_present)
        .await?;
    Ok(web::Json(updated))
}

/// Replace the resume attached to an application.
#[put("/applications/{id}/resume")]
pub async fn update_application_resume(
    identity: Identity,
    state: web::Data<HttpState>,
    path: web::Path<ApplicationId>,
    payload: web::Json<ResumeRequest>,
) -> ApiResult<web::Json<Application>> {
    let id = path.into_inner();
    let payload = payload.into_inner();
    require_non_empty(&payload.resume_url, FieldName::new("resumeUrl"))?;
    let application = state
        .applications
        .find(id)
        .await?
        .ok_or_else(|| Error::not_found("Application not found"))?;
    require_self_or_admin(&state.students, &identity, application.student_id).await?;
    let updated = state.workflow.update_resume(id, payload.resume_url).await?;
    Ok(web::Json(updated))
}

/// Delete an application.
#[delete("/applications/{id}")]
pub async fn delete_application(
    identity: Identity,
    state: web::Data<HttpState>,
    path: web::Path<ApplicationId>,
) -> ApiResult<HttpResponse> {
    identity.require_admin()?;
    if state.applications.delete(path.into_inner()).await? {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(Error::not_found("Application not found"))
    }
}
