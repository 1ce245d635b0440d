//! Student profile API handlers.
//!
//! ```text
//! GET    /api/v1/students
//! GET    /api/v1/students/{id}
//! GET    /api/v1/students/user/{user_id}
//! POST   /api/v1/students
//! PUT    /api/v1/students/{id}
//! DELETE /api/v1/students/{id}
//! ```
//!
//! Placement state (`isPlaced`, `placedCompanies`, `selectedCount`) is not
//! writable here; only the application workflow mutates it.

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::Deserialize;

use crate::domain::ids::{StudentId, UserId};
use crate::domain::student::{Branch, NewStudent, Student, StudentProfileUpdate};
use crate::domain::Error;
use crate::inbound::http::access::require_self_or_admin;
use crate::inbound::http::auth::Identity;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{require_non_empty, require_percentage, FieldName};
use crate::inbound::http::ApiResult;

/// Request body for `POST /api/v1/students`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentRequest {
    /// Linked login user.
    pub user_id: UserId,
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Roll number.
    pub roll_number: String,
    /// Contact number.
    pub mobile_number: String,
    /// Academic branch.
    pub branch: Branch,
    /// Aggregate percentage.
    pub percentage: f64,
    /// Stored resume path, if any.
    pub resume: Option<String>,
}

/// Request body for `PUT /api/v1/students/{id}`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentRequest {
    /// New full name.
    pub name: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New roll number.
    pub roll_number: Option<String>,
    /// New contact number.
    pub mobile_number: Option<String>,
    /// New academic branch.
    pub branch: Option<Branch>,
    /// New aggregate percentage.
    pub percentage: Option<f64>,
    /// New resume path.
    pub resume: Option<String>,
}

fn validate_create(payload: &CreateStudentRequest) -> Result<(), Error> {
    require_non_empty(&payload.name, FieldName::new("name"))?;
    require_non_empty(&payload.email, FieldName::new("email"))?;
    require_non_empty(&payload.roll_number, FieldName::new("rollNumber"))?;
    require_non_empty(&payload.mobile_number, FieldName::new("mobileNumber"))?;
    require_percentage(payload.percentage, FieldName::new("percentage"))
}

fn validate_update(payload: &UpdateStudentRequest) -> Result<(), Error> {
    if let Some(name) = &payload.name {
        require_non_empty(name, FieldName::new("name"))?;
    }
    if let Some(email) = &payload.email {
        require_non_empty(email, FieldName::new("email"))?;
    }
    if let Some(roll_number) = &payload.roll_number {
        require_non_empty(roll_number, FieldName::new("rollNumber"))?;
    }
    if let Some(percentage) = payload.percentage {
        require_percentage(percentage, FieldName::new("percentage"))?;
    }
    Ok(())
}

/// List every student profile.
#[get("/students")]
pub async fn list_students(
    identity: Identity,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<Student>>> {
    identity.require_admin()?;
    Ok(web::Json(state.students.list().await?))
}

/// Fetch one student profile.
#[get("/students/{id}")]
pub async fn get_student(
    identity: Identity,
    state: web::Data<HttpState>,
    path: web::Path<StudentId>,
) -> ApiResult<web::Json<Student>> {
    let id = path.into_inner();
    require_self_or_admin(&state.students, &identity, id).await?;
    let student = state
        .students
        .find(id)
        .await?
        .ok_or_else(|| Error::not_found("Student not found"))?;
    Ok(web::Json(student))
}

/// Fetch the student profile linked to a login user.
#[get("/students/user/{user_id}")]
pub async fn get_student_by_user(
    identity: Identity,
    state: web::Data<HttpState>,
    path: web::Path<UserId>,
) -> ApiResult<web::Json<Student>> {
    let user_id = path.into_inner();
    if !identity.is_admin() && identity.user_id != user_id {
        return Err(Error::forbidden("Access limited to your own records"));
    }
    let student = state
        .students
        .find_by_user(user_id)
        .await?
        .ok_or_else(|| Error::not_found("Student not found"))?;
    Ok(web::Json(student))
}

/// Create a student profile.
#[post("/students")]
pub async fn create_student(
    identity: Identity,
    state: web::Data<HttpState>,
    payload: web::Json<CreateStudentRequest>,
) -> ApiResult<HttpResponse> {
    identity.require_admin()?;
    let payload = payload.into_inner();
    validate_create(&payload)?;
    let created = state
        .students
        .insert(NewStudent {
            user_id: payload.user_id,
            name: payload.name,
            email: payload.email,
            roll_number: payload.roll_number,
            mobile_number: payload.mobile_number,
            branch: payload.branch,
            percentage: payload.percentage,
            resume: payload.resume,
        })
        .await?;
    Ok(HttpResponse::Created().json(created))
}

/// Update identity fields of a student profile.
#[put("/students/{id}")]
pub async fn update_student(
    identity: Identity,
    state: web::Data<HttpState>,
    path: web::Path<StudentId>,
    payload: web::Json<UpdateStudentRequest>,
) -> ApiResult<web::Json<Student>> {
    let id = path.into_inner();
    require_self_or_admin(&state.students, &identity, id).await?;
    let payload = payload.into_inner();
    validate_update(&payload)?;
    let updated = state
        .students
        .update_profile(
            id,
            StudentProfileUpdate {
                name: payload.name,
                email: payload.email,
                roll_number: payload.roll_number,
                mobile_number: payload.mobile_number,
                branch: payload.branch,
                percentage: payload.percentage,
                resume: payload.resume,
            },
        )
        .await?
        .ok_or_else(|| Error::not_found("Student not found"))?;
    Ok(web::Json(updated))
}

/// Delete a student profile.
#[delete("/students/{id}")]
pub async fn delete_student(
    identity: Identity,
    state: web::Data<HttpState>,
    path: web::Path<StudentId>,
) -> ApiResult<HttpResponse> {
    identity.require_admin()?;
    if state.students.delete(path.into_inner()).await? {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(Error::not_found("Student not found"))
    }
}
