//! Company API handlers.
//!
//! ```text
//! GET    /api/v1/companies
//! GET    /api/v1/companies/{id}
//! POST   /api/v1/companies
//! PUT    /api/v1/companies/{id}
//! DELETE /api/v1/companies/{id}
//! ```

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::Deserialize;

use crate::domain::company::{Company, CompanyUpdate, NewCompany};
use crate::domain::ids::CompanyId;
use crate::domain::Error;
use crate::inbound::http::auth::Identity;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{require_non_empty, FieldName};
use crate::inbound::http::ApiResult;

/// Request body for `POST /api/v1/companies`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompanyRequest {
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Logo path or URL.
    pub logo: Option<String>,
    /// Company website.
    pub website: Option<String>,
    /// Office location.
    pub location: Option<String>,
}

/// Request body for `PUT /api/v1/companies/{id}`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCompanyRequest {
    /// New display name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New logo.
    pub logo: Option<String>,
    /// New website.
    pub website: Option<String>,
    /// New location.
    pub location: Option<String>,
}

/// List every company.
#[get("/companies")]
pub async fn list_companies(
    _identity: Identity,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<Company>>> {
    Ok(web::Json(state.companies.list().await?))
}

/// Fetch one company.
#[get("/companies/{id}")]
pub async fn get_company(
    _identity: Identity,
    state: web::Data<HttpState>,
    path: web::Path<CompanyId>,
) -> ApiResult<web::Json<Company>> {
    let company = state
        .companies
        .find(path.into_inner())
        .await?
        .ok_or_else(|| Error::not_found("Company not found"))?;
    Ok(web::Json(company))
}

/// Create a company.
#[post("/companies")]
pub async fn create_company(
    identity: Identity,
    state: web::Data<HttpState>,
    payload: web::Json<CreateCompanyRequest>,
) -> ApiResult<HttpResponse> {
    identity.require_admin()?;
    let payload = payload.into_inner();
    require_non_empty(&payload.name, FieldName::new("name"))?;
    let created = state
        .companies
        .insert(NewCompany {
            name: payload.name,
            description: payload.description,
            logo: payload.logo,
            website: payload.website,
            location: payload.location,
        })
        .await?;
    Ok(HttpResponse::Created().json(created))
}

/// Update a company.
///
/// A rename does not fan out to drives that copied the old name.
#[put("/companies/{id}")]
pub async fn update_company(
    identity: Identity,
    state: web::Data<HttpState>,
    path: web::Path<CompanyId>,
    payload: web::Json<UpdateCompanyRequest>,
) -> ApiResult<web::Json<Company>> {
    identity.require_admin()?;
    let payload = payload.into_inner();
    if let Some(name) = &payload.name {
        require_non_empty(name, FieldName::new("name"))?;
    }
    let updated = state
        .companies
        .update(
            path.into_inner(),
            CompanyUpdate {
                name: payload.name,
                description: payload.description,
                logo: payload.logo,
                website: payload.website,
                location: payload.location,
            },
        )
        .await?
        .ok_or_else(|| Error::not_found("Company not found"))?;
    Ok(web::Json(updated))
}

/// Delete a company; refused while drives still reference it.
#[delete("/companies/{id}")]
pub async fn delete_company(
    identity: Identity,
    state: web::Data<HttpState>,
    path: web::Path<CompanyId>,
) -> ApiResult<HttpResponse> {
    identity.require_admin()?;
    state.drive_admin.delete_company(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
