//! Placement drive API handlers.
//!
//! ```text
//! GET    /api/v1/drives
//! GET    /api/v1/drives/{id}
//! POST   /api/v1/drives
//! PUT    /api/v1/drives/{id}
//! DELETE /api/v1/drives/{id}
//! ```
//!
//! Writes route through the drive administration service so the linked
//! calendar event stays in lockstep.

use actix_web::{delete, get, post, put, web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::drive::{CtcRange, DriveUpdate, NewDrive, PlacementDrive};
use crate::domain::event::Event;
use crate::domain::ids::{CompanyId, DriveId};
use crate::domain::student::Branch;
use crate::domain::Error;
use crate::inbound::http::auth::Identity;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    require_non_empty, require_non_empty_list, require_ordered_range, require_percentage,
    require_positive, FieldName,
};
use crate::inbound::http::ApiResult;

/// Request body for `POST /api/v1/drives`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDriveRequest {
    /// Owning company.
    pub company_id: CompanyId,
    /// Role title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Free-text requirements.
    pub requirements: String,
    /// Branches eligible to apply.
    pub eligible_branches: Vec<Branch>,
    /// Minimum aggregate percentage.
    pub minimum_percentage: f64,
    /// Offered compensation range.
    pub ctc_range: CtcRange,
    /// Number of hiring rounds.
    pub number_of_rounds: i32,
    /// External application link.
    pub application_link: Option<String>,
    /// Date the drive takes place.
    pub drive_date: DateTime<Utc>,
    /// Application deadline.
    pub last_date_to_apply: DateTime<Utc>,
}

/// Request body for `PUT /api/v1/drives/{id}`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDriveRequest {
    /// New denormalised company name.
    pub company_name: Option<String>,
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New requirements.
    pub requirements: Option<String>,
    /// New eligible branch set.
    pub eligible_branches: Option<Vec<Branch>>,
    /// New minimum percentage.
    pub minimum_percentage: Option<f64>,
    /// New compensation range.
    pub ctc_range: Option<CtcRange>,
    /// New round count.
    pub number_of_rounds: Option<i32>,
    /// New application link.
    pub application_link: Option<String>,
    /// New drive date.
    pub drive_date: Option<DateTime<Utc>>,
    /// New application deadline.
    pub last_date_to_apply: Option<DateTime<Utc>>,
}

/// Response body for `POST /api/v1/drives`: the drive plus the calendar
/// event created alongside it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedDriveResponse {
    /// The created drive.
    pub drive: PlacementDrive,
    /// Its system-managed calendar event.
    pub event: Event,
}

fn validate_create(payload: &CreateDriveRequest) -> Result<(), Error> {
    require_non_empty(&payload.title, FieldName::new("title"))?;
    require_non_empty_list(&payload.eligible_branches, FieldName::new("eligibleBranches"))?;
    require_percentage(payload.minimum_percentage, FieldName::new("minimumPercentage"))?;
    require_ordered_range(
        payload.ctc_range.min,
        payload.ctc_range.max,
        FieldName::new("ctcRange"),
    )?;
    require_positive(payload.number_of_rounds, FieldName::new("numberOfRounds"))
}

fn validate_update(payload: &UpdateDriveRequest) -> Result<(), Error> {
    if let Some(title) = &payload.title {
        require_non_empty(title, FieldName::new("title"))?;
    }
    if let Some(branches) = &payload.eligible_branches {
        require_non_empty_list(branches, FieldName::new("eligibleBranches"))?;
    }
    if let Some(percentage) = payload.minimum_percentage {
        require_percentage(percentage, FieldName::new("minimumPercentage"))?;
    }
    if let Some(range) = payload.ctc_range {
        require_ordered_range(range.min, range.max, FieldName::new("ctcRange"))?;
    }
    if let Some(rounds) = payload.number_of_rounds {
        require_positive(rounds, FieldName::new("numberOfRounds"))?;
    }
    Ok(())
}

/// List every drive.
#[get("/drives")]
pub async fn list_drives(
    _identity: Identity,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<PlacementDrive>>> {
    Ok(web::Json(state.drives.list().await?))
}

/// Fetch one drive.
#[get("/drives/{id}")]
pub async fn get_drive(
    _identity: Identity,
    state: web::Data<HttpState>,
    path: web::Path<DriveId>,
) -> ApiResult<web::Json<PlacementDrive>> {
    let drive = state
        .drives
        .find(path.into_inner())
        .await?
        .ok_or_else(|| Error::not_found("Placement drive not found"))?;
    Ok(web::Json(drive))
}

/// Create a drive and its calendar event.
#[post("/drives")]
pub async fn create_drive(
    identity: Identity,
    state: web::Data<HttpState>,
    payload: web::Json<CreateDriveRequest>,
) -> ApiResult<HttpResponse> {
    identity.require_admin()?;
    let payload = payload.into_inner();
    validate_create(&payload)?;
    let (drive, event) = state
        .drive_admin
        .create(NewDrive {
            company_id: payload.company_id,
            // The service replaces this with the stored company name.
            company_name: String::new(),
            title: payload.title,
            description: payload.description,
            requirements: payload.requirements,
            eligible_branches: payload.eligible_branches,
            minimum_percentage: payload.minimum_percentage,
            ctc_range: payload.ctc_range,
            number_of_rounds: payload.number_of_rounds,
            application_link: payload.application_link,
            drive_date: payload.drive_date,
            last_date_to_apply: payload.last_date_to_apply,
        })
        .await?;
    Ok(HttpResponse::Created().json(CreatedDriveResponse { drive, event }))
}

/// Update a drive, syncing its calendar event.
#[put("/drives/{id}")]
pub async fn update_drive(
    identity: Identity,
    state: web::Data<HttpState>,
    path: web::Path<DriveId>,
    payload: web::Json<UpdateDriveRequest>,
) -> ApiResult<web::Json<PlacementDrive>> {
    identity.require_admin()?;
    let payload = payload.into_inner();
    validate_update(&payload)?;
    let updated = state
        .drive_admin
        .update(
            path.into_inner(),
            DriveUpdate {
                company_name: payload.company_name,
                title: payload.title,
                description: payload.description,
                requirements: payload.requirements,
                eligible_branches: payload.eligible_branches,
                minimum_percentage: payload.minimum_percentage,
                ctc_range: payload.ctc_range,
                number_of_rounds: payload.number_of_rounds,
                application_link: payload.application_link,
                drive_date: payload.drive_date,
                last_date_to_apply: payload.last_date_to_apply,
            },
        )
        .await?;
    Ok(web::Json(updated))
}

/// Delete a drive, cascading applications and the linked event.
#[delete("/drives/{id}")]
pub async fn delete_drive(
    identity: Identity,
    state: web::Data<HttpState>,
    path: web::Path<DriveId>,
) -> ApiResult<HttpResponse> {
    identity.require_admin()?;
    state.drive_admin.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test as actix_test, App};
    use serde_json::{json, Value};

    use crate::domain::user::Role;
    use crate::inbound::http::test_support::{
        bearer, sample_drive, sample_event, sample_time, verifier_data, Mocks,
    };
    use chrono::Duration;

    fn app_config(state: HttpState) -> impl FnOnce(&mut web::ServiceConfig) {
        move |cfg| {
            cfg.app_data(verifier_data())
                .app_data(web::Data::new(state))
                .service(
                    web::scope("/api/v1")
                        .service(list_drives)
                        .service(get_drive)
                        .service(create_drive)
                        .service(update_drive)
                        .service(delete_drive),
                );
        }
    }

    fn create_payload(company_id: CompanyId) -> Value {
        json!({
            "companyId": company_id,
            "title": "Graduate Engineer",
            "description": "Campus hiring",
            "requirements": "None",
            "eligibleBranches": ["cse", "it"],
            "minimumPercentage": 70.0,
            "ctcRange": { "min": 6.0, "max": 9.0 },
            "numberOfRounds": 2,
            "driveDate": sample_time() + Duration::days(30),
            "lastDateToApply": sample_time() + Duration::days(10),
        })
    }

    #[actix_web::test]
    async fn student_cannot_create_a_drive() {
        let (_, auth) = bearer(Role::Student);
        let app = actix_test::init_service(
            App::new().configure(app_config(Mocks::default().into_state())),
        )
        .await;
        let req = actix_test::TestRequest::post()
            .uri("/api/v1/drives")
            .insert_header(auth)
            .set_json(create_payload(CompanyId::random()))
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn create_returns_drive_with_linked_event() {
        let (_, auth) = bearer(Role::Admin);
        let company_id = CompanyId::random();

        let mut mocks = Mocks::default();
        mocks.drive_admin.expect_create().returning(|new| {
            let mut drive = sample_drive(new.company_id);
            drive.title = new.title;
            let event = sample_event(Some(drive.id));
            Ok((drive, event))
        });

        let app = actix_test::init_service(App::new().configure(app_config(mocks.into_state())))
            .await;
        let req = actix_test::TestRequest::post()
            .uri("/api/v1/drives")
            .insert_header(auth)
            .set_json(create_payload(company_id))
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["drive"]["title"], "Graduate Engineer");
        assert_eq!(body["event"]["driveId"], body["drive"]["id"]);
    }

    #[actix_web::test]
    async fn zero_rounds_is_rejected() {
        let (_, auth) = bearer(Role::Admin);
        let app = actix_test::init_service(
            App::new().configure(app_config(Mocks::default().into_state())),
        )
        .await;
        let mut payload = create_payload(CompanyId::random());
        payload["numberOfRounds"] = json!(0);
        let req = actix_test::TestRequest::post()
            .uri("/api/v1/drives")
            .insert_header(auth)
            .set_json(payload)
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], "numberOfRounds");
    }

    #[actix_web::test]
    async fn inverted_ctc_range_is_rejected() {
        let (_, auth) = bearer(Role::Admin);
        let app = actix_test::init_service(
            App::new().configure(app_config(Mocks::default().into_state())),
        )
        .await;
        let mut payload = create_payload(CompanyId::random());
        payload["ctcRange"] = json!({ "min": 9.0, "max": 6.0 });
        let req = actix_test::TestRequest::post()
            .uri("/api/v1/drives")
            .insert_header(auth)
            .set_json(payload)
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn any_authenticated_user_reads_drives() {
        let (_, auth) = bearer(Role::Student);
        let mut mocks = Mocks::default();
        mocks
            .drives
            .expect_list()
            .returning(|| Ok(vec![sample_drive(CompanyId::random())]));

        let app = actix_test::init_service(App::new().configure(app_config(mocks.into_state())))
            .await;
        let req = actix_test::TestRequest::get()
            .uri("/api/v1/drives")
            .insert_header(auth)
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn update_passes_through_to_the_service() {
        let (_, auth) = bearer(Role::Admin);
        let drive = sample_drive(CompanyId::random());
        let id = drive.id;

        let mut mocks = Mocks::default();
        mocks
            .drive_admin
            .expect_update()
            .withf(move |got_id, update| {
                *got_id == id && update.title.as_deref() == Some("Senior Engineer")
            })
            .returning(move |_, update| {
                let mut updated = drive.clone();
                if let Some(title) = update.title {
                    updated.title = title;
                }
                Ok(updated)
            });

        let app = actix_test::init_service(App::new().configure(app_config(mocks.into_state())))
            .await;
        let req = actix_test::TestRequest::put()
            .uri(&format!("/api/v1/drives/{id}"))
            .insert_header(auth)
            .set_json(json!({ "title": "Senior Engineer" }))
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["title"], "Senior Engineer");
    }

    #[actix_web::test]
    async fn delete_cascades_through_the_service() {
        let (_, auth) = bearer(Role::Admin);
        let mut mocks = Mocks::default();
        mocks.drive_admin.expect_delete().returning(|_| Ok(()));

        let app = actix_test::init_service(App::new().configure(app_config(mocks.into_state())))
            .await;
        let req = actix_test::TestRequest::delete()
            .uri(&format!("/api/v1/drives/{}", DriveId::random()))
            .insert_header(auth)
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }
}
