//! Calendar event API handlers.
//!
//! ```text
//! GET    /api/v1/events
//! GET    /api/v1/events/{id}
//! POST   /api/v1/events
//! PUT    /api/v1/events/{id}
//! DELETE /api/v1/events/{id}
//! ```
//!
//! Manual events are created and edited here. Events carrying a
//! `driveId` are managed by their drive and refuse direct writes.

use actix_web::{delete, get, post, put, web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::event::{Event, EventUpdate, NewEvent};
use crate::domain::ids::EventId;
use crate::domain::Error;
use crate::inbound::http::auth::Identity;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{require_non_empty, FieldName};
use crate::inbound::http::ApiResult;

/// Request body for `POST /api/v1/events`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    /// Event title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// When the event happens.
    pub date: DateTime<Utc>,
}

/// Request body for `PUT /api/v1/events/{id}`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New date.
    pub date: Option<DateTime<Utc>>,
}

async fn manually_editable(state: &HttpState, id: EventId) -> Result<Event, Error> {
    let event = state
        .events
        .find(id)
        .await?
        .ok_or_else(|| Error::not_found("Event not found"))?;
    if event.is_drive_managed() {
        return Err(Error::invalid_request(
            "Drive-linked events are managed through their drive",
        ));
    }
    Ok(event)
}

/// List every event.
#[get("/events")]
pub async fn list_events(
    _identity: Identity,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<Event>>> {
    Ok(web::Json(state.events.list().await?))
}

/// Fetch one event.
#[get("/events/{id}")]
pub async fn get_event(
    _identity: Identity,
    state: web::Data<HttpState>,
    path: web::Path<EventId>,
) -> ApiResult<web::Json<Event>> {
    let event = state
        .events
        .find(path.into_inner())
        .await?
        .ok_or_else(|| Error::not_found("Event not found"))?;
    Ok(web::Json(event))
}

/// Create a manual event. Drive-linked events come from drive creation,
/// never from this endpoint.
#[post("/events")]
pub async fn create_event(
    identity: Identity,
    state: web::Data<HttpState>,
    payload: web::Json<CreateEventRequest>,
) -> ApiResult<HttpResponse> {
    identity.require_admin()?;
    let payload = payload.into_inner();
    require_non_empty(&payload.title, FieldName::new("title"))?;
    let created = state
        .events
        .insert(NewEvent {
            title: payload.title,
            description: payload.description,
            date: payload.date,
            drive_id: None,
        })
        .await?;
    Ok(HttpResponse::Created().json(created))
}

/// Update a manual event.
#[put("/events/{id}")]
pub async fn update_event(
    identity: Identity,
    state: web::Data<HttpState>,
    path: web::Path<EventId>,
    payload: web::Json<UpdateEventRequest>,
) -> ApiResult<web::Json<Event>> {
    identity.require_admin()?;
    let payload = payload.into_inner();
    if let Some(title) = &payload.title {
        require_non_empty(title, FieldName::new("title"))?;
    }
    let id = path.into_inner();
    manually_editable(&state, id).await?;
    let updated = state
        .events
        .update(
            id,
            EventUpdate {
                title: payload.title,
                description: payload.description,
                date: payload.date,
            },
        )
        .await?
        .ok_or_else(|| Error::not_found("Event not found"))?;
    Ok(web::Json(updated))
}

/// Delete a manual event.
#[delete("/events/{id}")]
pub async fn delete_event(
    identity: Identity,
    state: web::Data<HttpState>,
    path: web::Path<EventId>,
) -> ApiResult<HttpResponse> {
    identity.require_admin()?;
    let id = path.into_inner();
    manually_editable(&state, id).await?;
    if state.events.delete(id).await? {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(Error::not_found("Event not found"))
    }
}
