//! Notification API handlers.
//!
//! ```text
//! GET    /api/v1/notifications
//! POST   /api/v1/notifications
//! PUT    /api/v1/notifications/mark-all-read
//! PUT    /api/v1/notifications/{id}/read
//! DELETE /api/v1/notifications/{id}
//! ```
//!
//! `mark-all-read` is registered before the `{id}/read` route so the
//! literal segment is never captured as an id.

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::ids::NotificationId;
use crate::domain::notification::{Notification, NotificationDraft, RecipientSpec};
use crate::inbound::http::auth::Identity;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{require_non_empty, FieldName};
use crate::inbound::http::ApiResult;

/// Request body for `POST /api/v1/notifications`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotificationRequest {
    /// Headline.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Who the notification targets.
    pub recipients: RecipientSpec,
}

/// Response body for `PUT /api/v1/notifications/mark-all-read`.
#[derive(Debug, Serialize)]
pub struct MarkAllReadResponse {
    /// How many notifications were newly marked read.
    pub marked: u64,
}

/// List the caller's notifications, newest first.
#[get("/notifications")]
pub async fn list_notifications(
    identity: Identity,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<Notification>>> {
    Ok(web::Json(state.notifications.list_for(identity.viewer()).await?))
}

/// Publish a notification.
#[post("/notifications")]
pub async fn create_notification(
    identity: Identity,
    state: web::Data<HttpState>,
    payload: web::Json<CreateNotificationRequest>,
) -> ApiResult<HttpResponse> {
    identity.require_admin()?;
    let payload = payload.into_inner();
    require_non_empty(&payload.title, FieldName::new("title"))?;
    require_non_empty(&payload.message, FieldName::new("message"))?;
    let created = state
        .notifications
        .create(NotificationDraft {
            title: payload.title,
            message: payload.message,
            recipients: payload.recipients,
        })
        .await?;
    Ok(HttpResponse::Created().json(created))
}

/// Mark every notification in the caller's audience as read.
#[put("/notifications/mark-all-read")]
pub async fn mark_all_notifications_read(
    identity: Identity,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<MarkAllReadResponse>> {
    let marked = state.notifications.mark_all_read(identity.viewer()).await?;
    Ok(web::Json(MarkAllReadResponse { marked }))
}

/// Mark one notification as read for the caller. Idempotent.
#[put("/notifications/{id}/read")]
pub async fn mark_notification_read(
    identity: Identity,
    state: web::Data<HttpState>,
    path: web::Path<NotificationId>,
) -> ApiResult<web::Json<Notification>> {
    let updated = state
        .notifications
        .mark_read(path.into_inner(), identity.viewer())
        .await?;
    Ok(web::Json(updated))
}

/// Delete a notification.
#[delete("/notifications/{id}")]
pub async fn delete_notification(
    identity: Identity,
    state: web::Data<HttpState>,
    path: web::Path<NotificationId>,
) -> ApiResult<HttpResponse> {
    identity.require_admin()?;
    state.notifications.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
