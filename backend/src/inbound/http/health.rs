//! Liveness and readiness probes. Unauthenticated.

use std::sync::Arc;

use actix_web::{get, web, HttpResponse};
use serde_json::json;

use crate::domain::ports::ReadinessProbe;

/// Process liveness.
#[get("/health/live")]
pub async fn live() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

/// Readiness to serve traffic.
///
/// Consults the injected probe (backed by the database pool), so an
/// unreachable database answers 503 while the process stays live.
#[get("/health/ready")]
pub async fn ready(probe: web::Data<dyn ReadinessProbe>) -> HttpResponse {
    if probe.is_ready().await {
        HttpResponse::Ok().json(json!({ "status": "ok" }))
    } else {
        HttpResponse::ServiceUnavailable().json(json!({ "status": "unavailable" }))
    }
}

/// Register both probes behind the given readiness probe.
pub fn configure(probe: Arc<dyn ReadinessProbe>) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::from(probe))
            .service(live)
            .service(ready);
    }
}
