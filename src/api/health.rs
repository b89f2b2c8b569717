use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use crate::database::MongoDB;

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub database: bool,
    pub timestamp: i64,
}

pub async fn root() -> impl Responder {
    HttpResponse::Ok().body("server is running")
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service status; `degraded` when the database is unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(db: web::Data<MongoDB>) -> impl Responder {
    let database = db.ping().await;
    if !database {
        log::warn!("⚠️  Health check: database ping failed");
    }

    HttpResponse::Ok().json(HealthResponse {
        status: (if database { "healthy" } else { "degraded" }).to_string(),
        service: "garden-nest-service".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database,
        timestamp: chrono::Utc::now().timestamp(),
    })
}
