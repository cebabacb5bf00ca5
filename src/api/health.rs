use crate::database::ShopStore;
use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

pub const ROOT_MESSAGE: &str = "Medical Shop API Running";

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub database: String,
    pub timestamp: i64,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses(
        (status = 200, description = "Static banner", body = String, content_type = "text/plain")
    )
)]
pub async fn root() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(ROOT_MESSAGE)
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service and database are healthy", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(store: web::Data<dyn ShopStore>) -> impl Responder {
    let (status, database) = match store.ping().await {
        Ok(()) => ("healthy", "connected"),
        Err(e) => {
            log::warn!("⚠️  Health check: database ping failed: {}", e);
            ("degraded", "unreachable")
        }
    };

    let body = HealthResponse {
        status: status.to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
        timestamp: chrono::Utc::now().timestamp(),
    };

    if database == "connected" {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}
