use actix_web::{web, HttpResponse};
use mongodb::bson::doc;
use serde::{Deserialize, Serialize};

use crate::{
    database::{DocumentStore, PRODUCTS},
    state::AppState,
};

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    /// Whether a trivial read against the store succeeded.
    pub database: bool,
    pub timestamp: i64,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Store unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let store: &dyn DocumentStore = state.store.as_ref();
    let database = match store.find_one(PRODUCTS, doc! {}).await {
        Ok(_) => true,
        Err(e) => {
            log::error!("❌ Health check: store unreachable: {}", e);
            false
        }
    };

    let body = HealthResponse {
        status: if database { "healthy" } else { "degraded" }.to_string(),
        service: "tooltrex-api".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database,
        timestamp: chrono::Utc::now().timestamp(),
    };

    if database {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}
