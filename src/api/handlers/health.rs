// src/api/handlers/health.rs
use actix_web::{HttpResponse, Result, web};
use chrono::Utc;
use serde_json::json;

use crate::api::AppState;

pub async fn health_check(state: web::Data<AppState>) -> Result<HttpResponse> {
    let uptime = Utc::now().signed_duration_since(state.started_at);

    Ok(HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "heartguard",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_seconds": uptime.num_seconds()
    })))
}
