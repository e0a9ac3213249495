// src/api/handlers/risk.rs
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, web};
use log::info;
use serde_json::Value;

use crate::errors::{HeartGuardError, Result};
use crate::risk;

/// Scores the JSON body. Field-level problems are absorbed by the
/// calculator; only an empty or undecodable body is rejected.
pub async fn assess_risk(body: web::Bytes) -> Result<HttpResponse> {
    if body.is_empty() {
        return Err(HeartGuardError::EmptyBody);
    }

    let payload: Value = serde_json::from_slice(&body)?;
    let result = risk::assess(&payload);
    info!("Risk score computed: {}", result.risk_score);

    Ok(HttpResponse::Ok().json(result))
}

/// Answers the browser's cross-origin pre-flight check.
pub async fn preflight() -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .insert_header((header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"))
        .insert_header((header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"))
        .finish()
}

pub async fn method_not_allowed(req: HttpRequest) -> Result<HttpResponse> {
    Err(HeartGuardError::MethodNotAllowed(req.method().clone()))
}
