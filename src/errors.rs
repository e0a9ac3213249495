// src/errors.rs
use actix_web::http::{Method, StatusCode, header};
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::models::ApiError;

#[derive(Error, Debug)]
pub enum HeartGuardError {
    #[error("Failed to read file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Malformed JSON body: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Request body is empty")]
    EmptyBody,

    #[error("Method {0} is not supported; use POST or OPTIONS")]
    MethodNotAllowed(Method),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, HeartGuardError>;

impl ResponseError for HeartGuardError {
    fn status_code(&self) -> StatusCode {
        match self {
            HeartGuardError::JsonParse(_) | HeartGuardError::EmptyBody => StatusCode::BAD_REQUEST,
            HeartGuardError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let HeartGuardError::MethodNotAllowed(_) = self {
            builder.insert_header((header::ALLOW, "POST, OPTIONS"));
        }
        builder.json(ApiError {
            error: self.to_string(),
        })
    }
}
