use std::io::Error as IoError;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use liveness::LivenessError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0:#}")]
    Io(#[from] IoError),
    #[error("Address parsing error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Liveness(#[from] LivenessError),
}

/// Request-level failures of the JSON API
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("URL parameter required")]
    MissingUrl,
    #[error(transparent)]
    Liveness(#[from] LivenessError),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingUrl => StatusCode::BAD_REQUEST,
            ApiError::Liveness(LivenessError::PassInProgress) => StatusCode::CONFLICT,
            ApiError::Liveness(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody { error: &self.to_string() })
    }
}
