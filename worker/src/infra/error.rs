use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use certificate_dispatch_processor::error::CertificateDispatchError;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub struct AppError {
    pub status_code: u16,
    pub cause: String,
    pub message: Option<String>,
}

impl AppError {
    pub fn new(
        cause: &str,
        message: &str,
    ) -> Self {
        Self {
            status_code: 500,
            cause: cause.to_string(),
            message: Some(message.to_string()),
        }
    }

    pub fn conflict(
        cause: &str,
        message: &str,
    ) -> Self {
        Self {
            status_code: 409,
            cause: cause.to_string(),
            message: Some(message.to_string()),
        }
    }

    pub fn not_found(
        cause: &str,
        message: &str,
    ) -> Self {
        Self {
            status_code: 404,
            cause: cause.to_string(),
            message: Some(message.to_string()),
        }
    }
}

impl std::error::Error for AppError {}

impl fmt::Display for AppError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.cause)
    }
}

impl From<CertificateDispatchError> for AppError {
    fn from(error: CertificateDispatchError) -> Self {
        Self {
            status_code: error.status_code,
            cause: error.cause,
            message: error.message,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status_code: 400,
            cause: rejection.body_text(),
            message: Some("Invalid request body".to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = Json(json!({
            "cause": self.cause,
            "message": self.message,
        }));

        (status, body).into_response()
    }
}
