use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use models::ErrorResponse;
use thiserror::Error;

/// Every failure a route can report. The message is what the client sees.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Content Policy: {0}")]
    ContentPolicy(String),
    #[error("Too Many Requests: {0}")]
    TooManyRequests(String),
    #[error("Not Configured: {0}")]
    NotConfigured(String),
    #[error("Internal Server Error: {0}")]
    InternalError(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::ContentPolicy(_) => StatusCode::BAD_REQUEST,
            ApiError::TooManyRequests(_) => StatusCode::TOO_MANY_REQUESTS,
            ApiError::NotConfigured(_) | ApiError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::ContentPolicy(msg)
            | ApiError::TooManyRequests(msg)
            | ApiError::NotConfigured(msg)
            | ApiError::InternalError(msg) => msg,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse::new(self.message());
        (self.status_code(), Json(body)).into_response()
    }
}
