use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::DomainError;
use serde::Serialize;
use tracing::error;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    error_code: &'static str,
}

/// Error returned by handlers, rendered as `{ "error", "error_code" }`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    code: &'static str,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            code,
        }
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "AUTH_MISSING_IDENTITY", message)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound(msg) => {
                ApiError::new(StatusCode::NOT_FOUND, "RESOURCE_NOT_FOUND", msg)
            }
            DomainError::Unauthorized(msg) => {
                ApiError::new(StatusCode::FORBIDDEN, "AUTHZ_NOT_OWNER", msg)
            }
            DomainError::ValidationError(msg) => {
                ApiError::new(StatusCode::BAD_REQUEST, "VALID_INVALID_INPUT", msg)
            }
            DomainError::RepositoryError(msg) => {
                // Infrastructure details stay in the logs
                error!(error = %msg, "repository failure");
                ApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "SYSTEM_INTERNAL_ERROR",
                    "Internal server error",
                )
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::new(
            StatusCode::BAD_REQUEST,
            "VALID_INVALID_INPUT",
            rejection.body_text(),
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            error_code: self.code,
        };
        (self.status, Json(body)).into_response()
    }
}
