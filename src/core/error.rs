use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::features::forms::FieldErrors;
use crate::shared::types::ApiResponse;

#[derive(Debug, Error)]
#[allow(dead_code)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid fields: {0}")]
    InvalidFields(FieldErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Business-rule rejection: too many entities of one kind are featured
    #[error("Featured limit reached: {0}")]
    FeaturedLimit(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),
}

impl AppError {
    /// Message suitable for a transient notification next to a form.
    ///
    /// Upstream and internal failures collapse to a generic sentence; the
    /// detail has already been logged where the error was raised.
    pub fn notification(&self) -> String {
        match self {
            AppError::FeaturedLimit(msg)
            | AppError::Conflict(msg)
            | AppError::Validation(msg)
            | AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::Forbidden(msg) => msg.clone(),
            AppError::InvalidFields(_) => "Please fix the highlighted fields".to_string(),
            AppError::Unauthorized(_) => "Your session has expired, please sign in again".to_string(),
            AppError::Internal(_) | AppError::ExternalServiceError(_) => {
                "Something went wrong, please try again".to_string()
            }
        }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidFields(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) | AppError::FeaturedLimit(_) => StatusCode::CONFLICT,
            AppError::ExternalServiceError(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (message, errors) = match self {
            AppError::Validation(ref msg) => (msg.clone(), Some(vec![msg.clone()])),
            AppError::InvalidFields(ref fields) => {
                ("Validation failed".to_string(), Some(fields.messages()))
            }
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                ("Internal server error".to_string(), None)
            }
            AppError::ExternalServiceError(ref msg) => {
                tracing::error!("External service error: {}", msg);
                (msg.clone(), None)
            }
            AppError::NotFound(ref msg)
            | AppError::BadRequest(ref msg)
            | AppError::Unauthorized(ref msg)
            | AppError::Forbidden(ref msg)
            | AppError::Conflict(ref msg)
            | AppError::FeaturedLimit(ref msg) => (msg.clone(), None),
        };

        let body = Json(ApiResponse::<()>::error(Some(message), errors));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_hides_upstream_detail() {
        let err = AppError::ExternalServiceError("HTTP 502 from upstream".to_string());
        assert_eq!(err.notification(), "Something went wrong, please try again");
    }

    #[test]
    fn test_notification_keeps_business_message() {
        let err = AppError::FeaturedLimit("Only 3 projects can be featured".to_string());
        assert_eq!(err.notification(), "Only 3 projects can be featured");
    }

    #[test]
    fn test_status_codes() {
        let response = AppError::FeaturedLimit("x".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = AppError::InvalidFields(FieldErrors::default()).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let response = AppError::ExternalServiceError("down".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
