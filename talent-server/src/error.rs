//! HTTP error mapping
//!
//! Every failure leaves the server as `{"status": "error", "message": ...}`.

use axum::{
    extract::rejection::{FormRejection, JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use talent_common::Error as CommonError;
use thiserror::Error;
use tracing::error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// No session cookie, or the session expired (401)
    #[error("Authentication required")]
    Unauthenticated,

    /// Malformed request body or path (400)
    #[error("{0}")]
    BadRequest(String),

    /// Blocking task failed to complete (500)
    #[error("Internal server error: {0}")]
    Internal(String),

    /// talent-common error
    #[error(transparent)]
    Common(#[from] CommonError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Common(err) => match err {
                CommonError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                CommonError::Forbidden => StatusCode::FORBIDDEN,
                CommonError::NotFound(_) | CommonError::MissingData => StatusCode::NOT_FOUND,
                CommonError::DuplicateUsername(_)
                | CommonError::SelfDeletion
                | CommonError::LastAdminProtected
                | CommonError::ColumnNotFound(_)
                | CommonError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            error!("Request failed: {}", message);
        }

        let body = Json(json!({
            "status": "error",
            "message": message,
        }));

        (status, body).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ApiError::Unauthenticated, StatusCode::UNAUTHORIZED),
            (CommonError::InvalidCredentials.into(), StatusCode::UNAUTHORIZED),
            (CommonError::Forbidden.into(), StatusCode::FORBIDDEN),
            (CommonError::NotFound("x".into()).into(), StatusCode::NOT_FOUND),
            (CommonError::MissingData.into(), StatusCode::NOT_FOUND),
            (CommonError::SelfDeletion.into(), StatusCode::BAD_REQUEST),
            (CommonError::LastAdminProtected.into(), StatusCode::BAD_REQUEST),
            (CommonError::ColumnNotFound("City".into()).into(), StatusCode::BAD_REQUEST),
            (CommonError::DuplicateUsername("bob".into()).into(), StatusCode::BAD_REQUEST),
            (CommonError::Internal("boom".into()).into(), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(err.status(), expected, "{}", err);
        }
    }

    #[test]
    fn test_common_messages_pass_through() {
        let err: ApiError = CommonError::ColumnNotFound("City".into()).into();
        assert_eq!(err.to_string(), "Column City not found");
    }
}
