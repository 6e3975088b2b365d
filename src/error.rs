use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::schemas::ErrorResponse;

/// Failure kinds surfaced by the API. Every handler error is converted to
/// one of these at the request boundary and rendered as the standard
/// error JSON body; none of them is fatal to the process.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad form input, surfaced inline to the caller.
    #[error("{0}")]
    Validation(String),
    /// A non-staff session attempted a staff-only operation.
    #[error("Staff privileges are required for this operation")]
    Permission,
    /// The referenced record does not exist or is not owned by the
    /// requester. The two cases are deliberately indistinguishable.
    #[error("{0} not found")]
    NotFound(&'static str),
    /// Bad or missing credentials. Does not say whether the username
    /// exists.
    #[error("Invalid username or password")]
    Authentication,
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),
    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Permission => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Authentication => StatusCode::UNAUTHORIZED,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::Permission => "PERMISSION_DENIED",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Authentication => "INVALID_CREDENTIALS",
            ApiError::Database(_) => "DATABASE_ERROR",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Collaborator failures get logged with detail; the response body
        // stays generic.
        match &self {
            ApiError::Database(err) => tracing::error!("database error: {}", err),
            ApiError::Internal(detail) => tracing::error!("internal error: {}", detail),
            _ => {}
        }

        let body = ErrorResponse {
            error: self.to_string(),
            code: self.code().to_string(),
            success: false,
        };

        (self.status(), Json(body)).into_response()
    }
}
