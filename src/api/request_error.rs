use axum::{
    extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse,
    response::Response, Json,
};
use validator::ValidationErrors;

use crate::{authorization::AuthorizationError, services::ServiceError};

/// Request failure at the API boundary.
///
/// Each kind maps to its own status code; "not found", "forbidden" and
/// "invalid input" are never conflated.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("Invalid JSON format")]
    InvalidJson(#[from] JsonRejection),
    #[error("Validation error")]
    Validation(ValidationErrors),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("You are not authorized to modify this {0}")]
    Forbidden(&'static str),
    #[error("The value for field '{0}' must be unique.")]
    Unique(&'static str),
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Internal server error")]
    Internal(String),
}

impl From<ServiceError> for RequestError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::NotFound(resource) => Self::NotFound(resource),
            ServiceError::Validation(errors) => Self::Validation(errors),
            ServiceError::Database(e) => Self::Internal(e.to_string()),
        }
    }
}

impl From<AuthorizationError> for RequestError {
    fn from(error: AuthorizationError) -> Self {
        match error {
            AuthorizationError::NotFound { resource } => Self::NotFound(resource),
            AuthorizationError::Forbidden { resource } => Self::Forbidden(resource),
            AuthorizationError::Database(e) => Self::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidJson(_) | Self::Validation(_) | Self::Unique(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        match self {
            Self::Validation(errors) => {
                (status, Json(serde_json::json!(errors))).into_response()
            }
            Self::Internal(detail) => {
                // Storage details stay in the logs, not in the response body.
                tracing::error!("request failed: {detail}");
                (status, Json(serde_json::json!({ "message": "Internal server error" })))
                    .into_response()
            }
            other => {
                (status, Json(serde_json::json!({ "message": other.to_string() })))
                    .into_response()
            }
        }
    }
}
